//! Ingest a JSONL recipe corpus into the recipes collection: infer dietary
//! tags and skill level, embed recipe text in batches, and batch-upsert with
//! per-item fallback on batch failure.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use recipedb_core::config::{expand_path, Settings};
use recipedb_core::infer::{infer_skill_level, DietaryTags};
use recipedb_core::retry::RetryPolicy;
use recipedb_core::traits::Embedder;
use recipedb_core::types::{RecipePayload, StringList};
use recipedb_embed::get_default_embedder;
use recipedb_vector::table::{count_recipes, open_db};
use recipedb_vector::RecipeIndexer;

/// One line of the raw corpus. List fields may be native arrays or
/// JSON-encoded strings depending on how the dataset was exported.
#[derive(Debug, Deserialize)]
struct RawRecipe {
    #[serde(default)]
    recipe_title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    ingredients: StringList,
    #[serde(default)]
    directions: StringList,
    #[serde(default)]
    category: String,
    #[serde(default)]
    num_steps: u32,
}

fn build_payload(raw: RawRecipe) -> RecipePayload {
    let ingredients = raw.ingredients.into_vec();
    let directions = raw.directions.into_vec();
    let num_steps = if raw.num_steps > 0 { raw.num_steps } else { directions.len() as u32 };
    let tags = DietaryTags::infer(&ingredients);
    RecipePayload {
        title: raw.recipe_title,
        description: raw.description,
        ingredients,
        directions,
        category: raw.category,
        dietary_tags: tags.tags(),
        num_steps,
        skill_level: infer_skill_level(num_steps).to_string(),
    }
}

/// Text embedded per recipe: title first, then description, ingredients,
/// and category. Mirrors the query composer's ingredient-first weighting.
fn build_embedding_text(payload: &RecipePayload) -> String {
    let mut parts = Vec::new();
    if !payload.title.is_empty() {
        parts.push(payload.title.clone());
    }
    if !payload.description.is_empty() {
        parts.push(payload.description.clone());
    }
    if !payload.ingredients.is_empty() {
        parts.push(format!("Ingredients: {}", payload.ingredients.join(", ")));
    }
    if !payload.category.is_empty() {
        parts.push(format!("Category: {}", payload.category));
    }
    parts.join(". ")
}

/// Chunking panics on a zero size, so zero is rejected alongside
/// non-numbers.
fn parse_batch_size(s: &str) -> Option<usize> {
    s.parse().ok().filter(|&n| n >= 1)
}

fn corpus_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")))
        .collect();
    files.sort();
    files
}

fn read_corpus(path: &Path, limit: Option<usize>) -> Result<Vec<RecipePayload>> {
    let files = corpus_files(path);
    if files.is_empty() {
        return Err(anyhow!("no .json/.jsonl corpus files under {}", path.display()));
    }
    let mut recipes = Vec::new();
    for file in &files {
        let content = fs::read_to_string(file)?;
        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<RawRecipe>(line) {
                Ok(raw) => recipes.push(build_payload(raw)),
                Err(e) => warn!(file = %file.display(), line = line_num + 1, error = %e, "skipping malformed line"),
            }
            if let Some(lim) = limit {
                if recipes.len() >= lim {
                    return Ok(recipes);
                }
            }
        }
    }
    Ok(recipes)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <corpus path> [--limit N] [--batch-size N]", args[0]);
        eprintln!("Example: {} data/recipes.jsonl --limit 1000 --batch-size 50", args[0]);
        std::process::exit(1);
    }
    let data_path = PathBuf::from(&args[1]);
    let mut limit: Option<usize> = None;
    let mut batch_size = 50usize;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--limit" => {
                limit = args.get(i + 1).and_then(|v| v.parse().ok());
                if limit.is_none() {
                    eprintln!("Error: --limit requires a number");
                    std::process::exit(1);
                }
                i += 1;
            }
            "--batch-size" => {
                match args.get(i + 1).map(|v| v.as_str()).and_then(parse_batch_size) {
                    Some(n) => batch_size = n,
                    None => {
                        eprintln!("Error: --batch-size requires a positive number");
                        std::process::exit(1);
                    }
                }
                i += 1;
            }
            other => {
                eprintln!("Error: unknown flag {other}");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let settings = Settings::load()?;
    let db_uri = expand_path(&settings.store.db_uri);

    println!("Reading recipes from {}...", data_path.display());
    let payloads = read_corpus(&data_path, limit)?;
    let total = payloads.len();
    println!("Loaded {total} recipes.");
    if total == 0 {
        return Ok(());
    }

    let embedder = get_default_embedder()?;
    let retry = RetryPolicy::default();

    let conn = open_db(&db_uri.to_string_lossy()).await?;
    let indexer = RecipeIndexer::new(conn, &settings.store.table).await?;

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} recipes ({percent}%) {msg}")
            .expect("static template")
            .progress_chars("#>-"),
    );

    let mut processed = 0usize;
    let mut failed = 0usize;
    for (batch_index, batch) in payloads.chunks(batch_size).enumerate() {
        let texts: Vec<String> = batch.iter().map(build_embedding_text).collect();
        let vectors = retry.run(|| embedder.embed_batch(&texts))?;
        let ids: Vec<i64> =
            (0..batch.len()).map(|j| (batch_index * batch_size + j) as i64).collect();

        if let Err(e) = indexer.batch_upsert(&ids, &vectors, batch).await {
            // Batch write failed: fall back to per-item upserts and keep going.
            warn!(batch = batch_index, error = %e, "batch upsert failed, retrying per item");
            for ((id, vector), payload) in ids.iter().zip(&vectors).zip(batch) {
                if let Err(e2) = indexer.upsert(*id, vector, payload).await {
                    warn!(id, error = %e2, "failed to upsert recipe");
                    failed += 1;
                }
            }
        }

        processed += batch.len();
        pb.set_position(processed as u64);
        if let Some(last) = batch.last() {
            pb.set_message(last.title.chars().take(40).collect::<String>());
        }
    }
    pb.finish_with_message("ingestion complete");

    let conn = open_db(&db_uri.to_string_lossy()).await?;
    let count = count_recipes(&conn, &settings.store.table).await?;
    println!("\nIngestion complete! {} recipes processed ({failed} failed).", processed - failed);
    println!("Collection '{}' now has {count} vectors.", settings.store.table);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_batch_size;

    #[test]
    fn batch_size_must_be_a_positive_number() {
        assert_eq!(parse_batch_size("50"), Some(50));
        assert_eq!(parse_batch_size("1"), Some(1));
        assert_eq!(parse_batch_size("0"), None);
        assert_eq!(parse_batch_size("-5"), None);
        assert_eq!(parse_batch_size("many"), None);
    }
}
