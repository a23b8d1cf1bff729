//! Recommend recipes for a set of on-hand ingredients, applying dietary and
//! skill filters from the command line. Prints the ranked list as JSON.

use std::env;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use recipedb_core::config::{expand_path, Settings};
use recipedb_core::types::{Ingredient, UserPreferences};
use recipedb_embed::get_default_embedder;
use recipedb_engine::RecipePipeline;
use recipedb_vector::LanceRecipeStore;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} <ingredient>... [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --diet <r1,r2>       dietary restrictions (e.g. vegetarian,gluten-free)");
    eprintln!("  --cuisine <c1,c2>    cuisine preferences (e.g. italian,thai)");
    eprintln!("  --meal <type>        meal type (e.g. dinner)");
    eprintln!("  --skill <level>      beginner | intermediate | advanced");
    eprintln!("  --allergies <a1,a2>  allergies (carried to agent mode only)");
    eprintln!("  --prompt <text>      free-form request appended to the query");
    eprintln!("  --top-k <n>          candidates to retrieve (default from config)");
    eprintln!();
    eprintln!("Example: {program} chicken rice --diet gluten-free --skill beginner");
    std::process::exit(1);
}

fn split_csv(s: &str) -> Vec<String> {
    s.split(',').map(str::trim).filter(|t| !t.is_empty()).map(str::to_string).collect()
}

/// Zero would sidestep the config validator and return nothing; reject it
/// like any other malformed value.
fn parse_top_k(s: &str) -> Option<usize> {
    s.parse().ok().filter(|&n| n >= 1)
}

fn take_value<'a>(args: &'a [String], i: usize) -> &'a str {
    match args.get(i + 1) {
        Some(v) => v,
        None => {
            eprintln!("Error: {} requires a value", args[i]);
            std::process::exit(1);
        }
    }
}

// Search opens a fresh blocking connection per call, so main stays sync.
fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage(&args[0]);
    }

    let mut ingredients: Vec<String> = Vec::new();
    let mut prefs = UserPreferences::default();
    let mut top_k: Option<usize> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--diet" => {
                prefs.dietary_restrictions = split_csv(take_value(&args, i));
                i += 1;
            }
            "--cuisine" => {
                prefs.cuisine_preferences = split_csv(take_value(&args, i));
                i += 1;
            }
            "--meal" => {
                prefs.meal_type = Some(take_value(&args, i).to_string());
                i += 1;
            }
            "--skill" => {
                prefs.skill_level = Some(take_value(&args, i).to_string());
                i += 1;
            }
            "--allergies" => {
                prefs.allergies = split_csv(take_value(&args, i));
                i += 1;
            }
            "--prompt" => {
                prefs.additional_prompt = Some(take_value(&args, i).to_string());
                i += 1;
            }
            "--top-k" => {
                match parse_top_k(take_value(&args, i)) {
                    Some(n) => top_k = Some(n),
                    None => {
                        eprintln!("Error: --top-k requires a positive number");
                        std::process::exit(1);
                    }
                }
                i += 1;
            }
            flag if flag.starts_with("--") => {
                eprintln!("Error: unknown flag {flag}");
                usage(&args[0]);
            }
            name => ingredients.push(name.to_string()),
        }
        i += 1;
    }

    if ingredients.is_empty() {
        eprintln!("Error: at least one ingredient is required");
        usage(&args[0]);
    }

    let settings = Settings::load()?;
    let db_uri = expand_path(&settings.store.db_uri);

    let store = LanceRecipeStore::new(db_uri.to_string_lossy(), &settings.store.table);
    let embedder = get_default_embedder()?;
    let pipeline =
        RecipePipeline::new(embedder, store).with_top_k(top_k.unwrap_or(settings.search.top_k));

    let detected: Vec<Ingredient> = ingredients
        .into_iter()
        .map(|name| Ingredient { name, quantity: None, confidence: 1.0 })
        .collect();

    let result = pipeline.recommend(&detected, &prefs)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_top_k;

    #[test]
    fn top_k_must_be_a_positive_number() {
        assert_eq!(parse_top_k("10"), Some(10));
        assert_eq!(parse_top_k("1"), Some(1));
        assert_eq!(parse_top_k("0"), None);
        assert_eq!(parse_top_k("all"), None);
    }
}
