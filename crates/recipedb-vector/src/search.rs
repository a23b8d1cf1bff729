use anyhow::{anyhow, Result};
use arrow_array::{Float32Array, Int32Array, Int64Array, RecordBatch, StringArray};
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{Connection, DistanceType};
use tracing::debug;

use recipedb_core::filter::{Condition, Filter, Value};
use recipedb_core::types::{RecipePayload, SearchHit, StringList};

use crate::schema::EMBEDDING_DIM;

/// Render a filter predicate as a LanceDB SQL condition. Identifiers are
/// double-quoted so hyphenated tag columns (`tag_gluten-free`) stay intact.
/// Returns `None` for the empty (match-all) filter.
pub fn render_filter(filter: &Filter) -> Option<String> {
    if filter.is_empty() {
        return None;
    }
    let clauses: Vec<String> = filter
        .must
        .iter()
        .map(|cond| match cond {
            Condition::Eq(field, Value::Bool(b)) => format!("\"{field}\" = {b}"),
            Condition::Eq(field, Value::Int(i)) => format!("\"{field}\" = {i}"),
            Condition::Lte(field, i) => format!("\"{field}\" <= {i}"),
        })
        .collect();
    Some(clauses.join(" AND "))
}

/// Nearest-neighbor search over the recipes table, optionally restricted by
/// a filter predicate. Hits carry the similarity score (`1 - distance`,
/// clamped to [0,1]) and the payload decoded into its canonical form.
pub async fn search_recipes(
    conn: &Connection,
    table_name: &str,
    query_vec: &[f32],
    top_k: usize,
    filter: &Filter,
) -> Result<Vec<SearchHit>> {
    if query_vec.len() != EMBEDDING_DIM as usize {
        return Err(anyhow!("dim mismatch: got {} expected {}", query_vec.len(), EMBEDDING_DIM));
    }

    let table = conn.open_table(table_name).execute().await?;
    let mut query = table
        .vector_search(query_vec.to_vec())?
        .distance_type(DistanceType::Cosine)
        .limit(top_k);
    if let Some(predicate) = render_filter(filter) {
        debug!(%predicate, "applying payload filter");
        query = query.only_if(predicate);
    }

    let mut stream = query.execute().await?;
    let mut hits = Vec::new();
    while let Some(batch) = stream.try_next().await? {
        for i in 0..batch.num_rows() {
            hits.push(hit_from_row(&batch, i)?);
        }
    }
    debug!(table = %table_name, hits = hits.len(), "vector search complete");
    Ok(hits)
}

fn str_col<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| anyhow!("missing column: {name}"))
}

/// Decode a JSON-encoded list column; a non-JSON value becomes a
/// single-element list. This is the only place list payloads are decoded.
fn decode_list(raw: &str) -> Vec<String> {
    StringList::Encoded(raw.to_string()).into_vec()
}

fn hit_from_row(batch: &RecordBatch, i: usize) -> Result<SearchHit> {
    let id = batch
        .column_by_name("id")
        .and_then(|c| c.as_any().downcast_ref::<Int64Array>())
        .ok_or_else(|| anyhow!("missing column: id"))?
        .value(i);
    let num_steps = batch
        .column_by_name("num_steps")
        .and_then(|c| c.as_any().downcast_ref::<Int32Array>())
        .ok_or_else(|| anyhow!("missing column: num_steps"))?
        .value(i);
    let vector_score = batch
        .column_by_name("_distance")
        .and_then(|c| c.as_any().downcast_ref::<Float32Array>())
        .map_or(0.0, |d| (1.0 - d.value(i)).clamp(0.0, 1.0));

    let payload = RecipePayload {
        title: str_col(batch, "title")?.value(i).to_string(),
        description: str_col(batch, "description")?.value(i).to_string(),
        ingredients: decode_list(str_col(batch, "ingredients")?.value(i)),
        directions: decode_list(str_col(batch, "directions")?.value(i)),
        category: str_col(batch, "category")?.value(i).to_string(),
        dietary_tags: decode_list(str_col(batch, "dietary_tags")?.value(i)),
        num_steps: num_steps.max(0) as u32,
        skill_level: str_col(batch, "skill_level")?.value(i).to_string(),
    };

    Ok(SearchHit { id, vector_score, payload })
}
