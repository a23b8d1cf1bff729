use anyhow::{anyhow, Result};
use arrow_array::{
    BooleanArray, FixedSizeListArray, Int32Array, Int64Array, RecordBatch, RecordBatchIterator,
    StringArray,
};
use lancedb::Connection;
use std::sync::Arc;
use tracing::debug;

use recipedb_core::infer::KNOWN_TAGS;
use recipedb_core::types::RecipePayload;

use crate::schema::{build_recipes_schema, EMBEDDING_DIM};
use crate::table::ensure_recipes_table;

/// Writes recipe vectors and payloads into the recipes table. Upserts are
/// `merge_insert` keyed on `id`: matched rows update, unmatched insert.
pub struct RecipeIndexer {
    pub(crate) db: Connection,
    pub(crate) table_name: String,
}

impl RecipeIndexer {
    pub async fn new(db: Connection, table_name: &str) -> Result<Self> {
        ensure_recipes_table(&db, table_name).await?;
        Ok(Self { db, table_name: table_name.to_string() })
    }

    pub async fn upsert(&self, id: i64, vector: &[f32], payload: &RecipePayload) -> Result<()> {
        self.batch_upsert(&[id], std::slice::from_ref(&vector.to_vec()), std::slice::from_ref(payload))
            .await
    }

    pub async fn batch_upsert(
        &self,
        ids: &[i64],
        vectors: &[Vec<f32>],
        payloads: &[RecipePayload],
    ) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        if ids.len() != vectors.len() || ids.len() != payloads.len() {
            return Err(anyhow!(
                "batch_upsert length mismatch: {} ids, {} vectors, {} payloads",
                ids.len(),
                vectors.len(),
                payloads.len()
            ));
        }
        for v in vectors {
            if v.len() != EMBEDDING_DIM as usize {
                return Err(anyhow!("dim mismatch: got {} expected {}", v.len(), EMBEDDING_DIM));
            }
        }

        let batch = payloads_to_record_batch(ids, vectors, payloads)?;
        let schema = batch.schema();
        let reader = Box::new(RecordBatchIterator::new(vec![Ok(batch)].into_iter(), schema));

        let table = self.db.open_table(&self.table_name).execute().await?;
        let mut mi = table.merge_insert(&["id"]);
        mi.when_matched_update_all(None).when_not_matched_insert_all();
        let res = mi.execute(reader).await?;
        debug!(
            table = %self.table_name,
            inserted = res.num_inserted_rows,
            updated = res.num_updated_rows,
            "upserted recipe batch"
        );
        Ok(())
    }
}

fn payloads_to_record_batch(
    ids: &[i64],
    vectors: &[Vec<f32>],
    payloads: &[RecipePayload],
) -> Result<RecordBatch> {
    let schema = build_recipes_schema();

    let mut titles = Vec::new();
    let mut descriptions = Vec::new();
    let mut categories = Vec::new();
    let mut ingredients = Vec::new();
    let mut directions = Vec::new();
    let mut dietary_tags = Vec::new();
    let mut num_steps = Vec::new();
    let mut skill_levels = Vec::new();
    let mut tag_flags: Vec<Vec<bool>> = vec![Vec::new(); KNOWN_TAGS.len()];
    let mut vecs: Vec<Option<Vec<Option<f32>>>> = Vec::new();

    for (payload, vector) in payloads.iter().zip(vectors.iter()) {
        titles.push(payload.title.clone());
        descriptions.push(payload.description.clone());
        categories.push(payload.category.clone());
        ingredients.push(serde_json::to_string(&payload.ingredients)?);
        directions.push(serde_json::to_string(&payload.directions)?);
        dietary_tags.push(serde_json::to_string(&payload.dietary_tags)?);
        num_steps.push(payload.num_steps as i32);
        skill_levels.push(payload.skill_level.clone());
        for (slot, tag) in tag_flags.iter_mut().zip(KNOWN_TAGS) {
            slot.push(payload.dietary_tags.iter().any(|t| t == tag));
        }
        vecs.push(Some(vector.iter().map(|&x| Some(x)).collect()));
    }

    let mut columns: Vec<Arc<dyn arrow_array::Array>> = vec![
        Arc::new(Int64Array::from(ids.to_vec())),
        Arc::new(StringArray::from(titles)),
        Arc::new(StringArray::from(descriptions)),
        Arc::new(StringArray::from(categories)),
        Arc::new(StringArray::from(ingredients)),
        Arc::new(StringArray::from(directions)),
        Arc::new(StringArray::from(dietary_tags)),
        Arc::new(Int32Array::from(num_steps)),
        Arc::new(StringArray::from(skill_levels)),
    ];
    for flags in tag_flags {
        columns.push(Arc::new(BooleanArray::from(flags)));
    }
    columns.push(Arc::new(FixedSizeListArray::from_iter_primitive::<
        arrow_array::types::Float32Type,
        _,
        _,
    >(vecs.into_iter(), EMBEDDING_DIM)));

    Ok(RecordBatch::try_new(schema, columns)?)
}
