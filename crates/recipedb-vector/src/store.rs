use anyhow::Result;

use recipedb_core::filter::Filter;
use recipedb_core::traits::VectorStore;
use recipedb_core::types::{RecipePayload, SearchHit};

use crate::table::{count_recipes, open_db};
use crate::writer::RecipeIndexer;

/// Blocking `VectorStore` adapter over the async LanceDB surface.
///
/// Every call opens a fresh connection (and runtime), performs the
/// operation, and drops both on return, so the store's resource lifetime is
/// bounded to a single pipeline invocation. Must not be called from inside
/// an async context; async callers use the crate's async functions directly.
pub struct LanceRecipeStore {
    db_uri: String,
    table_name: String,
}

impl LanceRecipeStore {
    pub fn new(db_uri: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self { db_uri: db_uri.into(), table_name: table_name.into() }
    }
}

impl VectorStore for LanceRecipeStore {
    fn search(&self, query_vec: &[f32], top_k: usize, filter: &Filter) -> Result<Vec<SearchHit>> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(async {
            let conn = open_db(&self.db_uri).await?;
            crate::search::search_recipes(&conn, &self.table_name, query_vec, top_k, filter).await
        })
    }

    fn upsert(&self, id: i64, vector: &[f32], payload: &RecipePayload) -> Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(async {
            let conn = open_db(&self.db_uri).await?;
            let indexer = RecipeIndexer::new(conn, &self.table_name).await?;
            indexer.upsert(id, vector, payload).await
        })
    }

    fn batch_upsert(&self, ids: &[i64], vectors: &[Vec<f32>], payloads: &[RecipePayload]) -> Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(async {
            let conn = open_db(&self.db_uri).await?;
            let indexer = RecipeIndexer::new(conn, &self.table_name).await?;
            indexer.batch_upsert(ids, vectors, payloads).await
        })
    }

    fn count(&self) -> Result<usize> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(async {
            let conn = open_db(&self.db_uri).await?;
            count_recipes(&conn, &self.table_name).await
        })
    }
}
