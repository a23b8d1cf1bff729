use crate::filter::Filter;
use crate::types::{Ingredient, RecipePayload, SearchHit};

pub trait Embedder: Send + Sync {
    /// Stable identifier for the provider/model (e.g., `hash:xx64:d768`).
    fn id(&self) -> &str;
    /// Embedding dimensionality (D). Must match the store's collection schema.
    fn dim(&self) -> usize;
    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

impl Embedder for Box<dyn Embedder> {
    fn id(&self) -> &str {
        (**self).id()
    }
    fn dim(&self) -> usize {
        (**self).dim()
    }
    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        (**self).embed(text)
    }
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        (**self).embed_batch(texts)
    }
}

/// Extracts ingredients from a pantry/fridge image. Implementations call an
/// external vision service and may fail transiently; callers wrap invocations
/// in the retry policy.
pub trait VisionExtractor: Send + Sync {
    fn analyze(&self, image_bytes: &[u8]) -> anyhow::Result<Vec<Ingredient>>;
}

/// The external vector store, blocking surface. Implementations acquire and
/// release their connection per call so resource lifetime is bounded to one
/// request.
pub trait VectorStore: Send + Sync {
    fn search(&self, query_vec: &[f32], top_k: usize, filter: &Filter) -> anyhow::Result<Vec<SearchHit>>;
    fn upsert(&self, id: i64, vector: &[f32], payload: &RecipePayload) -> anyhow::Result<()>;
    fn batch_upsert(&self, ids: &[i64], vectors: &[Vec<f32>], payloads: &[RecipePayload]) -> anyhow::Result<()>;
    fn count(&self) -> anyhow::Result<usize>;
}
