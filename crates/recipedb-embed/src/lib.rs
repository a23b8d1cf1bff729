//! Embedder implementations behind the `recipedb_core::traits::Embedder` seam.
//!
//! The query/ingestion paths only depend on the trait; which provider backs
//! it is a deployment decision. This crate ships the deterministic hashing
//! embedder used for development, tests, and fully offline operation. Remote
//! providers implement the same trait and are wrapped in the retry policy by
//! their callers.

use std::hash::{Hash, Hasher};

use anyhow::{anyhow, Result};
use tracing::debug;
use twox_hash::XxHash64;

use recipedb_core::config::EMBEDDING_DIM;
use recipedb_core::traits::Embedder;

/// Deterministic, L2-normalized bag-of-words hashing embedder. Not a real
/// semantic model; it exists so the full pipeline runs without any external
/// service and produces stable vectors for the same input.
pub struct HashEmbedder {
    dim: usize,
    id: String,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim, id: format!("hash:xx64:d{dim}") }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(EMBEDDING_DIM)
    }
}

impl Embedder for HashEmbedder {
    fn id(&self) -> &str {
        &self.id
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut v = vec![0f32; self.dim];
        for (i, token) in text.to_lowercase().split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        Ok(v)
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// Default embedder for the current environment. Dimensionality always
/// matches the store's collection schema; a provider reporting anything else
/// is rejected here rather than truncated later.
pub fn get_default_embedder() -> Result<Box<dyn Embedder>> {
    let embedder = HashEmbedder::default();
    if embedder.dim() != EMBEDDING_DIM {
        return Err(anyhow!(
            "embedder dim {} does not match collection schema dim {}",
            embedder.dim(),
            EMBEDDING_DIM
        ));
    }
    debug!(id = embedder.id(), dim = embedder.dim(), "using hashing embedder");
    Ok(Box::new(embedder))
}
