#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! The retrieval-and-ranking pipeline: query composition, embedding,
//! filtered vector search, and blended ranking, sequenced behind a single
//! entry point.

pub mod agent;
pub mod compose;
pub mod rank;

use tracing::{debug, info, warn};

use recipedb_core::config::DEFAULT_TOP_K;
use recipedb_core::error::Error;
use recipedb_core::filter::build_recipe_filter;
use recipedb_core::retry::RetryPolicy;
use recipedb_core::traits::{Embedder, VectorStore, VisionExtractor};
use recipedb_core::types::{Ingredient, RankedRecipe, Recommendations, UserPreferences};

use crate::agent::AgentOrchestrator;

/// Sequences composer → embed (behind the retry policy) → filter builder →
/// vector search → ranker for one request. All per-request state flows by
/// parameter; the pipeline itself holds only collaborators and is safe to
/// share across concurrent invocations.
pub struct RecipePipeline<E, S>
where
    E: Embedder,
    S: VectorStore,
{
    embedder: E,
    store: S,
    retry: RetryPolicy,
    top_k: usize,
    agent: Option<Box<dyn AgentOrchestrator>>,
}

impl<E, S> RecipePipeline<E, S>
where
    E: Embedder,
    S: VectorStore,
{
    pub fn new(embedder: E, store: S) -> Self {
        Self { embedder, store, retry: RetryPolicy::default(), top_k: DEFAULT_TOP_K, agent: None }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_agent(mut self, agent: Box<dyn AgentOrchestrator>) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Recommend recipes for already-detected ingredients. Zero detected
    /// ingredients short-circuit to an empty result without touching the
    /// embedder or the store. Names pass through as detected; the ranker
    /// lower-cases its own copies for overlap matching.
    pub fn recommend(
        &self,
        detected: &[Ingredient],
        prefs: &UserPreferences,
    ) -> anyhow::Result<Recommendations> {
        let names: Vec<String> = detected.iter().map(|i| i.name.clone()).collect();
        if names.is_empty() {
            info!("no ingredients detected, returning empty result");
            return Ok(Recommendations::default());
        }

        if let Some(agent) = &self.agent {
            match agent.run(&names, prefs) {
                Ok(recipes) if !recipes.is_empty() => {
                    info!(recipes = recipes.len(), "agent mode produced the recipe list");
                    return Ok(Recommendations { detected_ingredients: names, recipes });
                }
                Ok(_) => warn!("agent returned no recipes, falling back to direct pipeline"),
                Err(err) => warn!(error = %err, "agent failed, falling back to direct pipeline"),
            }
        }

        let recipes = self.recommend_direct(&names, prefs)?;
        Ok(Recommendations { detected_ingredients: names, recipes })
    }

    /// Extract ingredients from an image (through the retry policy) and
    /// recommend. An empty image is an input validation error, not a retryable
    /// failure.
    pub fn scan<V: VisionExtractor>(
        &self,
        vision: &V,
        image_bytes: &[u8],
        prefs: &UserPreferences,
    ) -> anyhow::Result<Recommendations> {
        if image_bytes.is_empty() {
            return Err(Error::InvalidInput("empty image".to_string()).into());
        }
        let detected = self.retry.run(|| vision.analyze(image_bytes))?;
        info!(ingredients = detected.len(), "vision extraction complete");
        self.recommend(&detected, prefs)
    }

    /// The fixed direct sequence: exactly one embed call, one search call.
    /// Errors from either abort the request; no partial list is produced.
    fn recommend_direct(
        &self,
        names: &[String],
        prefs: &UserPreferences,
    ) -> anyhow::Result<Vec<RankedRecipe>> {
        let query_text = compose::build_query_text(names, prefs);
        debug!(query = %query_text, "composed search query");

        let query_vec = self.retry.run(|| self.embedder.embed(&query_text))?;

        let filter =
            build_recipe_filter(&prefs.dietary_restrictions, prefs.skill_level.as_deref());
        let hits = self.store.search(&query_vec, self.top_k, &filter)?;
        debug!(hits = hits.len(), top_k = self.top_k, "vector search returned");

        Ok(rank::rank_hits(hits, names))
    }
}
