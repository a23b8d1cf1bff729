use recipedb_core::types::{RankedRecipe, UserPreferences};

/// External LLM orchestration seam. An implementation decides its own call
/// sequence (vision, search, reranking) and returns a structured recipe
/// list. The pipeline treats it as best-effort: whenever an agent errors or
/// comes back empty, the direct pipeline runs instead, so direct mode is
/// always the availability floor.
pub trait AgentOrchestrator: Send + Sync {
    fn run(
        &self,
        detected_ingredients: &[String],
        prefs: &UserPreferences,
    ) -> anyhow::Result<Vec<RankedRecipe>>;
}
