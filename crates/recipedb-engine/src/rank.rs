//! Blends vector similarity with exact ingredient overlap into the final
//! ranking key: 40% overlap, 60% similarity, clamped to [0,100].

use recipedb_core::types::{RankedRecipe, SearchHit};

/// Share of detected ingredients found in the recipe, as a percentage of the
/// recipe's own ingredient count. A detected ingredient matches when it is a
/// substring of any recipe ingredient (both lower-cased).
pub fn ingredient_match_pct(detected: &[String], recipe_ingredients: &[String]) -> u8 {
    let recipe_lower: Vec<String> = recipe_ingredients.iter().map(|i| i.to_lowercase()).collect();
    let matched = detected
        .iter()
        .map(|d| d.to_lowercase())
        .filter(|d| recipe_lower.iter().any(|ri| ri.contains(d.as_str())))
        .count();
    let total = recipe_ingredients.len().max(1);
    let pct = (100.0 * matched as f32 / total as f32).round() as u32;
    pct.min(100) as u8
}

/// `round(0.4 * match_pct + 0.6 * round(100 * vector_score))`, clamped.
pub fn blend(match_pct: u8, vector_score: f32) -> u8 {
    let vector_match = (100.0 * vector_score).round();
    let blended = (0.4 * f32::from(match_pct) + 0.6 * vector_match).round();
    blended.clamp(0.0, 100.0) as u8
}

/// Merge raw hits with overlap scoring and sort by descending blended score.
/// The sort is stable; ties keep the order the store returned them in.
pub fn rank_hits(hits: Vec<SearchHit>, detected: &[String]) -> Vec<RankedRecipe> {
    let mut recipes: Vec<RankedRecipe> = hits
        .into_iter()
        .map(|hit| {
            let match_pct = ingredient_match_pct(detected, &hit.payload.ingredients);
            let p = hit.payload;
            RankedRecipe {
                id: hit.id,
                title: p.title,
                match_score: blend(match_pct, hit.vector_score),
                ingredients: p.ingredients,
                description: p.description,
                directions: p.directions,
                category: p.category,
                dietary_tags: p.dietary_tags,
                skill_level: p.skill_level,
            }
        })
        .collect();
    recipes.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    recipes
}
