use recipedb_core::types::UserPreferences;

/// Build the natural-language query string fed to the embedder.
///
/// Clause order is fixed and load-bearing: ingredients come first so they
/// dominate the embedding, then cuisine, meal type, and the user's free-form
/// prompt verbatim. Clauses are joined with `". "` and omitted when their
/// source data is empty. Changing this ordering changes search behavior.
pub fn build_query_text(ingredient_names: &[String], prefs: &UserPreferences) -> String {
    let mut parts = vec![format!("Ingredients: {}", ingredient_names.join(", "))];

    if !prefs.cuisine_preferences.is_empty() {
        parts.push(format!("Cuisine: {}", prefs.cuisine_preferences.join(", ")));
    }
    if let Some(meal_type) = prefs.meal_type.as_deref().filter(|m| !m.is_empty()) {
        parts.push(format!("Meal type: {meal_type}"));
    }
    if let Some(prompt) = prefs.additional_prompt.as_deref().filter(|p| !p.is_empty()) {
        parts.push(prompt.to_string());
    }

    parts.join(". ")
}
