use recipedb_core::types::UserPreferences;
use recipedb_engine::compose::build_query_text;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn all_clauses_in_fixed_order() {
    let prefs = UserPreferences {
        cuisine_preferences: names(&["italian"]),
        additional_prompt: Some("quick".to_string()),
        ..UserPreferences::default()
    };
    let query = build_query_text(&names(&["egg", "flour"]), &prefs);
    assert_eq!(query, "Ingredients: egg, flour. Cuisine: italian. quick");
}

#[test]
fn empty_clauses_are_omitted() {
    let query = build_query_text(&names(&["rice"]), &UserPreferences::default());
    assert_eq!(query, "Ingredients: rice");
}

#[test]
fn meal_type_slots_between_cuisine_and_prompt() {
    let prefs = UserPreferences {
        cuisine_preferences: names(&["mexican", "indian"]),
        meal_type: Some("dinner".to_string()),
        additional_prompt: Some("make it spicy".to_string()),
        ..UserPreferences::default()
    };
    let query = build_query_text(&names(&["chicken", "rice"]), &prefs);
    assert_eq!(
        query,
        "Ingredients: chicken, rice. Cuisine: mexican, indian. Meal type: dinner. make it spicy"
    );
}

#[test]
fn dietary_restrictions_do_not_leak_into_the_query() {
    // Restrictions go through the filter, not the embedding text.
    let prefs = UserPreferences {
        dietary_restrictions: names(&["vegan"]),
        allergies: names(&["peanuts"]),
        ..UserPreferences::default()
    };
    let query = build_query_text(&names(&["tofu"]), &prefs);
    assert_eq!(query, "Ingredients: tofu");
}
