//! Domain types shared by the ingestion and query paths.

use serde::{Deserialize, Serialize};

/// An ingredient detected in a pantry/fridge image by the vision
/// collaborator. `name` is carried as detected; overlap matching
/// lower-cases its own copies. `confidence` is the extractor's own score
/// in [0,1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<String>,
    pub confidence: f32,
}

/// User preferences for one recommendation request. Immutable once built.
///
/// `allergies` is accepted and carried through but not enforced by the
/// filter builder; it is descriptive input for the agent mode only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub cuisine_preferences: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub skill_level: Option<String>,
    #[serde(default)]
    pub additional_prompt: Option<String>,
}

/// A list-valued payload field as it may arrive from the store: either a
/// native sequence or a JSON-encoded string, depending on the ingestion
/// path that wrote it. Decoded exactly once at the store boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    List(Vec<String>),
    Encoded(String),
}

impl StringList {
    /// Decode into the canonical sequence form. A string that is not valid
    /// JSON is kept as a single-element list; this never fails.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            StringList::List(v) => v,
            StringList::Encoded(s) => serde_json::from_str(&s).unwrap_or_else(|_| vec![s]),
        }
    }
}

impl Default for StringList {
    fn default() -> Self {
        StringList::List(Vec::new())
    }
}

/// The structured attributes stored alongside a recipe vector. Created once
/// at ingestion and read-only at query time. List fields are canonical
/// (already decoded) on this type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipePayload {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub directions: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub dietary_tags: Vec<String>,
    #[serde(default)]
    pub num_steps: u32,
    #[serde(default)]
    pub skill_level: String,
}

/// One raw hit from the vector store. `vector_score` is a similarity in
/// [0,1]; higher is better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: i64,
    pub vector_score: f32,
    pub payload: RecipePayload,
}

/// A recipe after blending vector similarity with ingredient overlap.
/// `match_score` is serialized as `match` (reserved word in Rust).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedRecipe {
    pub id: i64,
    pub title: String,
    #[serde(rename = "match")]
    pub match_score: u8,
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub directions: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub dietary_tags: Vec<String>,
    #[serde(default)]
    pub skill_level: String,
}

/// The pipeline's output: the detected ingredient names paired with the
/// ranked recipe list, sorted non-increasing by `match`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recommendations {
    pub detected_ingredients: Vec<String>,
    pub recipes: Vec<RankedRecipe>,
}
