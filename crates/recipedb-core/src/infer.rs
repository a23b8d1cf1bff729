//! Ingestion-time inference of dietary tags and skill level.
//!
//! The tag classifier is a conservative best-effort heuristic, not an
//! authoritative allergen determination. Matching is substring containment
//! over the lower-cased ingredient text, which intentionally favors false
//! positives over false negatives for safety-relevant tags ("nut" flags
//! anything containing it). Runs once per recipe; the result is cached in
//! the store payload and never re-inferred on read.

use serde::{Deserialize, Serialize};

pub const KNOWN_TAGS: &[&str] = &[
    "vegetarian",
    "vegan",
    "gluten-free",
    "dairy-free",
    "nut-free",
    "shellfish-free",
];

const MEAT_KEYWORDS: &[&str] = &[
    "chicken", "beef", "pork", "lamb", "turkey", "bacon", "sausage", "salami",
    "prosciutto", "pepperoni", "ham", "steak", "veal", "duck", "goose",
    "venison", "bison", "rabbit", "chuck", "sirloin", "tenderloin", "rib",
    "brisket",
];

const SEAFOOD_KEYWORDS: &[&str] = &[
    "shrimp", "salmon", "fish", "tuna", "cod", "tilapia", "crab", "lobster",
    "clam", "mussel", "oyster", "scallop", "anchov", "sardine", "trout",
    "halibut", "mahi", "swordfish", "calamari", "squid", "octopus", "prawn",
    "crawfish", "crayfish",
];

const DAIRY_KEYWORDS: &[&str] = &[
    "milk", "cream", "butter", "cheese", "yogurt", "yoghurt", "whey", "ghee",
    "casein", "half-and-half", "half and half", "ricotta", "mozzarella",
    "parmesan", "cheddar", "provolone", "feta", "brie", "gouda", "gruyere",
    "mascarpone",
];

const EGG_KEYWORDS: &[&str] = &["egg", "mayonnaise", "mayo"];

const GLUTEN_KEYWORDS: &[&str] = &[
    "flour", "bread", "pasta", "noodle", "spaghetti", "macaroni", "penne",
    "fettuccine", "linguine", "lasagna", "tortilla", "wrap", "pita",
    "baguette", "croissant", "breadcrumb", "panko", "crouton", "soy sauce",
    "barley", "rye", "wheat", "couscous", "orzo", "muffin", "cake", "cookie",
    "biscuit", "cracker", "pretzel", "bagel", "roll", "bun", "pie crust",
    "pastry", "phyllo", "wonton", "manicotti", "ravioli", "tortellini",
];

const NUT_KEYWORDS: &[&str] = &[
    "peanut", "almond", "walnut", "cashew", "pecan", "pistachio", "macadamia",
    "hazelnut", "pine nut", "brazil nut",
];

const SHELLFISH_KEYWORDS: &[&str] = &[
    "shrimp", "crab", "lobster", "clam", "mussel", "oyster", "scallop",
    "crawfish", "crayfish", "prawn",
];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

/// Boolean dietary attributes derived from an ingredient list, used both as
/// filterable payload columns and as display metadata.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DietaryTags {
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
    pub nut_free: bool,
    pub shellfish_free: bool,
}

impl DietaryTags {
    pub fn infer(ingredient_names: &[String]) -> Self {
        let text = ingredient_names.join(" ").to_lowercase();

        let has_meat = contains_any(&text, MEAT_KEYWORDS);
        let has_seafood = contains_any(&text, SEAFOOD_KEYWORDS);
        let has_dairy = contains_any(&text, DAIRY_KEYWORDS);
        let has_eggs = contains_any(&text, EGG_KEYWORDS);
        let has_gluten = contains_any(&text, GLUTEN_KEYWORDS);
        let has_nuts = contains_any(&text, NUT_KEYWORDS);
        let has_shellfish = contains_any(&text, SHELLFISH_KEYWORDS);

        let vegetarian = !has_meat && !has_seafood;
        Self {
            vegetarian,
            vegan: vegetarian && !has_dairy && !has_eggs,
            gluten_free: !has_gluten,
            dairy_free: !has_dairy,
            nut_free: !has_nuts,
            shellfish_free: !has_shellfish,
        }
    }

    /// Tag list in the fixed `KNOWN_TAGS` order.
    pub fn tags(&self) -> Vec<String> {
        KNOWN_TAGS
            .iter()
            .zip(self.flags())
            .filter_map(|(tag, set)| set.then(|| (*tag).to_string()))
            .collect()
    }

    /// Boolean flags in the fixed `KNOWN_TAGS` order, one per `tag_<name>`
    /// payload column.
    pub fn flags(&self) -> [bool; 6] {
        [
            self.vegetarian,
            self.vegan,
            self.gluten_free,
            self.dairy_free,
            self.nut_free,
            self.shellfish_free,
        ]
    }
}

/// Skill level from step count: `<= 4` beginner, `<= 8` intermediate, else
/// advanced. Total and deterministic.
pub fn infer_skill_level(num_steps: u32) -> &'static str {
    if num_steps <= 4 {
        "beginner"
    } else if num_steps <= 8 {
        "intermediate"
    } else {
        "advanced"
    }
}
