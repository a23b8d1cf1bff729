//! Structured filter predicates over recipe payload attributes.
//!
//! A filter is a conjunction ("must" list) of field constraints evaluated by
//! the vector store; the empty filter matches everything. Unknown dietary
//! restriction tokens become constraints on nonexistent `tag_*` columns and
//! therefore match nothing: the builder fails closed rather than silently
//! ignoring a restriction it does not understand.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// `field = value`
    Eq(String, Value),
    /// `field <= value`
    Lte(String, i64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub must: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.must.is_empty()
    }

    pub fn must(mut self, cond: Condition) -> Self {
        self.must.push(cond);
        self
    }
}

/// Cap on `num_steps` implied by a skill level; unknown strings get no
/// effective bound.
fn max_steps_for(skill_level: &str) -> i64 {
    match skill_level.to_lowercase().as_str() {
        "beginner" => 4,
        "intermediate" => 8,
        _ => 999,
    }
}

/// Build the payload filter from user preferences.
///
/// Each dietary restriction requires its `tag_<normalized>` column to be
/// true; restrictions are ANDed, so "vegetarian" + "gluten-free" only admits
/// recipes satisfying both. A skill level bounds `num_steps` from above.
pub fn build_recipe_filter(dietary_restrictions: &[String], skill_level: Option<&str>) -> Filter {
    let mut f = Filter::new();

    for tag in dietary_restrictions {
        let normalized = tag.to_lowercase().trim().to_string();
        if normalized.is_empty() {
            continue;
        }
        f = f.must(Condition::Eq(format!("tag_{normalized}"), Value::Bool(true)));
    }

    if let Some(level) = skill_level {
        f = f.must(Condition::Lte("num_steps".to_string(), max_steps_for(level)));
    }

    f
}
