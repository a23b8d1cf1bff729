use arrow_schema::{DataType, Field, Schema};
use recipedb_core::infer::KNOWN_TAGS;
use std::sync::Arc;

pub const EMBEDDING_DIM: i32 = recipedb_core::config::EMBEDDING_DIM as i32;

/// Arrow schema for the recipes table. List-valued payload fields
/// (`ingredients`, `directions`, `dietary_tags`) are stored as JSON-encoded
/// strings; one boolean `tag_<name>` column per known dietary tag backs the
/// filter builder.
pub fn build_recipes_schema() -> Arc<Schema> {
    let mut fields = vec![
        Field::new("id", DataType::Int64, false),
        Field::new("title", DataType::Utf8, false),
        Field::new("description", DataType::Utf8, false),
        Field::new("category", DataType::Utf8, false),
        Field::new("ingredients", DataType::Utf8, false),
        Field::new("directions", DataType::Utf8, false),
        Field::new("dietary_tags", DataType::Utf8, false),
        Field::new("num_steps", DataType::Int32, false),
        Field::new("skill_level", DataType::Utf8, false),
    ];
    for tag in KNOWN_TAGS {
        fields.push(Field::new(format!("tag_{tag}"), DataType::Boolean, false));
    }
    fields.push(Field::new(
        "vector",
        DataType::FixedSizeList(Arc::new(Field::new("item", DataType::Float32, true)), EMBEDDING_DIM),
        true,
    ));
    Arc::new(Schema::new(fields))
}
