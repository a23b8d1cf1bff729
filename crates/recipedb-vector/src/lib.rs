#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod schema;
pub mod search;
pub mod store;
pub mod table;
pub mod writer;

pub use store::LanceRecipeStore;
pub use writer::RecipeIndexer;
