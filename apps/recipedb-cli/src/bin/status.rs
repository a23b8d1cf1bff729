//! Report the recipe collection's location and vector count.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use recipedb_core::config::{expand_path, Settings, EMBEDDING_DIM};
use recipedb_vector::table::{count_recipes, open_db};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let settings = Settings::load()?;
    let db_uri = expand_path(&settings.store.db_uri);

    let conn = open_db(&db_uri.to_string_lossy()).await?;
    let count = count_recipes(&conn, &settings.store.table).await?;

    println!("Database:   {}", db_uri.display());
    println!("Collection: {}", settings.store.table);
    println!("Dimension:  {EMBEDDING_DIM}");
    println!("Vectors:    {count}");
    Ok(())
}
