//! LanceDB connection and housekeeping helpers for the recipes collection.

use anyhow::Result;
use arrow_array::RecordBatchIterator;
use lancedb::{connect, Connection};

use crate::schema::build_recipes_schema;

pub async fn open_db(uri: &str) -> Result<Connection> {
    Ok(connect(uri).execute().await?)
}

/// Create the recipes table with an empty batch if it doesn't exist yet.
pub async fn ensure_recipes_table(conn: &Connection, name: &str) -> Result<()> {
    let names = conn.table_names().execute().await?;
    if names.contains(&name.to_string()) {
        return Ok(());
    }
    let schema = build_recipes_schema();
    let iter = RecordBatchIterator::new(vec![].into_iter(), schema);
    conn.create_table(name, Box::new(iter)).execute().await?;
    Ok(())
}

/// Number of vectors in the recipes table; 0 when the table doesn't exist.
pub async fn count_recipes(conn: &Connection, name: &str) -> Result<usize> {
    let names = conn.table_names().execute().await?;
    if !names.contains(&name.to_string()) {
        return Ok(0);
    }
    let table = conn.open_table(name).execute().await?;
    Ok(table.count_rows(None).await?)
}
