use recipedb_core::filter::{build_recipe_filter, Filter};
use recipedb_core::traits::{Embedder, VectorStore};
use recipedb_core::types::RecipePayload;
use recipedb_embed::HashEmbedder;
use recipedb_vector::search::{render_filter, search_recipes};
use recipedb_vector::table::{count_recipes, ensure_recipes_table, open_db};
use recipedb_vector::{LanceRecipeStore, RecipeIndexer};

fn recipe(title: &str, ingredients: &[&str], num_steps: u32) -> RecipePayload {
    let ingredients: Vec<String> = ingredients.iter().map(|s| (*s).to_string()).collect();
    let tags = recipedb_core::infer::DietaryTags::infer(&ingredients);
    RecipePayload {
        title: title.to_string(),
        description: format!("{title} description"),
        ingredients,
        directions: vec!["step one".to_string(), "step two".to_string()],
        category: "main".to_string(),
        dietary_tags: tags.tags(),
        num_steps,
        skill_level: recipedb_core::infer::infer_skill_level(num_steps).to_string(),
    }
}

fn seed() -> (Vec<i64>, Vec<Vec<f32>>, Vec<RecipePayload>) {
    let embedder = HashEmbedder::default();
    let payloads = vec![
        recipe("Chicken Stir Fry", &["chicken breast", "soy sauce", "rice"], 5),
        recipe("Black Bean Bowl", &["rice", "black beans", "cumin"], 3),
        recipe("Caprese Salad", &["tomato", "mozzarella", "basil"], 2),
    ];
    let vectors: Vec<Vec<f32>> = payloads
        .iter()
        .map(|p| embedder.embed(&p.title).expect("embed"))
        .collect();
    (vec![0, 1, 2], vectors, payloads)
}

#[tokio::test]
async fn upsert_search_filter_and_count() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let conn = open_db(&tmp.path().to_string_lossy()).await?;
    ensure_recipes_table(&conn, "recipes").await?;

    let (ids, vectors, payloads) = seed();
    let indexer = RecipeIndexer::new(conn, "recipes").await?;
    indexer.batch_upsert(&ids, &vectors, &payloads).await?;

    let conn = open_db(&tmp.path().to_string_lossy()).await?;
    assert_eq!(count_recipes(&conn, "recipes").await?, 3);

    // Unfiltered search returns everything, payloads decoded
    let hits = search_recipes(&conn, "recipes", &vectors[1], 10, &Filter::new()).await?;
    assert_eq!(hits.len(), 3);
    for hit in &hits {
        assert!(!hit.payload.ingredients.is_empty(), "ingredients decode to a list");
        assert!((0.0..=1.0).contains(&hit.vector_score));
    }

    // Vegetarian filter excludes the chicken recipe
    let filter = build_recipe_filter(&["vegetarian".to_string()], None);
    let hits = search_recipes(&conn, "recipes", &vectors[1], 10, &filter).await?;
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.payload.title != "Chicken Stir Fry"));

    // Skill bound keeps only short recipes
    let filter = build_recipe_filter(&[], Some("beginner"));
    let hits = search_recipes(&conn, "recipes", &vectors[1], 10, &filter).await?;
    assert!(hits.iter().all(|h| h.payload.num_steps <= 4));

    // Unknown restriction fails closed: nonexistent tag column matches nothing
    let filter = build_recipe_filter(&["keto".to_string()], None);
    let hits = search_recipes(&conn, "recipes", &vectors[1], 10, &filter).await;
    assert!(hits.map_or(true, |h| h.is_empty()), "unknown tag admits no recipes");

    Ok(())
}

#[tokio::test]
async fn upsert_is_update_or_insert_keyed_on_id() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let conn = open_db(&tmp.path().to_string_lossy()).await?;
    let (ids, vectors, mut payloads) = seed();
    let indexer = RecipeIndexer::new(conn, "recipes").await?;
    indexer.batch_upsert(&ids, &vectors, &payloads).await?;

    payloads[0].title = "Chicken Stir Fry v2".to_string();
    indexer.upsert(ids[0], &vectors[0], &payloads[0]).await?;

    let conn = open_db(&tmp.path().to_string_lossy()).await?;
    assert_eq!(count_recipes(&conn, "recipes").await?, 3, "update, not duplicate");
    let hits = search_recipes(&conn, "recipes", &vectors[0], 10, &Filter::new()).await?;
    assert!(hits.iter().any(|h| h.payload.title == "Chicken Stir Fry v2"));
    Ok(())
}

#[tokio::test]
async fn wrong_dimension_is_rejected_loudly() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let conn = open_db(&tmp.path().to_string_lossy()).await?;
    let indexer = RecipeIndexer::new(conn, "recipes").await?;

    let short = vec![0.5f32; 16];
    let err = indexer
        .batch_upsert(&[0], &[short.clone()], &[recipe("Bad", &["x"], 1)])
        .await
        .expect_err("dim mismatch at write");
    assert!(err.to_string().contains("dim mismatch"));

    let conn = open_db(&tmp.path().to_string_lossy()).await?;
    let err = search_recipes(&conn, "recipes", &short, 10, &Filter::new())
        .await
        .expect_err("dim mismatch at search");
    assert!(err.to_string().contains("dim mismatch"));
    Ok(())
}

#[test]
fn filter_renders_to_quoted_sql() {
    let f = build_recipe_filter(
        &["vegetarian".to_string(), "gluten-free".to_string()],
        Some("intermediate"),
    );
    assert_eq!(
        render_filter(&f).expect("non-empty"),
        r#""tag_vegetarian" = true AND "tag_gluten-free" = true AND "num_steps" <= 8"#
    );
    assert!(render_filter(&Filter::new()).is_none());
}

#[test]
fn blocking_adapter_round_trip() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = LanceRecipeStore::new(tmp.path().to_string_lossy(), "recipes");

    let (ids, vectors, payloads) = seed();
    store.batch_upsert(&ids, &vectors, &payloads).expect("batch upsert");
    assert_eq!(store.count().expect("count"), 3);

    let hits = store.search(&vectors[2], 10, &Filter::new()).expect("search");
    assert_eq!(hits.len(), 3);
}
