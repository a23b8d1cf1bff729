use recipedb_core::traits::Embedder;
use recipedb_embed::get_default_embedder;

#[test]
fn hash_embedder_shape_norm_and_determinism() {
    let embedder = get_default_embedder().expect("embedder");
    let texts = vec!["tomato basil pasta".to_string(), "tomato basil pasta".to_string()];
    let embs = embedder.embed_batch(&texts).expect("embed_batch");
    let v1 = &embs[0];
    let v2 = &embs[1];

    assert_eq!(v1.len(), 768, "embedding dim is 768");

    // Norm approximately 1.0
    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    // Deterministic for same input
    for (a, b) in v1.iter().zip(v2.iter()) {
        assert!((a - b).abs() <= 1e-6);
    }
}

#[test]
fn different_texts_produce_different_vectors() {
    let embedder = get_default_embedder().expect("embedder");
    let a = embedder.embed("chicken curry").expect("embed");
    let b = embedder.embed("chocolate cake").expect("embed");
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    assert!(dot < 0.999, "distinct inputs are not identical (dot={dot})");
}
