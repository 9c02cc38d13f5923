use super::*;

#[test]
fn normalized_vectors_have_unit_norm() {
    let inputs = [
        vec![3.0, 4.0],
        vec![1.0, 1.0, 1.0, 1.0],
        vec![-0.5, 0.25, 10.0],
        vec![1e-3, 2e-3, -4e-3],
    ];

    for input in inputs {
        let normalized = normalize(input).expect("non-zero vector should normalize");
        assert!((l2_norm(&normalized) - 1.0).abs() < 1e-5);
    }
}

#[test]
fn normalize_preserves_direction() {
    let normalized = normalize(vec![3.0, 4.0]).expect("should normalize");
    assert!((normalized[0] - 0.6).abs() < 1e-6);
    assert!((normalized[1] - 0.8).abs() < 1e-6);
}

#[test]
fn normalize_rejects_degenerate_vectors() {
    assert!(normalize(Vec::new()).is_none());
    assert!(normalize(vec![0.0, 0.0, 0.0]).is_none());
    assert!(normalize(vec![f32::NAN, 1.0]).is_none());
    assert!(normalize(vec![f32::INFINITY, 1.0]).is_none());
}

#[test]
fn dot_of_unit_vectors_is_cosine() {
    let a = normalize(vec![1.0, 0.0]).expect("should normalize");
    let b = normalize(vec![1.0, 1.0]).expect("should normalize");
    assert!((dot(&a, &b) - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
    assert!((dot(&a, &a) - 1.0).abs() < 1e-6);
}

#[test]
fn default_batch_embeds_each_text() {
    struct LengthEmbedder;

    impl Embedder for LengthEmbedder {
        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            Ok(vec![text.len() as f32, 1.0])
        }
    }

    let texts = vec!["a".to_string(), "abc".to_string()];
    let vectors = LengthEmbedder
        .embed_batch(&texts)
        .expect("batch embedding should succeed");
    assert_eq!(vectors, vec![vec![1.0, 1.0], vec![3.0, 1.0]]);
    assert_eq!(LengthEmbedder.batch_size(), 32);
}
