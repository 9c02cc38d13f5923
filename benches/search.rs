use criterion::{Criterion, criterion_group, criterion_main};
use health_rag::embeddings::normalize;
use health_rag::index::FlatIndex;
use std::hint::black_box;

const DIMENSION: usize = 768;
const VECTORS: usize = 10_000;

/// Deterministic pseudo-random unit vector
fn unit_vector(seed: usize) -> Vec<f32> {
    let mut state = (seed as u64).wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
    let raw: Vec<f32> = (0..DIMENSION)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((state >> 33) as f32 / (1u64 << 31) as f32) - 0.5
        })
        .collect();
    normalize(raw).expect("random vector is non-zero")
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut index = FlatIndex::new(DIMENSION);
    for i in 0..VECTORS {
        index.add(&unit_vector(i)).expect("dimension matches");
    }
    let query = unit_vector(VECTORS + 1);

    c.bench_function("flat_search_top5", |b| {
        b.iter(|| index.search(black_box(&query), black_box(5)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
