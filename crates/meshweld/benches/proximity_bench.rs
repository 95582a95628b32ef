//! Criterion benchmarks for the proximity backends.
//! Focus sizes: n in {1k, 10k} uniform points, D in {2, 3, 6}.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use meshweld::api::{pairs_from_index, random_cloud, KdTree, UniformGrid};

fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("proximity");
    for &(n, dim) in &[(1_000usize, 2usize), (10_000, 3), (10_000, 6)] {
        let points = random_cloud(n, dim, 1.0, 17);
        // τ chosen so each point has a handful of neighbours on average.
        let tol = 2.0 * (1.0 / n as f64).powf(1.0 / dim as f64);
        let label = format!("n{n}-d{dim}");
        if dim <= 4 {
            group.bench_with_input(BenchmarkId::new("grid", &label), &points, |b, p| {
                b.iter(|| {
                    let idx = UniformGrid::new(p, tol).unwrap();
                    pairs_from_index(&idx)
                })
            });
        }
        group.bench_with_input(BenchmarkId::new("kdtree", &label), &points, |b, p| {
            b.iter(|| {
                let idx = KdTree::new(p, tol).unwrap();
                pairs_from_index(&idx)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_backends);
criterion_main!(benches);
