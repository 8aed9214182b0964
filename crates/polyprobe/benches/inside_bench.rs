//! Criterion benchmarks for polygon containment.
//! Focus sizes: columns in {4, 16, 64, 256}.
//! Results: by default under target/criterion; to store elsewhere, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p polyprobe

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector2;
use polyprobe::sampling::{draw_histogram, HistogramCfg, ReplayToken};
use polyprobe::PolygonCfg;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_queries(n: usize, width: f64, height: f64, seed: u64) -> Vec<Vector2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Vector2::new(
                rng.gen_range(-1.0..width + 1.0),
                rng.gen_range(-1.0..height + 1.0),
            )
        })
        .collect()
}

fn bench_inside(c: &mut Criterion) {
    let mut group = c.benchmark_group("inside");
    for &columns in &[4usize, 16, 64, 256] {
        let cfg = HistogramCfg {
            columns,
            ..HistogramCfg::default()
        };
        let hist = draw_histogram(cfg, ReplayToken { seed: 43, index: 0 });
        let queries = random_queries(256, hist.width(), hist.max_height(), 44);

        group.bench_with_input(BenchmarkId::new("lazy_insert", columns), &columns, |b, _| {
            b.iter_batched(
                || hist.polygon(PolygonCfg::default()).unwrap(),
                |mut poly| {
                    for q in &queries {
                        let _ = poly.inside(*q);
                    }
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(
            BenchmarkId::new("preregistered", columns),
            &columns,
            |b, _| {
                b.iter_batched(
                    || {
                        let mut poly = hist.polygon(PolygonCfg::default()).unwrap();
                        poly.add_coords(&queries);
                        poly
                    },
                    |poly| {
                        for q in &queries {
                            let _ = poly.contains_registered(*q);
                        }
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_inside);
criterion_main!(benches);
