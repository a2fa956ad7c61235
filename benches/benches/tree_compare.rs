// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use thicket_index::{KdTree, Point, SsTree};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_uniform_points(count: usize, side: f64) -> Vec<Point> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xD1CE_5EED_0F0F_A7A1);
    for _ in 0..count {
        out.push(Point::new(vec![rng.next_f64() * side, rng.next_f64() * side]));
    }
    out
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Point> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0x5EED_FACE_2468_ACE1);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Point::new(vec![cx + dx, cy + dy]));
        }
    }
    out
}

fn gen_query_points(count: usize, side: f64) -> Vec<Point> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xB0BA_FE77_1357_9BDF);
    for _ in 0..count {
        out.push(Point::new(vec![rng.next_f64() * side, rng.next_f64() * side]));
    }
    out
}

fn bench_kd_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("kd_build");
    for &n in &[256usize, 1024, 4096] {
        let points = gen_uniform_points(n, 1000.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("batch_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let tree = KdTree::with_points(2, points).unwrap();
                    black_box(tree.is_empty());
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("incremental_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let mut tree = KdTree::new(2).unwrap();
                    for point in points {
                        tree.insert(point).unwrap();
                    }
                    black_box(tree.is_empty());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_ss_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("ss_build");
    for &n in &[256usize, 1024, 4096] {
        let points = gen_uniform_points(n, 1000.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("insert_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let tree = SsTree::with_points(2, 4, 16, points).unwrap();
                    black_box(tree.is_empty());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_nearest_query_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_query_heavy");
    let points = gen_uniform_points(4096, 1000.0);
    let queries = gen_query_points(256, 1000.0);
    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("kd_batch", |b| {
        b.iter_batched(
            || KdTree::with_points(2, points.clone()).unwrap(),
            |tree| {
                let mut sum = 0.0_f64;
                for query in &queries {
                    if let Some(found) = tree.nearest(query).unwrap() {
                        sum += found.coordinate(0);
                    }
                }
                black_box(sum);
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("ss", |b| {
        b.iter_batched(
            || SsTree::with_points(2, 4, 16, points.clone()).unwrap(),
            |tree| {
                let mut sum = 0.0_f64;
                for query in &queries {
                    if let Some(found) = tree.nearest(query).unwrap() {
                        sum += found.coordinate(0);
                    }
                }
                black_box(sum);
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("ss_approximate_30pct", |b| {
        b.iter_batched(
            || SsTree::with_points(2, 4, 16, points.clone()).unwrap(),
            |tree| {
                let mut sum = 0.0_f64;
                for query in &queries {
                    if let Some(found) = tree.approximate_nearest(query, 0.3).unwrap() {
                        sum += found.coordinate(0);
                    }
                }
                black_box(sum);
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("linear_scan", |b| {
        b.iter(|| {
            let mut sum = 0.0_f64;
            for query in &queries {
                if let Some(found) = query.nearest(&points).unwrap() {
                    sum += found.coordinate(0);
                }
            }
            black_box(sum);
        })
    });
    group.finish();
}

fn bench_query_radius_clustered(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_radius_clustered");
    let points = gen_clustered_points(16, 256, 128.0);
    let queries = gen_query_points(64, 2000.0);
    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("kd", |b| {
        b.iter_batched(
            || KdTree::with_points(2, points.clone()).unwrap(),
            |tree| {
                let mut total = 0usize;
                for query in &queries {
                    total += tree.query_radius(query, 150.0).unwrap().len();
                }
                black_box(total);
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("ss", |b| {
        b.iter_batched(
            || SsTree::with_points(2, 4, 16, points.clone()).unwrap(),
            |tree| {
                let mut total = 0usize;
                for query in &queries {
                    total += tree.query_radius(query, 150.0).unwrap().len();
                }
                black_box(total);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_kd_build,
    bench_ss_build,
    bench_nearest_query_heavy,
    bench_query_radius_clustered,
);
criterion_main!(benches);
