// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use thicket_index::{KdTree, Point, SsTree};

use rstar::RTree;

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

fn gen_uniform_pairs(count: usize, side: f64, seed: u64) -> Vec<[f64; 2]> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(seed);
    for _ in 0..count {
        out.push([rng.next_f64() * side, rng.next_f64() * side]);
    }
    out
}

fn to_points(pairs: &[[f64; 2]]) -> Vec<Point> {
    pairs.iter().map(|pair| Point::from(&pair[..])).collect()
}

fn bench_nearest_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_external_compare");
    for &n in &[1024usize, 4096] {
        let pairs = gen_uniform_pairs(n, 1000.0, 0xFEED_BEA7_0DD5_0D07);
        let query_pairs = gen_uniform_pairs(256, 1000.0, 0xA11C_E57A_7E11_17E5);
        let query_points = to_points(&query_pairs);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("thicket_kd_build_query_n{}", n), |b| {
            b.iter_batched(
                || to_points(&pairs),
                |points| {
                    let tree = KdTree::with_points(2, points).unwrap();
                    let mut sum = 0.0_f64;
                    for query in &query_points {
                        if let Some(found) = tree.nearest(query).unwrap() {
                            sum += found.coordinate(0);
                        }
                    }
                    black_box(sum);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("thicket_ss_build_query_n{}", n), |b| {
            b.iter_batched(
                || to_points(&pairs),
                |points| {
                    let tree = SsTree::with_points(2, 4, 16, points).unwrap();
                    let mut sum = 0.0_f64;
                    for query in &query_points {
                        if let Some(found) = tree.nearest(query).unwrap() {
                            sum += found.coordinate(0);
                        }
                    }
                    black_box(sum);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_n{}", n), |b| {
            b.iter_batched(
                || pairs.clone(),
                |entries| {
                    let tree = RTree::bulk_load(entries);
                    let mut sum = 0.0_f64;
                    for query in &query_pairs {
                        if let Some(found) = tree.nearest_neighbor(query) {
                            sum += found[0];
                        }
                    }
                    black_box(sum);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_radius_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("radius_external_compare");
    let pairs = gen_uniform_pairs(4096, 1000.0, 0xC0FF_EE00_5A1A_D000);
    let query_pairs = gen_uniform_pairs(64, 1000.0, 0xDEAF_BEEF_0123_4567);
    let query_points = to_points(&query_pairs);
    let radius = 40.0;
    group.throughput(Throughput::Elements(query_pairs.len() as u64));

    group.bench_function("thicket_kd_build_radius", |b| {
        b.iter_batched(
            || to_points(&pairs),
            |points| {
                let tree = KdTree::with_points(2, points).unwrap();
                let mut total = 0usize;
                for query in &query_points {
                    total += tree.query_radius(query, radius).unwrap().len();
                }
                black_box(total);
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("rstar_build_radius", |b| {
        b.iter_batched(
            || pairs.clone(),
            |entries| {
                let tree = RTree::bulk_load(entries);
                let mut total = 0usize;
                for query in &query_pairs {
                    // rstar takes the squared radius.
                    total += tree.locate_within_distance(*query, radius * radius).count();
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
    bench_nearest_external_compare,
    bench_radius_external_compare,
);
criterion_main!(benches);
