//! Benchmarks for the placement resolvers.
//!
//! Run with: cargo bench -p perch-layout

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use perch_core::geometry::{Rect, Size};
use perch_layout::{PlacementRequest, Side, resolve, resolve_submenu};
use std::hint::black_box;

const VIEWPORT: Size = Size::new(1280.0, 800.0);

/// Anchors sweeping the viewport so both flip branches are exercised.
fn anchors(n: usize) -> Vec<Rect> {
    (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            Rect::new(t * 1200.0, t * 780.0, 80.0, 18.0)
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/resolve");
    for side in [Side::Below, Side::Above, Side::Right] {
        let requests: Vec<PlacementRequest> = anchors(64)
            .into_iter()
            .map(|a| PlacementRequest::new(a, Size::new(220.0, 320.0)).preferred_side(side))
            .collect();
        group.bench_with_input(BenchmarkId::new("sweep", side), &requests, |b, reqs| {
            b.iter(|| {
                for req in reqs {
                    black_box(resolve(black_box(req), VIEWPORT));
                }
            })
        });
    }
    group.finish();
}

fn bench_resolve_submenu(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/resolve_submenu");
    let requests: Vec<PlacementRequest> = anchors(64)
        .into_iter()
        .map(|a| {
            let parent = Rect::new(a.x, a.y, 200.0, 400.0);
            PlacementRequest::new(a, Size::new(140.0, 200.0)).parent_bounds(parent)
        })
        .collect();
    group.bench_function("sweep", |b| {
        b.iter(|| {
            for req in &requests {
                black_box(resolve_submenu(black_box(req), VIEWPORT));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_resolve_submenu);
criterion_main!(benches);
