// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use weft_diagram::{Buttons, Button, Canvas, Diagram, InputEvent};
use weft_index::{IRect, IVec2};

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
    fn below(&mut self, n: i64) -> i64 {
        (self.next_u64() % n as u64) as i64
    }
}

/// A square canvas of `side` units tiled with nodes.
fn filled(side: i64) -> Diagram {
    let mut d = Diagram::new(Canvas::new(side, side));
    d.fill_canvas();
    d
}

fn gen_queries(count: usize, side: i64) -> Vec<IVec2> {
    let mut rng = Rng::new(0x5EED_0F_D1A6_4A11);
    (0..count)
        .map(|_| IVec2::new(rng.below(side), rng.below(side)))
        .collect()
}

fn bench_validity(c: &mut Criterion) {
    let mut group = c.benchmark_group("validity_check");
    for &side in &[600_i64, 1_200, 2_400] {
        let d = filled(side);
        let queries: Vec<IRect> = gen_queries(256, side)
            .into_iter()
            .filter_map(|p| d.node_rect_centered(p))
            .collect();
        group.throughput(Throughput::Elements(queries.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("BucketGrid", d.node_count()),
            &queries,
            |b, queries| {
                b.iter(|| {
                    queries
                        .iter()
                        .filter(|r| d.is_valid_position(black_box(r), None))
                        .count()
                });
            },
        );

        let rects: Vec<IRect> = d.nodes().map(|(_, n)| n.rect()).collect();
        group.bench_with_input(
            BenchmarkId::new("LinearScan", d.node_count()),
            &queries,
            |b, queries| {
                b.iter(|| {
                    queries
                        .iter()
                        .filter(|r| !rects.iter().any(|o| o.overlaps(black_box(r))))
                        .count()
                });
            },
        );
    }
    group.finish();
}

fn bench_drag_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_session");
    for &side in &[600_i64, 2_400] {
        let base = filled(side);
        let start = base
            .nodes()
            .next()
            .map(|(_, n)| n.center())
            .unwrap_or(IVec2::ZERO);
        let mut rng = Rng::new(0xD4A6_5E55_1011_0000);
        let path: Vec<InputEvent> = (0..512)
            .map(|_| InputEvent::moved(Buttons::LEFT, (rng.below(side), rng.below(side))))
            .collect();
        group.throughput(Throughput::Elements(path.len() as u64));
        group.bench_function(BenchmarkId::from_parameter(base.node_count()), |b| {
            b.iter_batched(
                || filled(side),
                |mut d| {
                    d.process_input(&InputEvent::down(Button::Left, start));
                    for event in &path {
                        d.process_input(event);
                    }
                    d.process_input(&InputEvent::up(Button::Left, start));
                    d
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_validity, bench_drag_session);
criterion_main!(benches);
