// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::time::Duration;
use vt_core_buffer::cell::CellAttrs;
use vt_core_buffer::grid::Grid;

fn configure() -> Criterion {
    Criterion::default()
        .sample_size(10)
        .warm_up_time(Duration::from_millis(300))
        .measurement_time(Duration::from_secs(1))
}

fn bench_scroll_up(c: &mut Criterion) {
    let template = CellAttrs::default();
    let mut group = c.benchmark_group("grid_scroll_up");
    group.throughput(Throughput::Elements(1000));

    group.bench_function(BenchmarkId::new("scroll_up_with_scrollback", 1000), |b| {
        b.iter(|| {
            let mut grid = Grid::new(40, 120, 1000);
            for _ in 0..1000 {
                grid.scroll_up(0, 1, &template);
            }
        });
    });

    group.finish();
}

fn bench_clear_region(c: &mut Criterion) {
    let template = CellAttrs::default();
    let mut group = c.benchmark_group("grid_clear_region");

    group.bench_function(BenchmarkId::new("clear_full_screen", 1), |b| {
        let mut grid = Grid::new(40, 120, 1000);
        b.iter(|| grid.clear_region(0, 0, 119, 39, &template));
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = configure();
    targets = bench_scroll_up, bench_clear_region
}
criterion_main!(benches);
