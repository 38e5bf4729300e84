// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::time::Duration;
use vt_core_common::config::Config;
use vt_core_emulator::emulator::Emulator;

fn configure() -> Criterion {
    Criterion::default()
        .sample_size(10)
        .warm_up_time(Duration::from_millis(300))
        .measurement_time(Duration::from_secs(1))
}

/// A representative stream: plain text, cursor movement, SGR, and a
/// full-screen scroll, repeated.
fn synthetic_stream(repeats: usize) -> Vec<u8> {
    let chunk = b"the quick brown fox jumps over the lazy dog\r\n\x1b[31;1mred bold\x1b[0m\x1b[5;5H\x1b[2J";
    chunk.repeat(repeats)
}

fn bench_feed(c: &mut Criterion) {
    let mut group = c.benchmark_group("emulator_feed");
    for repeats in [10usize, 100, 1000] {
        let stream = synthetic_stream(repeats);
        group.throughput(Throughput::Bytes(stream.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &stream, |b, stream| {
            b.iter(|| {
                let mut emulator = Emulator::new(Config::default());
                emulator.feed(stream);
            });
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = configure();
    targets = bench_feed
}
criterion_main!(benches);
