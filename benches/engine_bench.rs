// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use bfm_memtest::core::engine::{Engine, MemTest};
use bfm_memtest::core::pattern::PatternStream;
use bfm_memtest::core::transactor::{MemoryModel, Protocol};
use bfm_memtest::core::window::AddressWindow;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn pattern_benchmark(c: &mut Criterion) {
    c.bench_function("pattern_next_u32", |b| {
        let mut stream = PatternStream::new(0x11);
        b.iter(|| black_box(stream.next_u32()));
    });
}

fn strategy_benchmark(c: &mut Criterion) {
    let window = AddressWindow::new(0, 0x1000);
    let tests = [
        MemTest::address_raw(),
        MemTest::address(),
        MemTest::random_raw(4),
        MemTest::random(4),
    ];

    let mut group = c.benchmark_group("strategy");
    for test in &tests {
        group.bench_function(test.label(), |b| {
            let mut model = MemoryModel::new(Protocol::Axi4);
            b.iter(|| {
                let result = Engine::new(&mut model).run(test, window).unwrap();
                black_box(result.mismatches())
            });
        });
    }
    group.finish();
}

fn burst_length_benchmark(c: &mut Criterion) {
    let window = AddressWindow::new(0, 0x4000);

    let mut group = c.benchmark_group("burst_raw");
    for length in [1u32, 8, 64, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |b, &length| {
            let mut model = MemoryModel::new(Protocol::Axi4);
            let test = MemTest::burst_raw(length);
            b.iter(|| {
                let result = Engine::new(&mut model).run(&test, window).unwrap();
                black_box(result.mismatches())
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    pattern_benchmark,
    strategy_benchmark,
    burst_length_benchmark
);
criterion_main!(benches);
