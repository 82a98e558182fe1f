// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use partix_bnb::{
    bnb::BnbSolver, branching::greedy::CompleteGreedyBuilder,
    monitor::no_op::NoOperationMonitor,
};
use partix_model::{
    bins::{ContentBins, SumBins},
    instance::Instance,
    objective::{MinimizeDifference, MinimizeLargestSum},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::hint::black_box;

fn random_instance(num_items: usize, seed: u64) -> Instance<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let values = (0..num_items)
        .map(|_| rng.random_range(1..1_000_000))
        .collect();
    Instance::new(values).expect("random values are non-negative")
}

fn bench_makespan(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb_minimize_largest_sum");
    for &(num_items, num_bins) in &[(16usize, 3usize), (20, 4), (24, 5)] {
        let instance = random_instance(num_items, 42);
        group.throughput(Throughput::Elements(num_items as u64));
        group.bench_with_input(
            BenchmarkId::new("sums", format!("{}x{}", num_items, num_bins)),
            &instance,
            |b, instance| {
                let mut solver = BnbSolver::<i64, SumBins<i64>>::preallocated(num_bins, num_items);
                let mut builder = CompleteGreedyBuilder::preallocated(num_bins);
                b.iter(|| {
                    let outcome = solver.solve(
                        black_box(instance),
                        num_bins,
                        &MinimizeLargestSum,
                        &mut builder,
                        NoOperationMonitor::new(),
                    );
                    black_box(outcome.into_partition())
                })
            },
        );
    }
    group.finish();
}

fn bench_difference_contents(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb_minimize_difference");
    for &num_items in &[12usize, 16] {
        let instance = random_instance(num_items, 7);
        group.bench_with_input(
            BenchmarkId::new("contents", num_items),
            &instance,
            |b, instance| {
                let mut solver = BnbSolver::<i64, ContentBins<i64>>::preallocated(3, num_items);
                let mut builder = CompleteGreedyBuilder::preallocated(3);
                b.iter(|| {
                    let outcome = solver.solve(
                        black_box(instance),
                        3,
                        &MinimizeDifference,
                        &mut builder,
                        NoOperationMonitor::new(),
                    );
                    black_box(outcome.into_partition())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_makespan, bench_difference_contents);
criterion_main!(benches);
