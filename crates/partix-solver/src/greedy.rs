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

//! Largest-processing-time-first construction.
//!
//! Items are taken in descending order of value and each goes into the bin
//! with the smallest current sum, the lowest index winning ties. The result
//! is a feasible partition in a single pass and serves as the answer of the
//! `Greedy` strategy and as the fallback when a search is stopped before it
//! found anything.

use partix_core::num::SolverNumeric;
use partix_model::{
    bins::BinStore, index::BinIndex, instance::Instance, objective::Objective,
    partition::Partition,
};

/// Builds the greedy partition of `instance` into `num_bins` bins.
///
/// # Panics
///
/// Panics if `num_bins` is zero, or if the objective's keys for `instance`
/// do not fit `T`.
pub fn greedy_partition<T, B, O>(instance: &Instance<T>, num_bins: usize, objective: &O) -> Partition<T>
where
    T: SolverNumeric,
    B: BinStore<T>,
    O: Objective<T> + ?Sized,
{
    if let Err(err) = objective.check_range(num_bins, instance.total_value()) {
        panic!(
            "called `greedy_partition` with objective `{}` out of range: {}",
            objective.name(),
            err
        );
    }
    let mut bins = B::new(num_bins);

    for depth in 0..instance.num_items() {
        let item = instance.item_at_depth(depth);
        let target = bins
            .sums()
            .iter()
            .enumerate()
            .min_by_key(|&(_, &sum)| sum)
            .map_or(0, |(b, _)| b);
        bins.add_item(BinIndex::new(target), item, instance.value(item));
    }

    let key = objective.value_to_minimize(bins.sums(), false);
    if objective.is_symmetric() {
        bins.into_partition(key)
    } else {
        bins.into_positional_partition(key)
    }
}
