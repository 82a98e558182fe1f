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

//! Exhaustive branching.
//!
//! Offers every bin to the next item, in ascending order of current sum,
//! without any symmetry breaking. Mostly useful as a reference to check the
//! pruning of the other builders against.

use crate::{
    branching::decision::{Decision, DecisionBuilder, PreferenceOrderIter},
    state::SearchState,
};
use partix_core::num::SolverNumeric;
use partix_model::{bins::BinStore, index::BinIndex, instance::Instance};

#[derive(Debug, Clone, Default)]
pub struct ExhaustiveBuilder {
    order: Vec<BinIndex>,
    candidates: Vec<Decision>,
}

impl ExhaustiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preallocated(num_bins: usize) -> Self {
        Self {
            order: Vec::with_capacity(num_bins),
            candidates: Vec::with_capacity(num_bins),
        }
    }
}

impl<T, B> DecisionBuilder<T, B> for ExhaustiveBuilder
where
    T: SolverNumeric,
    B: BinStore<T>,
{
    type DecisionIterator<'a>
        = PreferenceOrderIter<'a>
    where
        Self: 'a,
        T: 'a,
        B: 'a;

    fn name(&self) -> &str {
        "ExhaustiveBuilder"
    }

    fn next_decision<'a>(
        &'a mut self,
        instance: &'a Instance<T>,
        state: &'a SearchState<T, B>,
        _symmetric: bool,
    ) -> Self::DecisionIterator<'a> {
        self.candidates.clear();
        if state.depth() >= instance.num_items() {
            return PreferenceOrderIter::new(&self.candidates);
        }

        let item = instance.item_at_depth(state.depth());
        let sums = state.sums();

        self.order.clear();
        self.order.extend(BinIndex::range(sums.len()));
        self.order.sort_by_key(|bin| sums[bin.get()]);
        self.candidates
            .extend(self.order.iter().map(|&bin| Decision::new(item, bin)));

        PreferenceOrderIter::new(&self.candidates)
    }
}
