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

//! Complete greedy branching.
//!
//! The next item goes into the bins in order of ascending current sum, so
//! the first leaf reached is the greedy (LPT) partition and later leaves
//! improve on it. Under a symmetric objective two bins with the same sum
//! root isomorphic subtrees; only the first of them is branched on.

use crate::{
    branching::decision::{Decision, DecisionBuilder, PreferenceOrderIter},
    state::SearchState,
};
use partix_core::num::SolverNumeric;
use partix_model::{bins::BinStore, index::BinIndex, instance::Instance};

#[derive(Debug, Clone, Default)]
pub struct CompleteGreedyBuilder {
    order: Vec<BinIndex>,
    candidates: Vec<Decision>,
}

impl CompleteGreedyBuilder {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            candidates: Vec::new(),
        }
    }

    pub fn preallocated(num_bins: usize) -> Self {
        Self {
            order: Vec::with_capacity(num_bins),
            candidates: Vec::with_capacity(num_bins),
        }
    }
}

impl<T, B> DecisionBuilder<T, B> for CompleteGreedyBuilder
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
        "CompleteGreedyBuilder"
    }

    fn next_decision<'a>(
        &'a mut self,
        instance: &'a Instance<T>,
        state: &'a SearchState<T, B>,
        symmetric: bool,
    ) -> Self::DecisionIterator<'a> {
        self.candidates.clear();
        if state.depth() >= instance.num_items() {
            return PreferenceOrderIter::new(&self.candidates);
        }

        let item = instance.item_at_depth(state.depth());
        let sums = state.sums();

        self.order.clear();
        self.order.extend(BinIndex::range(sums.len()));
        // Stable, so equal sums keep bin order.
        self.order.sort_by_key(|bin| sums[bin.get()]);

        let mut previous: Option<T> = None;
        for &bin in &self.order {
            let sum = sums[bin.get()];
            if symmetric && previous == Some(sum) {
                continue;
            }
            previous = Some(sum);
            self.candidates.push(Decision::new(item, bin));
        }

        PreferenceOrderIter::new(&self.candidates)
    }
}
