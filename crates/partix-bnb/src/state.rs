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

//! The mutable node of the branch-and-bound search.
//!
//! A `SearchState` holds the bins filled so far and the depth, i.e. the
//! number of items of the largest-first order already placed. It is only
//! mutated through `SearchTrail`, which records every change so that a
//! backtrack restores the exact parent state.

use partix_core::num::SolverNumeric;
use partix_model::{
    bins::BinStore,
    index::{BinIndex, ItemIndex},
};

#[derive(Debug, Clone)]
pub struct SearchState<T, B> {
    bins: B,
    depth: usize,
    _phantom: std::marker::PhantomData<T>,
}

impl<T, B> SearchState<T, B>
where
    T: SolverNumeric,
    B: BinStore<T>,
{
    /// Creates the root state with `num_bins` empty bins.
    #[inline]
    pub fn new(num_bins: usize) -> Self {
        Self {
            bins: B::new(num_bins),
            depth: 0,
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn bins(&self) -> &B {
        &self.bins
    }

    #[inline]
    pub fn sums(&self) -> &[T] {
        self.bins.sums()
    }

    #[inline]
    pub fn num_bins(&self) -> usize {
        self.bins.num_bins()
    }

    /// Returns the number of items placed so far.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns a borrowed view for monitors.
    #[inline]
    pub fn view(&self) -> StateView<'_, T> {
        StateView {
            sums: self.bins.sums(),
            depth: self.depth,
        }
    }

    #[inline]
    pub(crate) fn place(&mut self, bin: BinIndex, item: ItemIndex, value: T) {
        self.bins.add_item(bin, item, value);
        self.depth += 1;
    }

    #[inline]
    pub(crate) fn unplace(&mut self, bin: BinIndex, item: ItemIndex, value: T) {
        debug_assert!(
            self.depth > 0,
            "called `SearchState::unplace` on the root state"
        );
        self.bins.remove_last_item(bin, item, value);
        self.depth -= 1;
    }
}

impl<T, B> std::fmt::Display for SearchState<T, B>
where
    T: SolverNumeric,
    B: BinStore<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchState(depth: {}, sums: {:?})", self.depth, self.sums())
    }
}

/// A read-only snapshot of a search node.
///
/// Monitors observe nodes through this view so that they do not depend on
/// the bin representation the search runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateView<'a, T> {
    /// Bin sums in bin order, not necessarily sorted.
    pub sums: &'a [T],
    /// Number of items placed.
    pub depth: usize,
}

impl<'a, T> StateView<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn largest_sum(&self) -> T {
        self.sums.iter().copied().max().unwrap_or(T::ZERO)
    }

    #[inline]
    pub fn smallest_sum(&self) -> T {
        self.sums.iter().copied().min().unwrap_or(T::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partix_model::bins::{ContentBins, SumBins};

    #[test]
    fn test_place_and_unplace_restore_state() {
        let mut state = SearchState::<i64, ContentBins<i64>>::new(2);
        state.place(BinIndex::new(1), ItemIndex::new(0), 7);
        state.place(BinIndex::new(1), ItemIndex::new(1), 3);
        assert_eq!(state.depth(), 2);
        assert_eq!(state.sums(), &[0, 10]);
        assert_eq!(
            state.bins().contents(BinIndex::new(1)),
            Some(&[ItemIndex::new(0), ItemIndex::new(1)][..])
        );

        state.unplace(BinIndex::new(1), ItemIndex::new(1), 3);
        assert_eq!(state.depth(), 1);
        assert_eq!(state.sums(), &[0, 7]);
    }

    #[test]
    fn test_view_reports_extremes() {
        let mut state = SearchState::<i32, SumBins<i32>>::new(3);
        state.place(BinIndex::new(0), ItemIndex::new(0), 5);
        state.place(BinIndex::new(2), ItemIndex::new(1), 2);
        let view = state.view();
        assert_eq!(view.depth, 2);
        assert_eq!(view.largest_sum(), 5);
        assert_eq!(view.smallest_sum(), 0);
        assert!(state.to_string().contains("depth: 2"));
    }
}
