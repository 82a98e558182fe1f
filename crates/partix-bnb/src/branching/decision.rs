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

use crate::state::SearchState;
use partix_core::num::SolverNumeric;
use partix_model::{
    bins::BinStore,
    index::{BinIndex, ItemIndex},
    instance::Instance,
};
use std::iter::FusedIterator;

/// A decision to place an item into a bin.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Decision {
    item: ItemIndex,
    bin: BinIndex,
}

impl Decision {
    #[inline(always)]
    pub const fn new(item: ItemIndex, bin: BinIndex) -> Self {
        Self { item, bin }
    }

    #[inline(always)]
    pub const fn item(&self) -> ItemIndex {
        self.item
    }

    #[inline(always)]
    pub const fn bin(&self) -> BinIndex {
        self.bin
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Decision(item: {}, bin: {})", self.item, self.bin)
    }
}

/// Generates the children of a search node.
///
/// The node at depth `d` places `instance.item_at_depth(d)`. The search pushes
/// the yielded decisions onto a LIFO stack, so the decision yielded last is
/// explored first.
pub trait DecisionBuilder<T, B>
where
    T: SolverNumeric,
    B: BinStore<T>,
{
    type DecisionIterator<'a>: Iterator<Item = Decision> + FusedIterator + 'a
    where
        Self: 'a,
        T: 'a,
        B: 'a;

    fn name(&self) -> &str;

    /// Returns the decisions for the next item of `state`.
    ///
    /// `symmetric` is `false` when bins are not interchangeable under the
    /// objective; builders must then not treat equal-sum bins as equivalent.
    fn next_decision<'a>(
        &'a mut self,
        instance: &'a Instance<T>,
        state: &'a SearchState<T, B>,
        symmetric: bool,
    ) -> Self::DecisionIterator<'a>;
}

/// Yields a preference-ordered candidate list back to front, so that the
/// most preferred decision ends up on top of the search stack.
#[derive(Debug, Clone)]
pub struct PreferenceOrderIter<'a> {
    iter: std::iter::Rev<std::slice::Iter<'a, Decision>>,
}

impl<'a> PreferenceOrderIter<'a> {
    #[inline]
    pub(crate) fn new(candidates: &'a [Decision]) -> Self {
        Self {
            iter: candidates.iter().rev(),
        }
    }
}

impl<'a> Iterator for PreferenceOrderIter<'a> {
    type Item = Decision;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().copied()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a> ExactSizeIterator for PreferenceOrderIter<'a> {}
impl<'a> FusedIterator for PreferenceOrderIter<'a> {}
