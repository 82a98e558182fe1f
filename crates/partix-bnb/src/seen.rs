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

//! Duplicate-node detection.
//!
//! Items are placed in a fixed order, so two nodes at the same depth with
//! the same (canonicalised) bin sums root identical subtrees. The first
//! visit explores or prunes that subtree; every later visit can be skipped.

use partix_core::num::SolverNumeric;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Fingerprint of a node: its depth and its bin sums.
pub type StateKey<T> = (usize, SmallVec<[T; 8]>);

/// The default bound on remembered fingerprints.
pub const DEFAULT_MAX_SEEN_STATES: usize = 1 << 20;

#[derive(Debug, Clone)]
pub struct SeenStates<T> {
    keys: FxHashSet<StateKey<T>>,
    max_entries: usize,
}

impl<T> Default for SeenStates<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::with_limit(DEFAULT_MAX_SEEN_STATES)
    }
}

impl<T> SeenStates<T>
where
    T: SolverNumeric,
{
    /// Creates an empty set that stops remembering after `max_entries`
    /// fingerprints. Forgetting is safe; it only costs duplicate work.
    #[inline]
    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            keys: FxHashSet::default(),
            max_entries,
        }
    }

    /// Records the node and returns `true` if it was seen before.
    #[inline]
    pub fn check_and_insert(&mut self, depth: usize, sums: &[T]) -> bool {
        let key: StateKey<T> = (depth, SmallVec::from_slice(sums));
        if self.keys.contains(&key) {
            return true;
        }
        if self.keys.len() < self.max_entries {
            self.keys.insert(key);
        }
        false
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    #[inline]
    pub fn set_max_entries(&mut self, max_entries: usize) {
        self.max_entries = max_entries;
    }

    /// Forgets every fingerprint but keeps the allocation.
    #[inline]
    pub fn reset(&mut self) {
        self.keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_visit_is_reported() {
        let mut seen = SeenStates::<i64>::default();
        assert!(!seen.check_and_insert(2, &[3, 5]));
        assert!(seen.check_and_insert(2, &[3, 5]));
        assert!(!seen.check_and_insert(3, &[3, 5]));
        assert!(!seen.check_and_insert(2, &[5, 3]));
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_limit_stops_remembering() {
        let mut seen = SeenStates::<i32>::with_limit(1);
        assert!(!seen.check_and_insert(1, &[1]));
        assert!(!seen.check_and_insert(1, &[2]));
        assert!(!seen.check_and_insert(1, &[2]));
        assert!(seen.check_and_insert(1, &[1]));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_reset_clears() {
        let mut seen = SeenStates::<i64>::default();
        seen.check_and_insert(0, &[0, 0]);
        seen.reset();
        assert!(seen.is_empty());
        assert_eq!(seen.max_entries(), DEFAULT_MAX_SEEN_STATES);
    }
}
