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

//! # Bin Stores
//!
//! A bin store is the current assignment of items to `n` bins. Two
//! representations share one contract:
//!
//! - `SumBins` keeps only the running total of every bin. Copies and
//!   fingerprints are a single small vector, which is what the searches want
//!   when the caller only asks for sums.
//! - `ContentBins` additionally keeps the ordered list of items placed into
//!   every bin, so the final partition can be reported.
//!
//! The representation is a type parameter of the engines, chosen when the
//! engine is constructed; there is no runtime type inspection.
//!
//! ```rust
//! use partix_model::bins::{BinStore, ContentBins};
//! use partix_model::index::{BinIndex, ItemIndex};
//!
//! let mut bins = ContentBins::<i64>::new(2);
//! bins.add_item(BinIndex::new(1), ItemIndex::new(0), 7);
//! bins.add_item(BinIndex::new(0), ItemIndex::new(1), 9);
//! bins.sort_ascending();
//! assert_eq!(bins.sums(), &[7, 9]);
//! assert_eq!(bins.contents(BinIndex::new(1)), Some(&[ItemIndex::new(1)][..]));
//! ```

use crate::{
    index::{BinIndex, ItemIndex},
    partition::Partition,
};
use partix_core::num::SolverNumeric;

/// The shared contract of the two bin representations.
///
/// Sums are accumulated with saturating additions. An `Instance` guarantees
/// that its total value fits the value type, so an engine that only adds the
/// values of one instance never saturates.
pub trait BinStore<T>: Clone + std::fmt::Debug + std::fmt::Display + Send
where
    T: SolverNumeric,
{
    /// Whether this representation records which items are in which bin.
    const KEEPS_CONTENTS: bool;

    /// Creates `num_bins` empty bins.
    ///
    /// # Panics
    ///
    /// Panics if `num_bins` is zero.
    fn new(num_bins: usize) -> Self;

    /// Returns the number of bins.
    fn num_bins(&self) -> usize;

    /// Returns the current bin sums in bin order.
    fn sums(&self) -> &[T];

    /// Returns the sum of `bin`.
    ///
    /// # Panics
    ///
    /// Panics if `bin` is out of bounds.
    #[inline]
    fn sum(&self, bin: BinIndex) -> T {
        let sums = self.sums();
        assert!(
            bin.get() < sums.len(),
            "called `BinStore::sum` with bin index out of bounds: the len is {} but the index is {}",
            sums.len(),
            bin.get()
        );
        sums[bin.get()]
    }

    /// Appends `item` with `value` to `bin`.
    ///
    /// # Panics
    ///
    /// Panics if `bin` is out of bounds.
    fn add_item(&mut self, bin: BinIndex, item: ItemIndex, value: T);

    /// Reverts the most recent `add_item(bin, item, value)` on `bin`.
    fn remove_last_item(&mut self, bin: BinIndex, item: ItemIndex, value: T);

    /// Reorders the bins by ascending sum.
    fn sort_ascending(&mut self);

    /// Returns a deep copy that shares no state with `self`.
    #[inline]
    fn copy(&self) -> Self {
        self.clone()
    }

    /// Appends `count` empty bins.
    fn add_empty_bins(&mut self, count: usize);

    /// Drops the last `count` bins together with their contents.
    ///
    /// # Panics
    ///
    /// Panics if fewer than one bin would remain.
    fn remove_trailing_bins(&mut self, count: usize);

    /// Returns the items of `bin`, or `None` for the sums-only representation.
    fn contents(&self, bin: BinIndex) -> Option<&[ItemIndex]>;

    /// Converts the bins into a `Partition` sorted by ascending sum.
    fn into_partition(self, objective_value: T) -> Partition<T>;

    /// Converts the bins into a `Partition` that keeps every bin at its
    /// position, for objectives that tie bins to positions.
    fn into_positional_partition(self, objective_value: T) -> Partition<T>;

    /// Returns the total over all bin sums.
    #[inline]
    fn total(&self) -> T {
        self.sums()
            .iter()
            .fold(T::ZERO, |acc, &s| acc.saturating_add_val(s))
    }
}

#[inline(always)]
fn assert_bins_nonzero(num_bins: usize, caller: &str) {
    assert!(
        num_bins > 0,
        "called `{}` with zero bins: at least one bin is required",
        caller
    );
}

#[inline(always)]
fn assert_trailing_removable(num_bins: usize, count: usize, caller: &str) {
    assert!(
        count < num_bins,
        "called `{}` with a count that leaves no bins: the len is {} but the count is {}",
        caller,
        num_bins,
        count
    );
}

/// Bins that only track their sums.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SumBins<T> {
    sums: Vec<T>,
}

impl<T> BinStore<T> for SumBins<T>
where
    T: SolverNumeric,
{
    const KEEPS_CONTENTS: bool = false;

    fn new(num_bins: usize) -> Self {
        assert_bins_nonzero(num_bins, "SumBins::new");
        Self {
            sums: vec![T::ZERO; num_bins],
        }
    }

    #[inline]
    fn num_bins(&self) -> usize {
        self.sums.len()
    }

    #[inline]
    fn sums(&self) -> &[T] {
        &self.sums
    }

    #[inline]
    fn add_item(&mut self, bin: BinIndex, _item: ItemIndex, value: T) {
        let index = bin.get();
        assert!(
            index < self.sums.len(),
            "called `SumBins::add_item` with bin index out of bounds: the len is {} but the index is {}",
            self.sums.len(),
            index
        );
        self.sums[index] = self.sums[index].saturating_add_val(value);
    }

    #[inline]
    fn remove_last_item(&mut self, bin: BinIndex, _item: ItemIndex, value: T) {
        let index = bin.get();
        debug_assert!(
            index < self.sums.len(),
            "called `SumBins::remove_last_item` with bin index out of bounds: the len is {} but the index is {}",
            self.sums.len(),
            index
        );
        debug_assert!(
            self.sums[index] >= value,
            "called `SumBins::remove_last_item` with a value larger than the bin sum: sum = {}, value = {}",
            self.sums[index],
            value
        );
        self.sums[index] = self.sums[index] - value;
    }

    #[inline]
    fn sort_ascending(&mut self) {
        self.sums.sort_unstable();
    }

    fn add_empty_bins(&mut self, count: usize) {
        self.sums.resize(self.sums.len() + count, T::ZERO);
    }

    fn remove_trailing_bins(&mut self, count: usize) {
        assert_trailing_removable(self.sums.len(), count, "SumBins::remove_trailing_bins");
        self.sums.truncate(self.sums.len() - count);
    }

    #[inline]
    fn contents(&self, _bin: BinIndex) -> Option<&[ItemIndex]> {
        None
    }

    fn into_partition(mut self, objective_value: T) -> Partition<T> {
        self.sort_ascending();
        Partition::new(objective_value, self.sums, None)
    }

    fn into_positional_partition(self, objective_value: T) -> Partition<T> {
        Partition::new(objective_value, self.sums, None)
    }
}

impl<T> std::fmt::Display for SumBins<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, sum) in self.sums.iter().enumerate() {
            writeln!(f, "Bin #{}: sum={}", i, sum)?;
        }
        Ok(())
    }
}

/// Bins that track their sums and the items placed into them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentBins<T> {
    sums: Vec<T>,
    items: Vec<Vec<ItemIndex>>,
}

impl<T> ContentBins<T> {
    /// Returns the items of every bin in bin order.
    #[inline]
    pub fn all_contents(&self) -> &[Vec<ItemIndex>] {
        &self.items
    }
}

impl<T> BinStore<T> for ContentBins<T>
where
    T: SolverNumeric,
{
    const KEEPS_CONTENTS: bool = true;

    fn new(num_bins: usize) -> Self {
        assert_bins_nonzero(num_bins, "ContentBins::new");
        Self {
            sums: vec![T::ZERO; num_bins],
            items: vec![Vec::new(); num_bins],
        }
    }

    #[inline]
    fn num_bins(&self) -> usize {
        self.sums.len()
    }

    #[inline]
    fn sums(&self) -> &[T] {
        &self.sums
    }

    #[inline]
    fn add_item(&mut self, bin: BinIndex, item: ItemIndex, value: T) {
        let index = bin.get();
        assert!(
            index < self.sums.len(),
            "called `ContentBins::add_item` with bin index out of bounds: the len is {} but the index is {}",
            self.sums.len(),
            index
        );
        self.sums[index] = self.sums[index].saturating_add_val(value);
        self.items[index].push(item);
    }

    #[inline]
    fn remove_last_item(&mut self, bin: BinIndex, item: ItemIndex, value: T) {
        let index = bin.get();
        debug_assert!(
            index < self.sums.len(),
            "called `ContentBins::remove_last_item` with bin index out of bounds: the len is {} but the index is {}",
            self.sums.len(),
            index
        );
        let removed = self.items[index].pop();
        debug_assert_eq!(
            removed,
            Some(item),
            "called `ContentBins::remove_last_item` with an item that is not the last one of bin {}",
            index
        );
        self.sums[index] = self.sums[index] - value;
    }

    fn sort_ascending(&mut self) {
        if self.sums.windows(2).all(|w| w[0] <= w[1]) {
            return;
        }

        // Stable, so bins with equal sums keep their relative order.
        let mut permutation: Vec<usize> = (0..self.sums.len()).collect();
        permutation.sort_by_key(|&i| self.sums[i]);

        let sums: Vec<T> = permutation.iter().map(|&i| self.sums[i]).collect();
        let mut old_items = std::mem::take(&mut self.items);
        self.items = permutation
            .iter()
            .map(|&i| std::mem::take(&mut old_items[i]))
            .collect();
        self.sums = sums;
    }

    fn add_empty_bins(&mut self, count: usize) {
        let len = self.sums.len() + count;
        self.sums.resize(len, T::ZERO);
        self.items.resize_with(len, Vec::new);
    }

    fn remove_trailing_bins(&mut self, count: usize) {
        assert_trailing_removable(self.sums.len(), count, "ContentBins::remove_trailing_bins");
        let len = self.sums.len() - count;
        self.sums.truncate(len);
        self.items.truncate(len);
    }

    #[inline]
    fn contents(&self, bin: BinIndex) -> Option<&[ItemIndex]> {
        self.items.get(bin.get()).map(Vec::as_slice)
    }

    fn into_partition(mut self, objective_value: T) -> Partition<T> {
        self.sort_ascending();
        Partition::new(objective_value, self.sums, Some(self.items))
    }

    fn into_positional_partition(self, objective_value: T) -> Partition<T> {
        Partition::new(objective_value, self.sums, Some(self.items))
    }
}

impl<T> std::fmt::Display for ContentBins<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (sum, items)) in self.sums.iter().zip(&self.items).enumerate() {
            write!(f, "Bin #{}: [", i)?;
            for (j, item) in items.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", item.get())?;
            }
            writeln!(f, "], sum={}", sum)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bi(i: usize) -> BinIndex {
        BinIndex::new(i)
    }

    fn ii(i: usize) -> ItemIndex {
        ItemIndex::new(i)
    }

    // a=3, b=4, c=5, d=5, e=5
    const VALUES: [i64; 5] = [3, 4, 5, 5, 5];

    fn filled<B: BinStore<i64>>() -> B {
        let mut bins = B::new(3);
        bins.add_item(bi(0), ii(2), VALUES[2]);
        bins.add_item(bi(0), ii(3), VALUES[3]);
        bins.add_item(bi(1), ii(0), VALUES[0]);
        bins.add_item(bi(2), ii(1), VALUES[1]);
        bins
    }

    #[test]
    fn test_new_bins_are_empty() {
        let sums = SumBins::<i64>::new(3);
        assert_eq!(sums.sums(), &[0, 0, 0]);
        assert_eq!(sums.contents(bi(0)), None);

        let content = ContentBins::<i64>::new(2);
        assert_eq!(content.sums(), &[0, 0]);
        assert_eq!(content.contents(bi(1)), Some(&[][..]));
    }

    #[test]
    #[should_panic(expected = "called `SumBins::new` with zero bins")]
    fn test_sum_bins_zero_bins_panics() {
        let _ = SumBins::<i64>::new(0);
    }

    #[test]
    #[should_panic(expected = "called `ContentBins::new` with zero bins")]
    fn test_content_bins_zero_bins_panics() {
        let _ = ContentBins::<i64>::new(0);
    }

    #[test]
    #[should_panic(expected = "called `ContentBins::add_item` with bin index out of bounds")]
    fn test_add_item_out_of_range_panics() {
        let mut bins = ContentBins::<i64>::new(2);
        bins.add_item(bi(2), ii(0), 1);
    }

    #[test]
    fn test_add_item_updates_sums_in_both_modes() {
        let sums: SumBins<i64> = filled();
        let content: ContentBins<i64> = filled();
        assert_eq!(sums.sums(), &[10, 3, 4]);
        assert_eq!(content.sums(), &[10, 3, 4]);
        assert_eq!(content.contents(bi(0)), Some(&[ii(2), ii(3)][..]));
        assert_eq!(sums.total(), 17);
        assert_eq!(content.sum(bi(2)), 4);
    }

    #[test]
    fn test_sort_ascending_moves_contents_with_sums() {
        let mut content: ContentBins<i64> = filled();
        content.sort_ascending();
        assert_eq!(content.sums(), &[3, 4, 10]);
        assert_eq!(content.contents(bi(0)), Some(&[ii(0)][..]));
        assert_eq!(content.contents(bi(1)), Some(&[ii(1)][..]));
        assert_eq!(content.contents(bi(2)), Some(&[ii(2), ii(3)][..]));

        let mut sums: SumBins<i64> = filled();
        sums.sort_ascending();
        assert_eq!(sums.sums(), &[3, 4, 10]);
    }

    #[test]
    fn test_sort_ascending_is_stable_for_equal_sums() {
        let mut bins = ContentBins::<i64>::new(3);
        bins.add_item(bi(0), ii(2), 5);
        bins.add_item(bi(1), ii(3), 5);
        bins.add_item(bi(2), ii(0), 3);
        bins.sort_ascending();
        assert_eq!(bins.all_contents(), &[vec![ii(0)], vec![ii(2)], vec![ii(3)]]);
    }

    #[test]
    fn test_copy_is_independent() {
        let original: ContentBins<i64> = filled();
        let mut copy = original.copy();
        copy.add_item(bi(1), ii(4), VALUES[4]);
        assert_eq!(original.sums(), &[10, 3, 4]);
        assert_eq!(original.contents(bi(1)), Some(&[ii(0)][..]));
        assert_eq!(copy.sums(), &[10, 8, 4]);
    }

    #[test]
    fn test_remove_last_item_reverts_add() {
        let mut bins: ContentBins<i64> = filled();
        let before = bins.clone();
        bins.add_item(bi(2), ii(4), VALUES[4]);
        bins.remove_last_item(bi(2), ii(4), VALUES[4]);
        assert_eq!(bins, before);

        let mut sums: SumBins<i64> = filled();
        sums.add_item(bi(0), ii(4), 5);
        sums.remove_last_item(bi(0), ii(4), 5);
        assert_eq!(sums.sums(), &[10, 3, 4]);
    }

    #[test]
    fn test_add_and_remove_trailing_bins() {
        let mut bins: ContentBins<i64> = filled();
        bins.add_empty_bins(2);
        assert_eq!(bins.num_bins(), 5);
        assert_eq!(bins.sums(), &[10, 3, 4, 0, 0]);
        assert_eq!(bins.contents(bi(4)), Some(&[][..]));

        bins.remove_trailing_bins(3);
        assert_eq!(bins.num_bins(), 2);
        assert_eq!(bins.sums(), &[10, 3]);
        assert_eq!(bins.contents(bi(2)), None);

        let mut sums = SumBins::<i64>::new(1);
        sums.add_empty_bins(1);
        sums.remove_trailing_bins(1);
        assert_eq!(sums.num_bins(), 1);
    }

    #[test]
    #[should_panic(expected = "called `SumBins::remove_trailing_bins` with a count that leaves no bins")]
    fn test_remove_all_bins_panics() {
        let mut bins = SumBins::<i64>::new(2);
        bins.remove_trailing_bins(2);
    }

    #[test]
    fn test_into_partition_is_sorted() {
        let bins: ContentBins<i64> = filled();
        let partition = bins.into_partition(10);
        assert_eq!(partition.sums(), &[3, 4, 10]);
        assert_eq!(partition.bin_items(bi(2)), Some(&[ii(2), ii(3)][..]));
        assert_eq!(partition.objective_value(), 10);

        let sums: SumBins<i64> = filled();
        let partition = sums.into_partition(10);
        assert_eq!(partition.sums(), &[3, 4, 10]);
        assert!(!partition.has_contents());
    }

    #[test]
    fn test_positional_partition_keeps_bin_order() {
        let bins: ContentBins<i64> = filled();
        let expected_sums = bins.sums().to_vec();
        let expected_items = bins.all_contents().to_vec();
        let partition = bins.into_positional_partition(-3);
        assert_eq!(partition.sums(), &expected_sums[..]);
        assert_eq!(partition.bins(), Some(&expected_items[..]));
    }

    #[test]
    fn test_display_lists_bins() {
        let bins: ContentBins<i64> = filled();
        let text = bins.to_string();
        assert!(text.contains("Bin #0: [2, 3], sum=10"));
        assert!(text.contains("Bin #1: [0], sum=3"));
        let sums: SumBins<i64> = filled();
        assert!(sums.to_string().contains("Bin #2: sum=4"));
    }

    #[test]
    fn test_representation_flags() {
        assert!(!<SumBins<i64> as BinStore<i64>>::KEEPS_CONTENTS);
        assert!(<ContentBins<i64> as BinStore<i64>>::KEEPS_CONTENTS);
    }
}
