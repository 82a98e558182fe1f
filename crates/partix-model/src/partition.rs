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

//! Finished partitions and their validation.

use crate::{
    index::{BinIndex, ItemIndex},
    instance::Instance,
};
use fixedbitset::FixedBitSet;
use partix_core::num::SolverNumeric;

/// A complete assignment of an instance's items to bins.
///
/// Bins are ordered by ascending sum, except for objectives that tie bins to
/// positions, where bin `b` stays bin `b`. The contents are only present when
/// the partition was produced by a content-keeping bin store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition<T> {
    /// The key of the objective the partition was searched under.
    objective_value: T,

    /// `sums[b]` is the total value of bin `b`.
    sums: Vec<T>,

    /// `bins[b]` lists the items placed into bin `b`.
    bins: Option<Vec<Vec<ItemIndex>>>,
}

impl<T> Partition<T>
where
    T: SolverNumeric,
{
    /// Constructs a new `Partition`.
    ///
    /// # Panics
    ///
    /// Panics if `bins` is present and its length differs from `sums`.
    pub fn new(objective_value: T, sums: Vec<T>, bins: Option<Vec<Vec<ItemIndex>>>) -> Self {
        if let Some(bins) = &bins {
            assert_eq!(
                bins.len(),
                sums.len(),
                "called `Partition::new` with inconsistent vector lengths: bins.len() = {}, sums.len() = {}",
                bins.len(),
                sums.len()
            );
        }

        Self {
            objective_value,
            sums,
            bins,
        }
    }

    #[inline]
    pub fn objective_value(&self) -> T {
        self.objective_value
    }

    #[inline]
    pub fn num_bins(&self) -> usize {
        self.sums.len()
    }

    #[inline]
    pub fn sums(&self) -> &[T] {
        &self.sums
    }

    /// Returns the items of every bin, if the contents were kept.
    #[inline]
    pub fn bins(&self) -> Option<&[Vec<ItemIndex>]> {
        self.bins.as_deref()
    }

    #[inline]
    pub fn has_contents(&self) -> bool {
        self.bins.is_some()
    }

    /// Returns the items of `bin`, if the contents were kept.
    #[inline]
    pub fn bin_items(&self, bin: BinIndex) -> Option<&[ItemIndex]> {
        self.bins
            .as_ref()
            .and_then(|bins| bins.get(bin.get()))
            .map(Vec::as_slice)
    }

    /// Returns the largest bin sum, or zero for a partition without bins.
    #[inline]
    pub fn largest_sum(&self) -> T {
        self.sums.iter().copied().max().unwrap_or(T::ZERO)
    }

    /// Returns the smallest bin sum, or zero for a partition without bins.
    #[inline]
    pub fn smallest_sum(&self) -> T {
        self.sums.iter().copied().min().unwrap_or(T::ZERO)
    }

    /// Returns the bin sums in ascending order.
    pub fn sorted_sums(&self) -> Vec<T> {
        let mut sorted = self.sums.clone();
        sorted.sort_unstable();
        sorted
    }

    #[inline]
    pub fn total(&self) -> T {
        self.sums
            .iter()
            .fold(T::ZERO, |acc, &s| acc.saturating_add_val(s))
    }

    /// Returns a copy of this partition that carries a different objective key.
    pub fn with_objective_value(mut self, objective_value: T) -> Self {
        self.objective_value = objective_value;
        self
    }

    /// Checks that this partition is a partition of `instance`.
    ///
    /// Without contents only the conservation of the total value can be
    /// checked. With contents every item must appear exactly once and every
    /// bin sum must equal the values of its items.
    pub fn verify(&self, instance: &Instance<T>) -> Result<(), PartitionMismatch<T>> {
        if self.total() != instance.total_value() {
            return Err(PartitionMismatch::TotalMismatch {
                expected: instance.total_value(),
                actual: self.total(),
            });
        }

        let Some(bins) = &self.bins else {
            return Ok(());
        };

        let mut seen = FixedBitSet::with_capacity(instance.num_items());
        for (b, items) in bins.iter().enumerate() {
            let mut sum = T::ZERO;
            for &item in items {
                if item.get() >= instance.num_items() {
                    return Err(PartitionMismatch::UnknownItem(item));
                }
                if seen.put(item.get()) {
                    return Err(PartitionMismatch::DuplicateItem(item));
                }
                sum = sum.saturating_add_val(instance.value(item));
            }
            if sum != self.sums[b] {
                return Err(PartitionMismatch::BinSumMismatch {
                    bin: BinIndex::new(b),
                    expected: sum,
                    actual: self.sums[b],
                });
            }
        }

        if let Some(missing) = seen.zeroes().next() {
            return Err(PartitionMismatch::MissingItem(ItemIndex::new(missing)));
        }

        Ok(())
    }
}

impl<T> std::fmt::Display for Partition<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Partition Summary")?;
        writeln!(f, "   Objective Value: {}", self.objective_value)?;
        writeln!(f)?;

        if self.num_bins() == 0 {
            writeln!(f, "   (No bins)")?;
            return Ok(());
        }

        writeln!(f, "   {:<6} | {:<12} | {:<}", "Bin", "Sum", "Items")?;
        writeln!(f, "   {:-<6}-+-{:-<12}-+-{:-<12}", "", "", "")?;
        for (b, sum) in self.sums.iter().enumerate() {
            let items = match &self.bins {
                Some(bins) => bins[b]
                    .iter()
                    .map(|item| item.get().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
                None => "-".to_string(),
            };
            writeln!(f, "   {:<6} | {:<12} | {}", b, sum, items)?;
        }

        Ok(())
    }
}

/// A reason why a partition does not match an instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartitionMismatch<T> {
    /// The bin sums do not add up to the instance total.
    TotalMismatch { expected: T, actual: T },
    /// An item appears in more than one place.
    DuplicateItem(ItemIndex),
    /// An item does not appear in any bin.
    MissingItem(ItemIndex),
    /// A bin refers to an item the instance does not have.
    UnknownItem(ItemIndex),
    /// A bin's recorded sum differs from the values of its items.
    BinSumMismatch {
        bin: BinIndex,
        expected: T,
        actual: T,
    },
}

impl<T> std::fmt::Display for PartitionMismatch<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TotalMismatch { expected, actual } => write!(
                f,
                "The bin sums add up to {} but the items add up to {}",
                actual, expected
            ),
            Self::DuplicateItem(item) => write!(f, "Item {} is assigned more than once", item.get()),
            Self::MissingItem(item) => write!(f, "Item {} is not assigned to any bin", item.get()),
            Self::UnknownItem(item) => write!(f, "Item {} does not exist", item.get()),
            Self::BinSumMismatch {
                bin,
                expected,
                actual,
            } => write!(
                f,
                "Bin {} records sum {} but its items add up to {}",
                bin.get(),
                actual,
                expected
            ),
        }
    }
}

impl<T> std::error::Error for PartitionMismatch<T> where T: std::fmt::Debug + std::fmt::Display {}
