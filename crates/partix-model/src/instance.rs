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

//! Validated partitioning instances.
//!
//! An `Instance` owns the item values in the caller's input order together
//! with the largest-first processing order used by the searches and the
//! suffix sums of that order, so that "total value still to be placed after
//! depth `d`" is a constant-time lookup inside the hot loop.
//!
//! Construction rejects negative values (bin sums must be monotone for the
//! bounds to be admissible) and instances whose total value does not fit the
//! value type (every partial sum is then guaranteed to fit as well).

use crate::index::ItemIndex;
use partix_core::num::SolverNumeric;

/// The error type for instance construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceError<T> {
    /// An item has a negative value.
    NegativeValue { item: ItemIndex, value: T },
    /// The sum of all item values overflows the value type.
    TotalOverflow,
}

impl<T> std::fmt::Display for InstanceError<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeValue { item, value } => {
                write!(f, "Item {} has negative value {}", item.get(), value)
            }
            Self::TotalOverflow => write!(f, "The total item value overflows the value type"),
        }
    }
}

impl<T> std::error::Error for InstanceError<T> where T: std::fmt::Debug + std::fmt::Display {}

/// A multiset of item values ready to be partitioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance<T> {
    values: Vec<T>,
    /// Item indices sorted by descending value; ties keep input order.
    order: Vec<ItemIndex>,
    /// `remaining[d]` is the total value of `order[d..]`; has `len + 1` entries.
    remaining: Vec<T>,
}

impl<T> Instance<T>
where
    T: SolverNumeric,
{
    /// Builds an instance from item values in input order.
    pub fn new(values: Vec<T>) -> Result<Self, InstanceError<T>> {
        for (i, &value) in values.iter().enumerate() {
            if value < T::ZERO {
                return Err(InstanceError::NegativeValue {
                    item: ItemIndex::new(i),
                    value,
                });
            }
        }

        let mut order: Vec<ItemIndex> = ItemIndex::range(values.len()).collect();
        order.sort_by(|a, b| values[b.get()].cmp(&values[a.get()]));

        let mut remaining = vec![T::ZERO; values.len() + 1];
        for depth in (0..order.len()).rev() {
            let value = values[order[depth].get()];
            remaining[depth] = remaining[depth + 1]
                .checked_add_val(value)
                .ok_or(InstanceError::TotalOverflow)?;
        }

        Ok(Self {
            values,
            order,
            remaining,
        })
    }

    /// Returns the number of items.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value of `item`.
    ///
    /// # Panics
    ///
    /// Panics if `item` is out of bounds.
    #[inline]
    pub fn value(&self, item: ItemIndex) -> T {
        let index = item.get();
        assert!(
            index < self.num_items(),
            "called `Instance::value` with item index out of bounds: the len is {} but the index is {}",
            self.num_items(),
            index
        );
        self.values[index]
    }

    /// Returns all values in input order.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns the items in largest-first processing order.
    #[inline]
    pub fn descending_order(&self) -> &[ItemIndex] {
        &self.order
    }

    /// Returns the item processed at `depth` in largest-first order.
    #[inline]
    pub fn item_at_depth(&self, depth: usize) -> ItemIndex {
        debug_assert!(
            depth < self.num_items(),
            "called `Instance::item_at_depth` with depth out of bounds: the len is {} but the depth is {}",
            self.num_items(),
            depth
        );
        self.order[depth]
    }

    /// Returns the total value of the items processed at `depth` and later.
    #[inline]
    pub fn remaining_from_depth(&self, depth: usize) -> T {
        debug_assert!(
            depth <= self.num_items(),
            "called `Instance::remaining_from_depth` with depth out of bounds: the len is {} but the depth is {}",
            self.num_items(),
            depth
        );
        self.remaining[depth]
    }

    /// Returns the sum of all item values.
    #[inline]
    pub fn total_value(&self) -> T {
        self.remaining[0]
    }

    /// Returns the largest item value, or zero for an empty instance.
    #[inline]
    pub fn largest_value(&self) -> T {
        self.order
            .first()
            .map_or(T::ZERO, |item| self.values[item.get()])
    }
}

impl<T> std::fmt::Display for Instance<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Instance(items: {}, total: {}, largest: {})",
            self.num_items(),
            self.total_value(),
            self.largest_value()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descending_order_is_stable_for_ties() {
        let instance = Instance::new(vec![5i64, 8, 5, 9, 1]).unwrap();
        let order: Vec<usize> = instance.descending_order().iter().map(|i| i.get()).collect();
        assert_eq!(order, vec![3, 1, 0, 2, 4]);
    }

    #[test]
    fn test_remaining_suffix_sums() {
        let instance = Instance::new(vec![4i64, 5, 6, 7, 8]).unwrap();
        assert_eq!(instance.total_value(), 30);
        assert_eq!(instance.remaining_from_depth(0), 30);
        assert_eq!(instance.remaining_from_depth(1), 22);
        assert_eq!(instance.remaining_from_depth(4), 4);
        assert_eq!(instance.remaining_from_depth(5), 0);
        assert_eq!(instance.item_at_depth(0), ItemIndex::new(4));
        assert_eq!(instance.largest_value(), 8);
    }

    #[test]
    fn test_empty_instance() {
        let instance = Instance::<i32>::new(Vec::new()).unwrap();
        assert!(instance.is_empty());
        assert_eq!(instance.total_value(), 0);
        assert_eq!(instance.largest_value(), 0);
        assert_eq!(instance.remaining_from_depth(0), 0);
    }

    #[test]
    fn test_negative_value_is_rejected() {
        let err = Instance::new(vec![3i64, -1, 2]).unwrap_err();
        assert_eq!(
            err,
            InstanceError::NegativeValue {
                item: ItemIndex::new(1),
                value: -1
            }
        );
        assert_eq!(err.to_string(), "Item 1 has negative value -1");
    }

    #[test]
    fn test_total_overflow_is_rejected() {
        let err = Instance::new(vec![100i8, 27, 1]).unwrap_err();
        assert_eq!(err, InstanceError::TotalOverflow);
    }

    #[test]
    #[should_panic(expected = "called `Instance::value` with item index out of bounds")]
    fn test_value_out_of_bounds_panics() {
        let instance = Instance::new(vec![1i64]).unwrap();
        let _ = instance.value(ItemIndex::new(3));
    }
}
