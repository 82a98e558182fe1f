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

//! Input shapes accepted by the dispatch layer.
//!
//! Every shape is normalized into one value per item, in input order, plus
//! optional item names. Item `i` of the resulting instance is entry `i` of
//! [`Items::values`].

use crate::error::PartitionError;
use partix_core::num::SolverNumeric;

/// Items to partition, with optional names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Items<T> {
    values: Vec<T>,
    names: Option<Vec<String>>,
}

impl<T> Items<T>
where
    T: SolverNumeric,
{
    /// Anonymous items given by their values.
    pub fn from_values(values: Vec<T>) -> Self {
        Self { values, names: None }
    }

    /// Named items, e.g. from a list of pairs or a map from name to value.
    /// Items keep the iteration order of `pairs`.
    pub fn from_named<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
    {
        let (names, values): (Vec<String>, Vec<T>) = pairs
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .unzip();
        Self {
            values,
            names: Some(names),
        }
    }

    /// Repeats item `i` `copies[i]` times. Copies stay adjacent and keep
    /// the name of their original.
    pub fn with_copies(self, copies: &[usize]) -> Result<Self, PartitionError<T>> {
        if copies.len() != self.values.len() {
            return Err(PartitionError::CopiesCountMismatch {
                items: self.values.len(),
                copies: copies.len(),
            });
        }

        let total: usize = copies.iter().sum();
        let mut values = Vec::with_capacity(total);
        for (&value, &count) in self.values.iter().zip(copies) {
            values.extend(std::iter::repeat_n(value, count));
        }

        let names = self.names.map(|names| {
            let mut expanded = Vec::with_capacity(total);
            for (name, &count) in names.into_iter().zip(copies) {
                expanded.extend(std::iter::repeat_n(name, count));
            }
            expanded
        });

        Ok(Self { values, names })
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn is_named(&self) -> bool {
        self.names.is_some()
    }

    /// Returns the name of item `index`, if the items are named.
    #[inline]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names
            .as_ref()
            .and_then(|names| names.get(index))
            .map(String::as_str)
    }
}

impl<T> From<Vec<T>> for Items<T>
where
    T: SolverNumeric,
{
    fn from(values: Vec<T>) -> Self {
        Self::from_values(values)
    }
}

impl<T> From<&[T]> for Items<T>
where
    T: SolverNumeric,
{
    fn from(values: &[T]) -> Self {
        Self::from_values(values.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_named_items_from_map() {
        let map: BTreeMap<&str, i64> = [("b", 2), ("a", 1), ("c", 3)].into_iter().collect();
        let items = Items::from_named(map);
        assert_eq!(items.values(), &[1, 2, 3]);
        assert_eq!(items.name(0), Some("a"));
        assert_eq!(items.name(2), Some("c"));
        assert_eq!(items.name(3), None);
        assert!(items.is_named());
    }

    #[test]
    fn test_copies_expand_in_place() {
        let items = Items::from_named(vec![("x", 5i64), ("y", 7)])
            .with_copies(&[2, 3])
            .unwrap();
        assert_eq!(items.values(), &[5, 5, 7, 7, 7]);
        assert_eq!(items.name(1), Some("x"));
        assert_eq!(items.name(4), Some("y"));

        let none = Items::from_values(vec![5i64]).with_copies(&[0]).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_copies_length_mismatch() {
        let err = Items::from_values(vec![1i64, 2]).with_copies(&[1]).unwrap_err();
        assert_eq!(err, PartitionError::CopiesCountMismatch { items: 2, copies: 1 });
    }

    #[test]
    fn test_anonymous_items() {
        let items: Items<i32> = vec![3, 1].into();
        assert!(!items.is_named());
        assert_eq!(items.name(0), None);
        assert_eq!(items.len(), 2);
    }
}
