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

//! Integer helpers used by the partitioning engines.
//!
//! `constants` exposes sentinel values as associated constants, `ops` the
//! by-value arithmetic the engines rely on when accumulating bin sums and
//! objective bounds. `SolverNumeric` bundles everything a value type has to
//! provide to flow through the bin stores, objectives and searches.

pub mod constants;
pub mod ops;

use constants::{MinusOne, PlusOne, Zero};
use num_traits::{FromPrimitive, PrimInt, Signed};
use ops::{
    CheckedAddVal, CheckedMulVal, CheckedSubVal, SaturatingAddVal, SaturatingMulVal,
    SaturatingSubVal,
};
use std::hash::Hash;

/// Trait alias for the integer types usable as item values, bin sums and
/// objective keys: `i8`, `i16`, `i32` and `i64`.
///
/// Keys are signed because maximizing objectives are expressed as the
/// minimization of a negated sum. `Into<i64>` lets shared incumbents publish
/// bounds through a single atomic representation.
pub trait SolverNumeric:
    PrimInt
    + Signed
    + FromPrimitive
    + Into<i64>
    + Hash
    + std::fmt::Debug
    + std::fmt::Display
    + Zero
    + PlusOne
    + MinusOne
    + SaturatingAddVal
    + SaturatingSubVal
    + SaturatingMulVal
    + CheckedAddVal
    + CheckedSubVal
    + CheckedMulVal
    + Send
    + Sync
    + 'static
{
}

impl<T> SolverNumeric for T where
    T: PrimInt
        + Signed
        + FromPrimitive
        + Into<i64>
        + Hash
        + std::fmt::Debug
        + std::fmt::Display
        + Zero
        + PlusOne
        + MinusOne
        + SaturatingAddVal
        + SaturatingSubVal
        + SaturatingMulVal
        + CheckedAddVal
        + CheckedSubVal
        + CheckedMulVal
        + Send
        + Sync
        + 'static
{
}

/// Converts a bin or item count into the value type.
///
/// # Panics
///
/// Panics if `count` does not fit into `T`.
#[inline]
pub fn count_as<T>(count: usize) -> T
where
    T: SolverNumeric,
{
    match T::from_usize(count) {
        Some(value) => value,
        None => panic!(
            "called `count_as` with a count that does not fit the value type: {}",
            count
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_numeric<T: SolverNumeric>() {}

    #[test]
    fn test_signed_integers_are_solver_numeric() {
        assert_numeric::<i8>();
        assert_numeric::<i16>();
        assert_numeric::<i32>();
        assert_numeric::<i64>();
    }

    #[test]
    fn test_count_as_converts_in_range() {
        assert_eq!(count_as::<i64>(7), 7);
        assert_eq!(count_as::<i8>(127), 127);
    }

    #[test]
    #[should_panic(expected = "called `count_as` with a count that does not fit the value type")]
    fn test_count_as_panics_on_overflow() {
        let _ = count_as::<i8>(300);
    }
}
