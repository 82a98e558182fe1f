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

//! By-value arithmetic traits.
//!
//! The inherent `saturating_*` and `checked_*` methods of the primitive
//! integers are not reachable through a generic bound, and the `num_traits`
//! counterparts take their operand by reference. The traits below forward to
//! the inherent methods by value so that generic code reads like arithmetic on
//! a concrete type:
//!
//! ```rust
//! use partix_core::num::ops::{CheckedAddVal, SaturatingAddVal};
//!
//! fn add_all<T: SaturatingAddVal + Copy>(xs: &[T], zero: T) -> T {
//!     xs.iter().fold(zero, |acc, &x| acc.saturating_add_val(x))
//! }
//!
//! assert_eq!(add_all(&[100i8, 20, 30], 0), i8::MAX);
//! assert_eq!(120i8.checked_add_val(10), None);
//! ```

/// Saturating addition by value, clamping at the numeric bounds.
pub trait SaturatingAddVal: Sized {
    fn saturating_add_val(self, rhs: Self) -> Self;
}

/// Saturating subtraction by value, clamping at the numeric bounds.
pub trait SaturatingSubVal: Sized {
    fn saturating_sub_val(self, rhs: Self) -> Self;
}

/// Saturating multiplication by value, clamping at the numeric bounds.
pub trait SaturatingMulVal: Sized {
    fn saturating_mul_val(self, rhs: Self) -> Self;
}

/// Checked addition by value; `None` on overflow.
pub trait CheckedAddVal: Sized {
    fn checked_add_val(self, rhs: Self) -> Option<Self>;
}

/// Checked subtraction by value; `None` on overflow.
pub trait CheckedSubVal: Sized {
    fn checked_sub_val(self, rhs: Self) -> Option<Self>;
}

/// Checked multiplication by value; `None` on overflow.
pub trait CheckedMulVal: Sized {
    fn checked_mul_val(self, rhs: Self) -> Option<Self>;
}

macro_rules! forward_by_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl SaturatingAddVal for $t {
                #[inline(always)]
                fn saturating_add_val(self, rhs: Self) -> Self {
                    <$t>::saturating_add(self, rhs)
                }
            }

            impl SaturatingSubVal for $t {
                #[inline(always)]
                fn saturating_sub_val(self, rhs: Self) -> Self {
                    <$t>::saturating_sub(self, rhs)
                }
            }

            impl SaturatingMulVal for $t {
                #[inline(always)]
                fn saturating_mul_val(self, rhs: Self) -> Self {
                    <$t>::saturating_mul(self, rhs)
                }
            }

            impl CheckedAddVal for $t {
                #[inline(always)]
                fn checked_add_val(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }
            }

            impl CheckedSubVal for $t {
                #[inline(always)]
                fn checked_sub_val(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_sub(self, rhs)
                }
            }

            impl CheckedMulVal for $t {
                #[inline(always)]
                fn checked_mul_val(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_mul(self, rhs)
                }
            }
        )*
    };
}

forward_by_value!(u8, u16, u32, u64, u128, usize);
forward_by_value!(i8, i16, i32, i64, i128, isize);
