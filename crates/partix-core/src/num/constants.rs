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

/// Integer types with an associated constant for `0`.
pub trait Zero {
    const ZERO: Self;
}

/// Integer types with an associated constant for `1`.
pub trait PlusOne {
    const PLUS_ONE: Self;
}

/// Signed integer types with an associated constant for `-1`.
pub trait MinusOne {
    const MINUS_ONE: Self;
}

macro_rules! impl_unsigned_constants {
    ($($t:ty),* $(,)?) => {
        $(
            impl Zero for $t {
                const ZERO: Self = 0;
            }

            impl PlusOne for $t {
                const PLUS_ONE: Self = 1;
            }
        )*
    };
}

macro_rules! impl_signed_constants {
    ($($t:ty),* $(,)?) => {
        $(
            impl_unsigned_constants!($t);

            impl MinusOne for $t {
                const MINUS_ONE: Self = -1;
            }
        )*
    };
}

impl_unsigned_constants!(u8, u16, u32, u64, u128, usize);
impl_signed_constants!(i8, i16, i32, i64, i128, isize);
