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

//! Failures of the dynamic programming search.

/// The error type of [`crate::dp::DpSolver`].
///
/// The DP never degrades into a heuristic: when a layer outgrows its budget
/// the search stops with an error instead of dropping states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DpError {
    /// The layer after placing the item at input index `item_index` holds
    /// more than `limit` distinct states.
    StateLimitExceeded { item_index: usize, limit: usize },
    /// A bin sum left the range of the value type.
    SumOverflow,
    /// The objective's keys over `num_bins` bins do not fit the value type.
    KeyOverflow { objective: String, num_bins: usize },
}

impl std::fmt::Display for DpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StateLimitExceeded { item_index, limit } => write!(
                f,
                "The state table exceeded its limit of {} states at item {}",
                limit, item_index
            ),
            Self::SumOverflow => write!(f, "A bin sum overflows the value type"),
            Self::KeyOverflow {
                objective,
                num_bins,
            } => write!(
                f,
                "Keys of objective `{}` over {} bins overflow the value type",
                objective, num_bins
            ),
        }
    }
}

impl std::error::Error for DpError {}
