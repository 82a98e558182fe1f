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

//! # Partix-DP: exact dynamic programming for number partitioning
//!
//! `dp::DpSolver` enumerates, item by item, every distinct vector of bin
//! sums and reads the optimum off the last layer. It is exact and dominates
//! branch-and-bound on many items with small values; its cost grows with the
//! range of reachable sums, so every layer runs under a state budget and the
//! search fails with `error::DpError` instead of degrading.
//!
//! - `dp`: the engine and `DpConfig`.
//! - `error`: `DpError`.
//! - `portfolio`: adapter to the `partix_search` portfolio API.
//! - `result`: `DpSolverOutcome`.
//! - `stats`: counters and timing.

pub mod dp;
pub mod error;
pub mod portfolio;
pub mod result;
pub mod stats;
