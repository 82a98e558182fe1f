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

//! # Partix Solver
//!
//! The front door of the workspace. Callers describe a job with a
//! `PartitionRequest` and hand it their items as plain values, named values
//! or values with multiplicities; the request runs the chosen strategy and
//! projects the partition into the requested output shape.
//!
//! ## Modules
//!
//! - `dispatch`: `PartitionRequest`, `Strategy` and `PartitionResult`.
//! - `items`: input normalization into item identities.
//! - `output`: projections of a partition (contents, sums, extremal sums).
//! - `greedy`: the single-pass largest-first strategy.
//! - `solver`: the portfolio runner that races strategies on threads over a
//!   shared incumbent.
//! - `error`: `PartitionError`.

pub mod dispatch;
pub mod error;
pub mod greedy;
pub mod items;
pub mod output;
pub mod solver;
