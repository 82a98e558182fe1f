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

//! # Partix-BnB: anytime branch-and-bound for number partitioning
//!
//! A depth-first branch-and-bound search that assigns items, largest first,
//! to `k` bins under any `partix_model::objective::Objective`. The search
//! keeps the best complete assignment found so far and reports it when it is
//! stopped early, so it can be used as an anytime heuristic as well as an
//! exact solver.
//!
//! Core flow
//! - Build a `partix_model::instance::Instance<T>`.
//! - Choose a bin representation: `SumBins` for sums only, `ContentBins`
//!   for the partition itself.
//! - Choose a `branching::decision::DecisionBuilder`.
//! - Optionally add monitors for time limits, solution limits or logging.
//! - Run `bnb::BnbSolver` directly, or through `portfolio`.
//!
//! The node is mutated in place and restored through a trail, and a
//! `seen::SeenStates` table skips children whose sorted sums were already
//! visited at the same depth. Lower bounds must be admissible: pruning relies
//! on no completion beating the bound.
//!
//! Module map
//! - `bnb`: the solver engine and its configuration.
//! - `branching`: decision builders.
//! - `incumbent`: local and shared incumbent handling.
//! - `monitor`: tree-search monitors.
//! - `portfolio`: adapter to the `partix_search` portfolio API.
//! - `result`: solver outcomes.
//! - `seen`, `stack`, `state`, `trail`: search internals.
//! - `stats`: counters and timing.

pub mod bnb;
pub mod branching;
pub mod incumbent;
pub mod monitor;
pub mod portfolio;
pub mod result;
pub mod seen;
pub mod stack;
pub mod state;
pub mod stats;
pub mod trail;
