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

//! Tree search monitoring interface.
//!
//! `TreeSearchMonitor` observes the branch-and-bound lifecycle and may stop
//! it through `SearchCommand`. Lifecycle:
//! enter, then per step {lower bound | prune | enqueue | descend | backtrack},
//! solutions as they are found, and finally exit.
//!
//! Callbacks run inside the hot loop; keep them cheap.

use crate::{branching::decision::Decision, state::StateView, stats::BnbSolverStatistics};
use partix_core::num::SolverNumeric;
use partix_model::{instance::Instance, partition::Partition};
use partix_search::monitor::search_monitor::SearchCommand;

/// Why a child was not descended into.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The child's bound cannot beat the incumbent.
    BoundDominated,
    /// An identical node was visited before.
    DuplicateState,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
            PruneReason::DuplicateState => write!(f, "DuplicateState"),
        }
    }
}

pub trait TreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str;

    fn on_enter_search(&mut self, instance: &Instance<T>, statistics: &BnbSolverStatistics<T>);

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>);

    /// Polled once per step, right after `on_step`.
    fn search_command(
        &mut self,
        _state: StateView<'_, T>,
        _statistics: &BnbSolverStatistics<T>,
    ) -> SearchCommand {
        SearchCommand::Continue
    }

    fn on_step(&mut self, state: StateView<'_, T>, statistics: &BnbSolverStatistics<T>);

    /// Called with the bound of a child before it is compared to the incumbent.
    fn on_lower_bound_computed(
        &mut self,
        _state: StateView<'_, T>,
        _lower_bound: T,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    fn on_prune(
        &mut self,
        _state: StateView<'_, T>,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    fn on_decisions_enqueued(
        &mut self,
        _state: StateView<'_, T>,
        _count: usize,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    /// Called after `decision` has been applied.
    fn on_descend(
        &mut self,
        _state: StateView<'_, T>,
        _decision: Decision,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    /// Called before the current level is undone.
    fn on_backtrack(&mut self, _state: StateView<'_, T>, _statistics: &BnbSolverStatistics<T>) {}

    fn on_solution_found(&mut self, partition: &Partition<T>, statistics: &BnbSolverStatistics<T>);
}

impl<T> std::fmt::Debug for dyn TreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn TreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<T, M> TreeSearchMonitor<T> for &mut M
where
    T: SolverNumeric,
    M: TreeSearchMonitor<T> + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_search(&mut self, instance: &Instance<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_enter_search(instance, statistics)
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        (**self).on_exit_search(statistics)
    }

    #[inline(always)]
    fn search_command(
        &mut self,
        state: StateView<'_, T>,
        statistics: &BnbSolverStatistics<T>,
    ) -> SearchCommand {
        (**self).search_command(state, statistics)
    }

    #[inline(always)]
    fn on_step(&mut self, state: StateView<'_, T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_step(state, statistics)
    }

    #[inline(always)]
    fn on_lower_bound_computed(
        &mut self,
        state: StateView<'_, T>,
        lower_bound: T,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_lower_bound_computed(state, lower_bound, statistics)
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        state: StateView<'_, T>,
        reason: PruneReason,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_prune(state, reason, statistics)
    }

    #[inline(always)]
    fn on_decisions_enqueued(
        &mut self,
        state: StateView<'_, T>,
        count: usize,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_decisions_enqueued(state, count, statistics)
    }

    #[inline(always)]
    fn on_descend(
        &mut self,
        state: StateView<'_, T>,
        decision: Decision,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_descend(state, decision, statistics)
    }

    #[inline(always)]
    fn on_backtrack(&mut self, state: StateView<'_, T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_backtrack(state, statistics)
    }

    #[inline(always)]
    fn on_solution_found(&mut self, partition: &Partition<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_solution_found(partition, statistics)
    }
}
