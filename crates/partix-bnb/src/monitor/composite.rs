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

//! A fan-out monitor.
//!
//! Events go to the children in insertion order. `search_command` returns
//! the first non-`Continue` answer, so put the strictest stop condition first.

use crate::{
    branching::decision::Decision,
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::StateView,
    stats::BnbSolverStatistics,
};
use partix_core::num::SolverNumeric;
use partix_model::{instance::Instance, partition::Partition};
use partix_search::monitor::search_monitor::SearchCommand;

pub struct CompositeTreeSearchMonitor<'a, T>
where
    T: SolverNumeric,
{
    monitors: Vec<Box<dyn TreeSearchMonitor<T> + 'a>>,
}

impl<'a, T> Default for CompositeTreeSearchMonitor<'a, T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeTreeSearchMonitor<'a, T>
where
    T: SolverNumeric,
{
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TreeSearchMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> std::fmt::Debug for CompositeTreeSearchMonitor<'a, T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.monitors.iter().map(|m| m.name()))
            .finish()
    }
}

impl<'a, T> FromIterator<Box<dyn TreeSearchMonitor<T> + 'a>> for CompositeTreeSearchMonitor<'a, T>
where
    T: SolverNumeric,
{
    fn from_iter<I: IntoIterator<Item = Box<dyn TreeSearchMonitor<T> + 'a>>>(iter: I) -> Self {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> TreeSearchMonitor<T> for CompositeTreeSearchMonitor<'a, T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, instance: &Instance<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_enter_search(instance, statistics);
        }
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_exit_search(statistics);
        }
    }

    fn search_command(
        &mut self,
        state: StateView<'_, T>,
        statistics: &BnbSolverStatistics<T>,
    ) -> SearchCommand {
        for monitor in self.monitors.iter_mut() {
            if let SearchCommand::Terminate(reason) = monitor.search_command(state, statistics) {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }

    fn on_step(&mut self, state: StateView<'_, T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_step(state, statistics);
        }
    }

    fn on_lower_bound_computed(
        &mut self,
        state: StateView<'_, T>,
        lower_bound: T,
        statistics: &BnbSolverStatistics<T>,
    ) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_lower_bound_computed(state, lower_bound, statistics);
        }
    }

    fn on_prune(
        &mut self,
        state: StateView<'_, T>,
        reason: PruneReason,
        statistics: &BnbSolverStatistics<T>,
    ) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_prune(state, reason, statistics);
        }
    }

    fn on_decisions_enqueued(
        &mut self,
        state: StateView<'_, T>,
        count: usize,
        statistics: &BnbSolverStatistics<T>,
    ) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_decisions_enqueued(state, count, statistics);
        }
    }

    fn on_descend(
        &mut self,
        state: StateView<'_, T>,
        decision: Decision,
        statistics: &BnbSolverStatistics<T>,
    ) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_descend(state, decision, statistics);
        }
    }

    fn on_backtrack(&mut self, state: StateView<'_, T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_backtrack(state, statistics);
        }
    }

    fn on_solution_found(&mut self, partition: &Partition<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_solution_found(partition, statistics);
        }
    }
}
