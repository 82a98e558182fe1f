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

//! Stops the search after a number of improving solutions.

use crate::{
    monitor::tree_search_monitor::TreeSearchMonitor, state::StateView,
    stats::BnbSolverStatistics,
};
use partix_core::num::SolverNumeric;
use partix_model::{instance::Instance, partition::Partition};
use partix_search::monitor::search_monitor::SearchCommand;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionLimitMonitor<T> {
    solution_limit: u64,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> SolutionLimitMonitor<T> {
    pub fn new(solution_limit: u64) -> Self {
        Self {
            solution_limit,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> TreeSearchMonitor<T> for SolutionLimitMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "SolutionLimitMonitor"
    }

    fn on_enter_search(&mut self, _instance: &Instance<T>, _statistics: &BnbSolverStatistics<T>) {}

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {}

    fn search_command(
        &mut self,
        _state: StateView<'_, T>,
        statistics: &BnbSolverStatistics<T>,
    ) -> SearchCommand {
        if statistics.solutions_found >= self.solution_limit {
            SearchCommand::Terminate("solution limit reached".to_string())
        } else {
            SearchCommand::Continue
        }
    }

    fn on_step(&mut self, _state: StateView<'_, T>, _statistics: &BnbSolverStatistics<T>) {}

    fn on_solution_found(
        &mut self,
        _partition: &Partition<T>,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }
}
