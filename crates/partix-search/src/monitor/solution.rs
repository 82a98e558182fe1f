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

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use partix_core::num::SolverNumeric;
use partix_model::{instance::Instance, partition::Partition};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counts improving partitions into a shared counter and optionally stops
/// the search once a global limit is reached.
#[derive(Debug)]
pub struct SolutionMonitor<'a, T> {
    solutions_found: &'a AtomicU64,
    solution_limit: Option<u64>,
    _phantom: std::marker::PhantomData<T>,
}

impl<'a, T> SolutionMonitor<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn new(solutions_found: &'a AtomicU64, solution_limit: Option<u64>) -> Self {
        Self {
            solutions_found,
            solution_limit,
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn with_limit(solutions_found: &'a AtomicU64, limit: u64) -> Self {
        Self::new(solutions_found, Some(limit))
    }

    #[inline]
    pub fn without_limit(solutions_found: &'a AtomicU64) -> Self {
        Self::new(solutions_found, None)
    }

    #[inline]
    fn reached_limit(&self) -> bool {
        match self.solution_limit {
            Some(limit) => self.solutions_found.load(Ordering::Relaxed) >= limit,
            None => false,
        }
    }
}

impl<'a, T> SearchMonitor<T> for SolutionMonitor<'a, T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "SolutionMonitor"
    }

    fn on_enter_search(&mut self, _instance: &Instance<T>) {}

    fn on_exit_search(&mut self) {}

    fn on_solution_found(&mut self, _partition: &Partition<T>) {
        self.solutions_found.fetch_add(1, Ordering::Relaxed);
    }

    fn on_step(&mut self) {}

    fn search_command(&self) -> SearchCommand {
        if self.reached_limit() {
            SearchCommand::Terminate("global solution limit reached".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partition() -> Partition<i64> {
        Partition::new(3, vec![3], None)
    }

    #[test]
    fn test_counts_solutions_without_limit() {
        let counter = AtomicU64::new(0);
        let mut monitor = SolutionMonitor::<i64>::without_limit(&counter);
        for _ in 0..5 {
            monitor.on_solution_found(&partition());
        }
        assert_eq!(counter.load(Ordering::Relaxed), 5);
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_terminates_at_limit_shared_between_monitors() {
        let counter = AtomicU64::new(0);
        let mut first = SolutionMonitor::<i64>::with_limit(&counter, 2);
        let mut second = SolutionMonitor::<i64>::with_limit(&counter, 2);

        first.on_solution_found(&partition());
        assert_eq!(second.search_command(), SearchCommand::Continue);

        second.on_solution_found(&partition());
        assert_eq!(
            first.search_command(),
            SearchCommand::Terminate("global solution limit reached".to_string())
        );
    }
}
