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

//! The interface concurrent strategies implement to run side by side.

use crate::{
    incumbent::SharedIncumbent,
    monitor::search_monitor::SearchMonitor,
    result::{SolverResult, TerminationReason},
};
use partix_core::num::SolverNumeric;
use partix_model::{instance::Instance, objective::Objective, partition::Partition};
use std::sync::atomic::AtomicBool;

/// Everything a strategy needs for one portfolio run.
pub struct PortfolioSolverContext<'a, T>
where
    T: SolverNumeric,
{
    pub instance: &'a Instance<T>,
    pub num_bins: usize,
    pub objective: &'a dyn Objective<T>,
    pub incumbent: &'a SharedIncumbent<T>,
    pub monitor: &'a mut dyn SearchMonitor<T>,
    pub stop: &'a AtomicBool,
}

impl<'a, T> PortfolioSolverContext<'a, T>
where
    T: SolverNumeric,
{
    #[inline(always)]
    pub fn new(
        instance: &'a Instance<T>,
        num_bins: usize,
        objective: &'a dyn Objective<T>,
        incumbent: &'a SharedIncumbent<T>,
        monitor: &'a mut dyn SearchMonitor<T>,
        stop: &'a AtomicBool,
    ) -> Self {
        Self {
            instance,
            num_bins,
            objective,
            incumbent,
            monitor,
            stop,
        }
    }
}

impl<'a, T> std::fmt::Debug for PortfolioSolverContext<'a, T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioSolverContext")
            .field("instance", &self.instance)
            .field("num_bins", &self.num_bins)
            .field("objective", &self.objective.name())
            .field("incumbent", &self.incumbent)
            .field("monitor", &self.monitor.name())
            .field("stop", &self.stop)
            .finish()
    }
}

impl<'a, T> std::fmt::Display for PortfolioSolverContext<'a, T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PortfolioSolverContext(instance: {}, bins: {}, objective: {}, monitor: {})",
            self.instance,
            self.num_bins,
            self.objective.name(),
            self.monitor.name(),
        )
    }
}

/// The outcome of one strategy inside a portfolio run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioSolverResult<T> {
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    nodes_explored: u64,
}

impl<T> PortfolioSolverResult<T> {
    #[inline]
    pub fn optimal(partition: Partition<T>) -> Self {
        Self {
            result: SolverResult::Optimal(partition),
            termination_reason: TerminationReason::OptimalityProven,
            nodes_explored: 0,
        }
    }

    #[inline]
    pub fn infeasible() -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            nodes_explored: 0,
        }
    }

    /// An aborted run: `Feasible` with a partition, `Unknown` without one.
    #[inline]
    pub fn aborted<R>(partition: Option<Partition<T>>, reason: R) -> Self
    where
        R: Into<String>,
    {
        let result = match partition {
            Some(partition) => SolverResult::Feasible(partition),
            None => SolverResult::Unknown,
        };

        Self {
            result,
            termination_reason: TerminationReason::Aborted(reason.into()),
            nodes_explored: 0,
        }
    }

    /// Records how much work the strategy did.
    #[inline]
    pub fn with_nodes_explored(mut self, nodes_explored: u64) -> Self {
        self.nodes_explored = nodes_explored;
        self
    }

    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored
    }

    #[inline]
    pub fn into_parts(self) -> (SolverResult<T>, TerminationReason) {
        (self.result, self.termination_reason)
    }
}

impl<T> std::fmt::Display for PortfolioSolverResult<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PortfolioSolverResult(result: {}, termination_reason: {})",
            self.result, self.termination_reason
        )
    }
}

/// A strategy that can take part in a portfolio run.
pub trait PortfolioSolver<T>: Send
where
    T: SolverNumeric,
{
    fn solve<'a>(&mut self, context: PortfolioSolverContext<'a, T>) -> PortfolioSolverResult<T>;
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aborted_without_partition_is_unknown() {
        let result = PortfolioSolverResult::<i64>::aborted(None, "time limit reached");
        assert_eq!(result.result(), &SolverResult::Unknown);
        assert_eq!(
            result.termination_reason(),
            &TerminationReason::Aborted("time limit reached".to_string())
        );
    }

    #[test]
    fn test_aborted_with_partition_is_feasible() {
        let partition = Partition::new(7i64, vec![5, 7], None);
        let result = PortfolioSolverResult::aborted(Some(partition.clone()), "interrupt")
            .with_nodes_explored(12);
        assert_eq!(result.result(), &SolverResult::Feasible(partition));
        assert_eq!(result.nodes_explored(), 12);
    }

    #[test]
    fn test_optimal_and_infeasible() {
        let partition = Partition::new(7i64, vec![5, 7], None);
        let (result, reason) = PortfolioSolverResult::optimal(partition).into_parts();
        assert!(matches!(result, SolverResult::Optimal(_)));
        assert_eq!(reason, TerminationReason::OptimalityProven);
        assert_eq!(
            PortfolioSolverResult::<i64>::infeasible().termination_reason(),
            &TerminationReason::InfeasibilityProven
        );
    }
}
