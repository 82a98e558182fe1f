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

use crate::{
    bnb::{BnbConfig, BnbSolver},
    branching::decision::DecisionBuilder,
    monitor::{composite::CompositeTreeSearchMonitor, wrapper::WrapperMonitor},
};
use partix_core::num::SolverNumeric;
use partix_model::bins::BinStore;
use partix_search::{
    monitor::interrupt::InterruptMonitor,
    portfolio::{PortfolioSolver, PortfolioSolverContext, PortfolioSolverResult},
};

/// Runs the branch-and-bound search as one strategy of a portfolio.
///
/// The search answers to the portfolio's stop flag and shares its incumbent.
#[derive(Debug, Clone)]
pub struct BnbPortfolioSolver<T, B, D>
where
    T: SolverNumeric,
    B: BinStore<T>,
    D: DecisionBuilder<T, B>,
{
    inner: BnbSolver<T, B>,
    decision_builder: D,
}

impl<T, B, D> BnbPortfolioSolver<T, B, D>
where
    T: SolverNumeric,
    B: BinStore<T>,
    D: DecisionBuilder<T, B>,
{
    #[inline]
    pub fn new(decision_builder: D) -> Self {
        Self {
            inner: BnbSolver::new(),
            decision_builder,
        }
    }

    #[inline]
    pub fn with_config(decision_builder: D, config: BnbConfig) -> Self {
        Self {
            inner: BnbSolver::with_config(config),
            decision_builder,
        }
    }

    #[inline]
    pub fn preallocated(num_bins: usize, num_items: usize, decision_builder: D) -> Self {
        Self {
            inner: BnbSolver::preallocated(num_bins, num_items),
            decision_builder,
        }
    }

    #[inline]
    pub fn inner(&self) -> &BnbSolver<T, B> {
        &self.inner
    }

    #[inline]
    pub fn decision_builder(&self) -> &D {
        &self.decision_builder
    }
}

impl<T, B, D> PortfolioSolver<T> for BnbPortfolioSolver<T, B, D>
where
    T: SolverNumeric,
    B: BinStore<T>,
    D: DecisionBuilder<T, B> + Send,
{
    fn solve<'a>(&mut self, context: PortfolioSolverContext<'a, T>) -> PortfolioSolverResult<T> {
        let mut interrupt = InterruptMonitor::new(context.stop);
        let mut monitor = CompositeTreeSearchMonitor::with_capacity(2);
        monitor.add_monitor(WrapperMonitor::new(&mut interrupt));
        monitor.add_monitor(WrapperMonitor::new(context.monitor));

        let outcome = self.inner.solve_with_incumbent(
            context.instance,
            context.num_bins,
            context.objective,
            &mut self.decision_builder,
            monitor,
            context.incumbent,
        );

        outcome.into()
    }

    fn name(&self) -> &str {
        "BnbPortfolioSolver"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::greedy::CompleteGreedyBuilder;
    use partix_model::{
        bins::{ContentBins, SumBins},
        instance::Instance,
        objective::MinimizeLargestSum,
    };
    use partix_search::{
        incumbent::SharedIncumbent,
        monitor::search_monitor::NoOperationSearchMonitor,
        result::{SolverResult, TerminationReason},
    };
    use std::sync::atomic::AtomicBool;

    type I = i64;

    #[test]
    fn test_portfolio_bnb_solver_finds_optimal_solution() {
        let instance = Instance::new(vec![46i64, 39, 27, 26, 16, 13, 10]).unwrap();
        let incumbent = SharedIncumbent::<I>::new();
        let stop = AtomicBool::new(false);
        let mut monitor = NoOperationSearchMonitor;

        let mut solver = BnbPortfolioSolver::<I, ContentBins<I>, _>::preallocated(
            3,
            instance.num_items(),
            CompleteGreedyBuilder::new(),
        );
        let context = PortfolioSolverContext::new(
            &instance,
            3,
            &MinimizeLargestSum,
            &incumbent,
            &mut monitor,
            &stop,
        );
        let result = solver.solve(context);

        match result.result() {
            SolverResult::Optimal(partition) => {
                assert_eq!(partition.sums(), &[53, 62, 62]);
                assert_eq!(partition.verify(&instance), Ok(()));
            }
            other => panic!("expected Optimal, got {}", other),
        }
        assert_eq!(result.termination_reason(), &TerminationReason::OptimalityProven);
        assert!(result.nodes_explored() > 0);
        assert_eq!(incumbent.upper_bound(), 62);
    }

    #[test]
    fn test_portfolio_bnb_solver_honours_stop_flag() {
        let instance = Instance::new((1..=30).map(|v| v * 37 % 101).collect::<Vec<I>>()).unwrap();
        let incumbent = SharedIncumbent::<I>::new();
        let stop = AtomicBool::new(true);
        let mut monitor = NoOperationSearchMonitor;

        let mut solver = BnbPortfolioSolver::<I, SumBins<I>, _>::new(CompleteGreedyBuilder::new());
        let context = PortfolioSolverContext::new(
            &instance,
            5,
            &MinimizeLargestSum,
            &incumbent,
            &mut monitor,
            &stop,
        );
        let result = solver.solve(context);

        assert_eq!(result.result(), &SolverResult::Unknown);
        assert_eq!(
            result.termination_reason(),
            &TerminationReason::Aborted("Interrupt signal received".to_string())
        );
    }
}
