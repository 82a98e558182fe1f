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

//! # Portfolio Solver
//!
//! Runs several partitioning strategies side by side on the same instance.
//! Every strategy gets its own thread (`std::thread::scope`), they share one
//! `SharedIncumbent<T>` so bounds found by one prune the others, and the
//! first strategy to prove optimality raises the stop flag for the rest.
//!
//! Global limits are enforced through a `CompositeMonitor<T>` built per
//! thread: a `SolutionMonitor` over a shared counter, and a
//! `TimeLimitMonitor` on a deadline computed once so all threads stop at the
//! same instant.
//!
//! ```rust
//! use partix_bnb::{branching::greedy::CompleteGreedyBuilder, portfolio::BnbPortfolioSolver};
//! use partix_dp::portfolio::DpPortfolioSolver;
//! use partix_model::{bins::SumBins, instance::Instance, objective::MinimizeLargestSum};
//! use partix_solver::solver::SolverBuilder;
//!
//! let instance = Instance::new(vec![8i64, 7, 6, 5, 4]).unwrap();
//! let mut solver = SolverBuilder::<i64>::new()
//!     .add_solver(BnbPortfolioSolver::<i64, SumBins<i64>, _>::new(CompleteGreedyBuilder::new()))
//!     .add_solver(DpPortfolioSolver::<i64, SumBins<i64>>::new())
//!     .build();
//!
//! let outcome = solver.solve(&instance, 2, &MinimizeLargestSum);
//! assert!(outcome.is_optimal());
//! assert_eq!(outcome.partition().map(|p| p.objective_value()), Some(15));
//! ```

use partix_core::num::SolverNumeric;
use partix_model::{instance::Instance, objective::Objective, partition::Partition};
use partix_search::{
    incumbent::SharedIncumbent,
    monitor::{
        composite::CompositeMonitor, solution::SolutionMonitor, time_limit::TimeLimitMonitor,
    },
    portfolio::{PortfolioSolver, PortfolioSolverContext, PortfolioSolverResult},
    result::{SolverOutcome, SolverResult, TerminationReason},
    stats::{SolverStatistics, SolverStatisticsBuilder},
};
use std::{
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    time::{Duration, Instant},
};

pub struct Solver<'a, T>
where
    T: SolverNumeric,
{
    portfolio_solver: Vec<Box<dyn PortfolioSolver<T> + 'a>>,
    incumbent: SharedIncumbent<T>,
    global_solution_count: AtomicU64,
    /// Raised when a strategy proves optimality.
    stop_signal: AtomicBool,
    solution_limit: Option<u64>,
    time_limit: Option<Duration>,
    deadline: Option<Instant>,
}

impl<'a, T> std::fmt::Debug for Solver<'a, T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.portfolio_solver.iter().map(|s| s.name()).collect();
        f.debug_struct("Solver")
            .field("portfolio_solver", &names)
            .field("incumbent", &self.incumbent)
            .field("solution_limit", &self.solution_limit)
            .field("time_limit", &self.time_limit)
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl<'a, T> Solver<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn add_solver<S>(&mut self, solver: S)
    where
        S: PortfolioSolver<T> + 'a,
    {
        self.portfolio_solver.push(Box::new(solver));
    }

    #[inline]
    pub fn add_solver_boxed(&mut self, solver: Box<dyn PortfolioSolver<T> + 'a>) {
        self.portfolio_solver.push(solver);
    }

    #[inline]
    pub fn num_solvers(&self) -> usize {
        self.portfolio_solver.len()
    }

    #[inline]
    pub fn incumbent(&self) -> &SharedIncumbent<T> {
        &self.incumbent
    }

    #[inline]
    pub fn solution_limit(&self) -> Option<u64> {
        self.solution_limit
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Runs every strategy on `instance` and returns the best outcome.
    ///
    /// The incumbent is kept between calls on the same instance, so a second
    /// call starts from the best partition the first one found.
    ///
    /// # Panics
    ///
    /// Panics if no strategy was added, and re-raises the panic of a
    /// strategy thread.
    pub fn solve(
        &mut self,
        instance: &Instance<T>,
        num_bins: usize,
        objective: &dyn Objective<T>,
    ) -> SolverOutcome<T> {
        assert!(
            !self.portfolio_solver.is_empty(),
            "called `Solver::solve` with no portfolio solvers added"
        );

        let start_time = Instant::now();

        self.stop_signal.store(false, Ordering::Relaxed);
        self.global_solution_count.store(0, Ordering::Relaxed);

        let deadline = self.effective_deadline(start_time);
        let results = self.run_portfolio_parallel(instance, num_bins, objective, deadline);

        let outcome = self.construct_outcome(start_time, results);
        log::info!(
            "portfolio of {} strategies finished: {} ({})",
            self.portfolio_solver.len(),
            outcome.result,
            outcome.reason
        );
        outcome
    }

    fn effective_deadline(&self, start_time: Instant) -> Option<Instant> {
        let relative = self.time_limit.map(|limit| start_time + limit);
        match (relative, self.deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn run_portfolio_parallel(
        &mut self,
        instance: &Instance<T>,
        num_bins: usize,
        objective: &dyn Objective<T>,
        deadline: Option<Instant>,
    ) -> Vec<PortfolioSolverResult<T>> {
        let solution_limit = self.solution_limit;
        let incumbent = &self.incumbent;
        let global_solution_count = &self.global_solution_count;
        let stop_signal = &self.stop_signal;

        let mut results = Vec::with_capacity(self.portfolio_solver.len());

        std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(self.portfolio_solver.len());

            for solver in &mut self.portfolio_solver {
                let handle = scope.spawn(move || {
                    let mut monitor = CompositeMonitor::<T>::with_capacity(2);
                    monitor.add_monitor(SolutionMonitor::new(global_solution_count, solution_limit));
                    if let Some(deadline) = deadline {
                        monitor.add_monitor(TimeLimitMonitor::with_deadline(deadline));
                    }

                    let context = PortfolioSolverContext::new(
                        instance,
                        num_bins,
                        objective,
                        incumbent,
                        &mut monitor,
                        stop_signal,
                    );
                    let result = solver.solve(context);

                    if matches!(result.result(), SolverResult::Optimal(_)) {
                        log::info!(
                            "portfolio solver '{}' proved optimality, signaling stop to the others",
                            solver.name()
                        );
                        stop_signal.store(true, Ordering::Relaxed);
                    } else {
                        log::debug!(
                            "portfolio solver '{}' finished: {}",
                            solver.name(),
                            result.termination_reason()
                        );
                    }

                    result
                });
                handles.push(handle);
            }

            for handle in handles {
                results.push(
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload)),
                );
            }
        });

        results
    }

    /// The best partition among the thread results and the shared incumbent.
    fn find_best_solution(&self, results: &[PortfolioSolverResult<T>]) -> Option<Partition<T>> {
        let thread_solutions = results.iter().filter_map(|r| r.result().partition());
        let incumbent_snapshot = self.incumbent.snapshot();

        thread_solutions
            .chain(incumbent_snapshot.as_ref())
            .min_by_key(|p| p.objective_value())
            .cloned()
    }

    fn build_statistics(
        &self,
        start_time: Instant,
        results: &[PortfolioSolverResult<T>],
    ) -> SolverStatistics {
        SolverStatisticsBuilder::new()
            .solutions_found(self.global_solution_count.load(Ordering::Relaxed))
            .used_threads(results.len())
            .nodes_explored(results.iter().map(|r| r.nodes_explored()).sum())
            .solve_duration(start_time.elapsed())
            .build()
    }

    fn construct_outcome(
        &self,
        start_time: Instant,
        results: Vec<PortfolioSolverResult<T>>,
    ) -> SolverOutcome<T> {
        let stats = self.build_statistics(start_time, &results);
        let best_solution = self.find_best_solution(&results);
        let optimality_proven = results
            .iter()
            .any(|r| matches!(r.result(), SolverResult::Optimal(_)));

        // Optimal > Feasible > Infeasible > Unknown.
        if let Some(partition) = best_solution {
            if optimality_proven {
                return SolverOutcome::optimal(partition, stats);
            }
            let reason = self.determine_abort_reason(&results);
            return SolverOutcome::feasible(partition, reason, stats);
        }

        if results
            .iter()
            .any(|r| matches!(r.result(), SolverResult::Infeasible))
        {
            return SolverOutcome::infeasible(stats);
        }

        let reason = self.determine_abort_reason(&results);
        SolverOutcome::unknown(reason, stats)
    }

    fn determine_abort_reason(&self, results: &[PortfolioSolverResult<T>]) -> String {
        if let Some(msg) = results.iter().find_map(|res| match res.termination_reason() {
            TerminationReason::Aborted(msg) => Some(msg.clone()),
            _ => None,
        }) {
            return msg;
        }

        if self.stop_signal.load(Ordering::Relaxed) {
            return "external interrupt".to_string();
        }

        "search space exhausted without proof".to_string()
    }
}

pub struct SolverBuilder<'a, T>
where
    T: SolverNumeric,
{
    portfolio_solver: Vec<Box<dyn PortfolioSolver<T> + 'a>>,
    solution_limit: Option<u64>,
    time_limit: Option<Duration>,
    deadline: Option<Instant>,
}

impl<'a, T> Default for SolverBuilder<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> SolverBuilder<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            portfolio_solver: Vec::new(),
            solution_limit: None,
            time_limit: None,
            deadline: None,
        }
    }

    #[inline]
    pub fn with_solution_limit(mut self, limit: u64) -> Self {
        self.solution_limit = Some(limit);
        self
    }

    /// Limits every `solve` call to `limit`, measured from its start.
    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Stops every `solve` call at `deadline`. Combined with a time limit,
    /// whichever comes first applies.
    #[inline]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[inline]
    pub fn add_solver<S>(mut self, solver: S) -> Self
    where
        S: PortfolioSolver<T> + 'a,
    {
        self.portfolio_solver.push(Box::new(solver));
        self
    }

    #[inline]
    pub fn add_solver_boxed(mut self, solver: Box<dyn PortfolioSolver<T> + 'a>) -> Self {
        self.portfolio_solver.push(solver);
        self
    }

    #[inline]
    pub fn build(self) -> Solver<'a, T> {
        Solver {
            portfolio_solver: self.portfolio_solver,
            incumbent: SharedIncumbent::new(),
            global_solution_count: AtomicU64::new(0),
            stop_signal: AtomicBool::new(false),
            solution_limit: self.solution_limit,
            time_limit: self.time_limit,
            deadline: self.deadline,
        }
    }
}
