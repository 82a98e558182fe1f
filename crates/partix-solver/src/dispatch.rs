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

//! # Partition Requests
//!
//! One entry point over every strategy of the workspace. A
//! [`PartitionRequest`] names the bin count, the objective, the strategy,
//! the output shape and an optional time budget; `partition` turns the
//! caller's [`Items`] into an instance, runs the strategy on the bin
//! representation the output needs and projects the answer.
//!
//! A search stopped before it found any partition falls back to the greedy
//! construction, so a successful request always carries a partition. The
//! termination reason of the search is kept.
//!
//! ```rust
//! use partix_model::objective::MinimizeDifference;
//! use partix_solver::{
//!     dispatch::{PartitionRequest, Strategy},
//!     items::Items,
//!     output::{OutputKind, PartitionOutput},
//! };
//!
//! let items = Items::from_values(vec![4i64, 5, 6, 7, 8]);
//! let result = PartitionRequest::new(2)
//!     .with_objective(MinimizeDifference)
//!     .with_strategy(Strategy::DynamicProgramming)
//!     .with_output(OutputKind::SortedSums)
//!     .partition(&items)
//!     .unwrap();
//!
//! assert!(result.is_optimal());
//! assert_eq!(result.output(), &PartitionOutput::SortedSums(vec![15, 15]));
//! ```

use crate::{
    error::PartitionError,
    greedy::greedy_partition,
    items::Items,
    output::{OutputKind, PartitionOutput},
    solver::SolverBuilder,
};
use partix_bnb::{
    bnb::{BnbConfig, BnbSolver},
    branching::greedy::CompleteGreedyBuilder,
    monitor::{composite::CompositeTreeSearchMonitor, time::TimeLimitMonitor as TreeTimeLimitMonitor},
    portfolio::BnbPortfolioSolver,
};
use partix_core::num::SolverNumeric;
use partix_dp::{
    dp::{DpConfig, DpSolver},
    portfolio::DpPortfolioSolver,
};
use partix_model::{
    bins::{BinStore, ContentBins, SumBins},
    instance::Instance,
    objective::{MinimizeLargestSum, Objective},
    partition::Partition,
};
use partix_search::{
    monitor::{composite::CompositeMonitor, time_limit::TimeLimitMonitor},
    portfolio::PortfolioSolverResult,
    result::{SolverResult, TerminationReason},
};
use std::time::{Duration, Instant};

/// The search a request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// The anytime branch-and-bound search.
    #[default]
    BranchAndBound,
    /// The exact dynamic programming search.
    DynamicProgramming,
    /// A single largest-first pass.
    Greedy,
    /// Branch-and-bound and dynamic programming in parallel threads.
    Portfolio,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::BranchAndBound => "BranchAndBound",
            Self::DynamicProgramming => "DynamicProgramming",
            Self::Greedy => "Greedy",
            Self::Portfolio => "Portfolio",
        };
        f.write_str(name)
    }
}

/// The answer to a [`PartitionRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionResult<T> {
    output: PartitionOutput<T>,
    partition: Partition<T>,
    termination_reason: TerminationReason,
    optimal: bool,
    strategy: Strategy,
}

impl<T> PartitionResult<T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn output(&self) -> &PartitionOutput<T> {
        &self.output
    }

    #[inline]
    pub fn into_output(self) -> PartitionOutput<T> {
        self.output
    }

    /// The partition in the search's native representation.
    #[inline]
    pub fn partition(&self) -> &Partition<T> {
        &self.partition
    }

    #[inline]
    pub fn objective_value(&self) -> T {
        self.partition.objective_value()
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Whether the objective value is proven optimal.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        self.optimal
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}

impl<T> std::fmt::Display for PartitionResult<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} ({}, objective {}, {})",
            if self.optimal { "Optimal" } else { "Best found" },
            self.strategy,
            self.partition.objective_value(),
            self.termination_reason
        )?;
        write!(f, "{}", self.output)
    }
}

/// Describes one partitioning job.
pub struct PartitionRequest<T>
where
    T: SolverNumeric,
{
    num_bins: usize,
    strategy: Strategy,
    objective: Box<dyn Objective<T>>,
    output: OutputKind,
    time_limit: Option<Duration>,
    deadline: Option<Instant>,
    bnb_config: BnbConfig,
    dp_config: DpConfig,
}

impl<T> std::fmt::Debug for PartitionRequest<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartitionRequest")
            .field("num_bins", &self.num_bins)
            .field("strategy", &self.strategy)
            .field("objective", &self.objective.name())
            .field("output", &self.output)
            .field("time_limit", &self.time_limit)
            .field("deadline", &self.deadline)
            .field("bnb_config", &self.bnb_config)
            .field("dp_config", &self.dp_config)
            .finish()
    }
}

impl<T> PartitionRequest<T>
where
    T: SolverNumeric,
{
    /// A request for `num_bins` bins minimizing the largest sum with the
    /// branch-and-bound search and no time limit.
    pub fn new(num_bins: usize) -> Self {
        Self {
            num_bins,
            strategy: Strategy::default(),
            objective: Box::new(MinimizeLargestSum),
            output: OutputKind::default(),
            time_limit: None,
            deadline: None,
            bnb_config: BnbConfig::default(),
            dp_config: DpConfig::default(),
        }
    }

    #[inline]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[inline]
    pub fn with_objective<O>(mut self, objective: O) -> Self
    where
        O: Objective<T> + 'static,
    {
        self.objective = Box::new(objective);
        self
    }

    #[inline]
    pub fn with_objective_boxed(mut self, objective: Box<dyn Objective<T>>) -> Self {
        self.objective = objective;
        self
    }

    #[inline]
    pub fn with_output(mut self, output: OutputKind) -> Self {
        self.output = output;
        self
    }

    /// Limits the search to `limit`, measured from the start of `partition`.
    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[inline]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[inline]
    pub fn with_bnb_config(mut self, config: BnbConfig) -> Self {
        self.bnb_config = config;
        self
    }

    #[inline]
    pub fn with_dp_config(mut self, config: DpConfig) -> Self {
        self.dp_config = config;
        self
    }

    #[inline]
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[inline]
    pub fn objective(&self) -> &dyn Objective<T> {
        self.objective.as_ref()
    }

    #[inline]
    pub fn output(&self) -> OutputKind {
        self.output
    }

    /// Partitions `items` as this request describes.
    ///
    /// # Errors
    ///
    /// Returns an error for zero bins, for negative or overflowing item
    /// values, for an objective tied to a different bin count, and when the
    /// dynamic programming strategy exceeds its state budget.
    pub fn partition(&self, items: &Items<T>) -> Result<PartitionResult<T>, PartitionError<T>> {
        if self.num_bins == 0 {
            return Err(PartitionError::ZeroBins);
        }
        if let Some(weights) = self.objective.expected_num_bins() {
            if weights != self.num_bins {
                return Err(PartitionError::WeightCountMismatch {
                    weights,
                    bins: self.num_bins,
                });
            }
        }

        let instance = Instance::new(items.values().to_vec())?;
        self.objective
            .check_range(self.num_bins, instance.total_value())?;
        let deadline = self.effective_deadline(Instant::now());
        log::debug!(
            "partition request: {} into {} bins, strategy {}, objective {}, contents {}",
            instance,
            self.num_bins,
            self.strategy,
            self.objective.name(),
            self.output.needs_contents()
        );

        let result = if self.output.needs_contents() {
            self.run::<ContentBins<T>>(items, &instance, deadline)?
        } else {
            self.run::<SumBins<T>>(items, &instance, deadline)?
        };

        log::info!(
            "partition request finished with {}: objective {} ({})",
            self.strategy,
            result.objective_value(),
            result.termination_reason()
        );
        Ok(result)
    }

    fn effective_deadline(&self, start_time: Instant) -> Option<Instant> {
        let relative = self.time_limit.map(|limit| start_time + limit);
        match (relative, self.deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn run<B>(
        &self,
        items: &Items<T>,
        instance: &Instance<T>,
        deadline: Option<Instant>,
    ) -> Result<PartitionResult<T>, PartitionError<T>>
    where
        B: BinStore<T> + 'static,
    {
        let objective = self.objective.as_ref();
        let (result, reason) = match self.strategy {
            Strategy::Greedy => {
                let partition = greedy_partition::<T, B, _>(instance, self.num_bins, objective);
                let reason = TerminationReason::Aborted("greedy construction finished".to_string());
                (SolverResult::Feasible(partition), reason)
            }
            Strategy::BranchAndBound => {
                let mut monitor = CompositeTreeSearchMonitor::with_capacity(1);
                if let Some(deadline) = deadline {
                    monitor.add_monitor(TreeTimeLimitMonitor::with_deadline(deadline));
                }
                let outcome = BnbSolver::<T, B>::with_config(self.bnb_config).solve(
                    instance,
                    self.num_bins,
                    objective,
                    &mut CompleteGreedyBuilder::preallocated(self.num_bins),
                    monitor,
                );
                PortfolioSolverResult::from(outcome).into_parts()
            }
            Strategy::DynamicProgramming => {
                let mut monitor = CompositeMonitor::with_capacity(1);
                if let Some(deadline) = deadline {
                    monitor.add_monitor(TimeLimitMonitor::with_deadline(deadline));
                }
                let outcome = DpSolver::<T, B>::with_config(self.dp_config).solve(
                    instance,
                    self.num_bins,
                    objective,
                    &mut monitor,
                )?;
                PortfolioSolverResult::from(outcome).into_parts()
            }
            Strategy::Portfolio => {
                let mut builder = SolverBuilder::<T>::new()
                    .add_solver(BnbPortfolioSolver::<T, B, _>::with_config(
                        CompleteGreedyBuilder::preallocated(self.num_bins),
                        self.bnb_config,
                    ))
                    .add_solver(DpPortfolioSolver::<T, B>::with_config(self.dp_config));
                if let Some(deadline) = deadline {
                    builder = builder.with_deadline(deadline);
                }
                let outcome = builder.build().solve(instance, self.num_bins, objective);
                (outcome.result, outcome.reason)
            }
        };

        let (partition, optimal) = match result {
            SolverResult::Optimal(partition) => (partition, true),
            SolverResult::Feasible(partition) => (partition, false),
            SolverResult::Infeasible | SolverResult::Unknown => {
                log::debug!(
                    "{} stopped without a partition ({}), falling back to greedy",
                    self.strategy,
                    reason
                );
                (greedy_partition::<T, B, _>(instance, self.num_bins, objective), false)
            }
        };

        Ok(PartitionResult {
            output: PartitionOutput::project(self.output, &partition, items),
            partition,
            termination_reason: reason,
            optimal,
            strategy: self.strategy,
        })
    }
}
