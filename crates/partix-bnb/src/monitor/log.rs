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
    branching::decision::Decision, monitor::tree_search_monitor::TreeSearchMonitor,
    state::StateView, stats::BnbSolverStatistics,
};
use partix_core::num::SolverNumeric;
use partix_model::{instance::Instance, partition::Partition};
use std::time::{Duration, Instant};

/// Emits a progress table through the `log` facade at `info` level.
///
/// A row is written at most once per `log_interval`, and the clock is only
/// read when `nodes_explored & clock_check_mask == 0`.
#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_objective: Option<T>,
}

impl<T> LogTreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_objective: None,
        }
    }

    /// Returns the key of the last solution reported to the monitor.
    #[inline]
    pub fn best_objective(&self) -> Option<T> {
        self.best_objective
    }

    fn log_header(&self) {
        log::info!(
            "{:<9} | {:<14} | {:<7} | {:<14} | {:<14} | {:<10} | {:<12}",
            "Elapsed",
            "Nodes",
            "Depth",
            "Best",
            "Largest Sum",
            "Backtracks",
            "Pruned"
        );
        log::info!("{}", "-".repeat(96));
    }

    fn log_line(&mut self, state: StateView<'_, T>, stats: &BnbSolverStatistics<T>) {
        let now = Instant::now();
        let elapsed = format!("{:.1}s", now.duration_since(self.start_time).as_secs_f32());
        let best = match self.best_objective {
            Some(best) => best.to_string(),
            None => "Inf".to_string(),
        };
        let pruned = stats
            .prunings_bound
            .saturating_add(stats.prunings_duplicate);

        log::info!(
            "{:<9} | {:<14} | {:<7} | {:<14} | {:<14} | {:<10} | {:<12}",
            elapsed,
            stats.nodes_explored,
            state.depth,
            best,
            state.largest_sum(),
            stats.backtracks,
            pruned
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogTreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 0xFFF)
    }
}

impl<T> std::fmt::Display for LogTreeSearchMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {:?}, clock_check_mask: {:#x})",
            self.log_interval, self.clock_check_mask
        )
    }
}

impl<T> TreeSearchMonitor<T> for LogTreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, instance: &Instance<T>, _statistics: &BnbSolverStatistics<T>) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_objective = None;
        log::info!("Branch-and-bound search on {}", instance);
        self.log_header();
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        log::info!("{}", "-".repeat(96));
        log::info!(
            "Search finished after {} nodes in {:.2?}",
            statistics.nodes_explored,
            statistics.time_total
        );
    }

    fn on_step(&mut self, _state: StateView<'_, T>, _statistics: &BnbSolverStatistics<T>) {}

    fn on_descend(
        &mut self,
        state: StateView<'_, T>,
        _decision: Decision,
        statistics: &BnbSolverStatistics<T>,
    ) {
        if statistics.nodes_explored & self.clock_check_mask == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(state, statistics);
        }
    }

    fn on_solution_found(&mut self, partition: &Partition<T>, statistics: &BnbSolverStatistics<T>) {
        self.best_objective = Some(partition.objective_value());
        log::info!(
            "New incumbent {} after {} nodes",
            partition.objective_value(),
            statistics.nodes_explored
        );
    }
}
