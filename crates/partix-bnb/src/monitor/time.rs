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
    monitor::tree_search_monitor::TreeSearchMonitor, state::StateView,
    stats::BnbSolverStatistics,
};
use partix_core::num::SolverNumeric;
use partix_model::{instance::Instance, partition::Partition};
use partix_search::monitor::search_monitor::SearchCommand;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Limit {
    /// Measured from `on_enter_search`.
    Relative(Duration),
    Deadline(Instant),
}

/// Stops the search once a wall-clock budget is spent or a deadline passed.
///
/// The clock is read only on steps where `steps & clock_check_mask == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor<T> {
    start_time: Instant,
    limit: Limit,
    clock_check_mask: u64,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> TimeLimitMonitor<T> {
    /// Checks the clock every 16384 steps.
    pub const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x3FFF;

    pub fn new(time_limit: Duration) -> Self {
        Self::with_clock_check_mask(time_limit, Self::DEFAULT_STEP_CLOCK_CHECK_MASK)
    }

    pub fn with_clock_check_mask(time_limit: Duration, mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            limit: Limit::Relative(time_limit),
            clock_check_mask: mask,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Stops at an absolute point in time.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self::with_deadline_and_mask(deadline, Self::DEFAULT_STEP_CLOCK_CHECK_MASK)
    }

    pub fn with_deadline_and_mask(deadline: Instant, mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            limit: Limit::Deadline(deadline),
            clock_check_mask: mask,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns the relative budget, or `None` for a deadline monitor.
    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        match self.limit {
            Limit::Relative(limit) => Some(limit),
            Limit::Deadline(_) => None,
        }
    }

    #[inline]
    fn expired(&self) -> bool {
        match self.limit {
            Limit::Relative(limit) => self.start_time.elapsed() >= limit,
            Limit::Deadline(deadline) => Instant::now() >= deadline,
        }
    }
}

impl<T> TreeSearchMonitor<T> for TimeLimitMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _instance: &Instance<T>, _statistics: &BnbSolverStatistics<T>) {
        self.start_time = Instant::now();
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {}

    fn search_command(
        &mut self,
        _state: StateView<'_, T>,
        statistics: &BnbSolverStatistics<T>,
    ) -> SearchCommand {
        if statistics.steps & self.clock_check_mask == 0 && self.expired() {
            SearchCommand::Terminate("time limit reached".to_string())
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

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> StateView<'static, i64> {
        StateView {
            sums: &[],
            depth: 0,
        }
    }

    #[test]
    fn test_zero_budget_terminates_on_checked_step() {
        let mut monitor = TimeLimitMonitor::<i64>::with_clock_check_mask(Duration::ZERO, 0x3);
        let instance = Instance::new(vec![1i64]).unwrap();
        let mut stats = BnbSolverStatistics::default();
        monitor.on_enter_search(&instance, &stats);

        stats.steps = 1;
        assert_eq!(monitor.search_command(view(), &stats), SearchCommand::Continue);
        stats.steps = 4;
        assert_eq!(
            monitor.search_command(view(), &stats),
            SearchCommand::Terminate("time limit reached".to_string())
        );
    }

    #[test]
    fn test_generous_budget_continues() {
        let mut monitor = TimeLimitMonitor::<i64>::new(Duration::from_secs(3600));
        assert_eq!(monitor.time_limit(), Some(Duration::from_secs(3600)));
        let stats = BnbSolverStatistics::default();
        assert_eq!(monitor.search_command(view(), &stats), SearchCommand::Continue);
    }

    #[test]
    fn test_past_deadline_terminates() {
        let mut monitor = TimeLimitMonitor::<i64>::with_deadline_and_mask(Instant::now(), 0);
        assert_eq!(monitor.time_limit(), None);
        let stats = BnbSolverStatistics::default();
        assert_eq!(
            monitor.search_command(view(), &stats),
            SearchCommand::Terminate("time limit reached".to_string())
        );
    }

    #[test]
    fn test_future_deadline_continues() {
        let deadline = Instant::now() + Duration::from_secs(3600);
        let mut monitor = TimeLimitMonitor::<i64>::with_deadline(deadline);
        let stats = BnbSolverStatistics::default();
        assert_eq!(monitor.search_command(view(), &stats), SearchCommand::Continue);
    }
}
