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
use std::time::{Duration, Instant};

/// When the limit expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Limit {
    /// Relative to the start of the search.
    Relative(Duration),
    /// A fixed point in wall-clock time.
    Deadline(Instant),
}

/// Terminates the search once a time limit has passed.
///
/// The clock is read only when `steps & clock_check_mask == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor<T> {
    clock_check_mask: u64,
    steps: u64,
    limit: Limit,
    start_time: Instant,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> TimeLimitMonitor<T> {
    /// Default mask: Check every 16,384 steps (2^14).
    /// 16384 - 1 = 16383 = 0x3FFF
    pub const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x3FFF;

    /// Limits the search to `time_limit` measured from `on_enter_search`.
    #[inline]
    pub fn new(time_limit: Duration) -> Self {
        Self::with_clock_check_mask(time_limit, Self::DEFAULT_STEP_CLOCK_CHECK_MASK)
    }

    #[inline]
    pub fn with_clock_check_mask(time_limit: Duration, clock_check_mask: u64) -> Self {
        Self {
            clock_check_mask,
            steps: 0,
            limit: Limit::Relative(time_limit),
            start_time: Instant::now(),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Limits the search to an absolute deadline.
    #[inline]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self::with_deadline_and_mask(deadline, Self::DEFAULT_STEP_CLOCK_CHECK_MASK)
    }

    #[inline]
    pub fn with_deadline_and_mask(deadline: Instant, clock_check_mask: u64) -> Self {
        Self {
            clock_check_mask,
            steps: 0,
            limit: Limit::Deadline(deadline),
            start_time: Instant::now(),
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline(always)]
    fn expired(&self) -> bool {
        match self.limit {
            Limit::Relative(limit) => self.start_time.elapsed() >= limit,
            Limit::Deadline(deadline) => Instant::now() >= deadline,
        }
    }
}

impl<T> SearchMonitor<T> for TimeLimitMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _instance: &Instance<T>) {
        self.start_time = Instant::now();
        self.steps = 0;
    }

    fn on_exit_search(&mut self) {}

    fn on_solution_found(&mut self, _partition: &Partition<T>) {}

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if (self.steps & self.clock_check_mask) == 0 && self.expired() {
            return SearchCommand::Terminate("time limit reached".to_string());
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    #[test]
    fn test_default_mask_is_power_of_two_minus_one() {
        assert_eq!(
            TimeLimitMonitor::<IntegerType>::DEFAULT_STEP_CLOCK_CHECK_MASK,
            0x3FFF
        );
    }

    #[test]
    fn test_terminates_after_time_limit_when_mask_condition_met() {
        let mut mon = TimeLimitMonitor::<IntegerType>::new(Duration::from_millis(10));
        mon.start_time = Instant::now() - Duration::from_millis(50);
        mon.steps = 0;
        match mon.search_command() {
            SearchCommand::Terminate(msg) => assert!(msg.contains("time limit")),
            other => panic!("expected Terminate, got {:?}", other),
        }
    }

    #[test]
    fn test_continues_when_mask_condition_not_met_even_if_time_exceeded() {
        let mut mon = TimeLimitMonitor::<IntegerType>::new(Duration::from_millis(1));
        mon.start_time = Instant::now() - Duration::from_millis(50);
        mon.steps = 1;
        assert_eq!(mon.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_mask_zero_always_checks() {
        let mut mon =
            TimeLimitMonitor::<IntegerType>::with_clock_check_mask(Duration::from_millis(1), 0);
        mon.start_time = Instant::now() - Duration::from_millis(50);
        mon.steps = 12345;
        assert!(matches!(mon.search_command(), SearchCommand::Terminate(_)));
    }

    #[test]
    fn test_deadline_in_the_past_terminates() {
        let deadline = Instant::now() - Duration::from_millis(5);
        let mon = TimeLimitMonitor::<IntegerType>::with_deadline(deadline);
        assert!(matches!(mon.search_command(), SearchCommand::Terminate(_)));
    }

    #[test]
    fn test_deadline_in_the_future_continues() {
        let deadline = Instant::now() + Duration::from_secs(3600);
        let mon = TimeLimitMonitor::<IntegerType>::with_deadline_and_mask(deadline, 0);
        assert_eq!(mon.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_enter_search_resets_clock_and_steps() {
        let mut mon =
            TimeLimitMonitor::<IntegerType>::with_clock_check_mask(Duration::from_millis(500), 0);
        mon.start_time = Instant::now() - Duration::from_millis(600);
        mon.steps = 99;
        let instance = Instance::new(vec![1i64]).unwrap();
        mon.on_enter_search(&instance);
        assert_eq!(mon.steps, 0);
        assert_eq!(mon.search_command(), SearchCommand::Continue);
    }
}
