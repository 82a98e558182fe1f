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

//! Adapts a strategy-independent `SearchMonitor` to the tree search.
//!
//! Lifecycle events, steps, solutions and `search_command` are forwarded;
//! the tree-specific callbacks are dropped.

use crate::{
    monitor::tree_search_monitor::TreeSearchMonitor, state::StateView,
    stats::BnbSolverStatistics,
};
use partix_core::num::SolverNumeric;
use partix_model::{instance::Instance, partition::Partition};
use partix_search::monitor::search_monitor::{SearchCommand, SearchMonitor};

pub struct WrapperMonitor<'a, T> {
    inner: &'a mut dyn SearchMonitor<T>,
    name: String,
}

impl<'a, T> WrapperMonitor<'a, T>
where
    T: SolverNumeric,
{
    #[inline(always)]
    pub fn new(inner: &'a mut dyn SearchMonitor<T>) -> Self {
        let name = format!("WrapperMonitor({})", inner.name());
        Self { inner, name }
    }
}

impl<'a, T> TreeSearchMonitor<T> for WrapperMonitor<'a, T>
where
    T: SolverNumeric,
{
    #[inline(always)]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    fn on_enter_search(&mut self, instance: &Instance<T>, _statistics: &BnbSolverStatistics<T>) {
        self.inner.on_enter_search(instance);
    }

    #[inline(always)]
    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {
        self.inner.on_exit_search();
    }

    #[inline(always)]
    fn search_command(
        &mut self,
        _state: StateView<'_, T>,
        _statistics: &BnbSolverStatistics<T>,
    ) -> SearchCommand {
        self.inner.search_command()
    }

    #[inline(always)]
    fn on_step(&mut self, _state: StateView<'_, T>, _statistics: &BnbSolverStatistics<T>) {
        self.inner.on_step();
    }

    #[inline(always)]
    fn on_solution_found(&mut self, partition: &Partition<T>, _statistics: &BnbSolverStatistics<T>) {
        self.inner.on_solution_found(partition);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counting {
        entered: bool,
        exited: bool,
        steps: u64,
        solutions: u64,
    }

    impl SearchMonitor<i64> for Counting {
        fn name(&self) -> &str {
            "Counting"
        }
        fn on_enter_search(&mut self, _instance: &Instance<i64>) {
            self.entered = true;
        }
        fn on_exit_search(&mut self) {
            self.exited = true;
        }
        fn on_solution_found(&mut self, _partition: &Partition<i64>) {
            self.solutions += 1;
        }
        fn on_step(&mut self) {
            self.steps += 1;
        }
        fn search_command(&self) -> SearchCommand {
            if self.steps >= 2 {
                SearchCommand::Terminate("enough".to_string())
            } else {
                SearchCommand::Continue
            }
        }
    }

    #[test]
    fn test_forwards_lifecycle_and_commands() {
        let mut inner = Counting::default();
        let instance = Instance::new(vec![2i64, 1]).unwrap();
        let stats = BnbSolverStatistics::default();
        let view = StateView {
            sums: &[0i64, 0],
            depth: 0,
        };
        {
            let mut wrapper = WrapperMonitor::<i64>::new(&mut inner);
            assert_eq!(wrapper.name(), "WrapperMonitor(Counting)");
            wrapper.on_enter_search(&instance, &stats);
            wrapper.on_step(view, &stats);
            assert_eq!(wrapper.search_command(view, &stats), SearchCommand::Continue);
            wrapper.on_step(view, &stats);
            assert_eq!(
                wrapper.search_command(view, &stats),
                SearchCommand::Terminate("enough".to_string())
            );
            wrapper.on_solution_found(&Partition::new(2, vec![1, 2], None), &stats);
            wrapper.on_exit_search(&stats);
        }
        assert!(inner.entered);
        assert!(inner.exited);
        assert_eq!(inner.steps, 2);
        assert_eq!(inner.solutions, 1);
    }
}
