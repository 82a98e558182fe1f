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

/// Fans every event out to a list of monitors; the first `Terminate` wins.
pub struct CompositeMonitor<'a, T> {
    monitors: Vec<Box<dyn SearchMonitor<T> + 'a>>,
}

impl<'a, T> std::fmt::Debug for CompositeMonitor<'a, T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let monitors_str = self
            .monitors
            .iter()
            .map(|m| m.name())
            .collect::<Vec<&str>>()
            .join(", ");

        f.debug_struct("CompositeMonitor")
            .field("monitors", &monitors_str)
            .finish()
    }
}

impl<'a, T> std::fmt::Display for CompositeMonitor<'a, T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let monitors_str = self
            .monitors
            .iter()
            .map(|m| m.name())
            .collect::<Vec<&str>>()
            .join(", ");

        write!(f, "CompositeMonitor([{}])", monitors_str)
    }
}

impl<'a, T> Default for CompositeMonitor<'a, T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeMonitor<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn new() -> CompositeMonitor<'a, T> {
        CompositeMonitor {
            monitors: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> CompositeMonitor<'a, T> {
        CompositeMonitor {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a new boxed monitor to the composite monitor.
    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SearchMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> FromIterator<Box<dyn SearchMonitor<T> + 'a>> for CompositeMonitor<'a, T>
where
    T: SolverNumeric,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn SearchMonitor<T> + 'a>>,
    {
        CompositeMonitor {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> SearchMonitor<T> for CompositeMonitor<'a, T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, instance: &Instance<T>) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(instance);
        }
    }

    fn on_exit_search(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search();
        }
    }

    fn on_solution_found(&mut self, partition: &Partition<T>) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(partition);
        }
    }

    fn on_step(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_step();
        }
    }

    fn search_command(&self) -> SearchCommand {
        // Plain loop: this is polled after every step.
        for monitor in &self.monitors {
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingMonitor<'c> {
        name: &'static str,
        steps: &'c Cell<u32>,
        solutions: &'c Cell<u32>,
        terminate: bool,
    }

    impl<'c> SearchMonitor<i64> for CountingMonitor<'c> {
        fn name(&self) -> &str {
            self.name
        }
        fn on_enter_search(&mut self, _instance: &Instance<i64>) {}
        fn on_exit_search(&mut self) {}
        fn on_solution_found(&mut self, _partition: &Partition<i64>) {
            self.solutions.set(self.solutions.get() + 1);
        }
        fn on_step(&mut self) {
            self.steps.set(self.steps.get() + 1);
        }
        fn search_command(&self) -> SearchCommand {
            if self.terminate {
                SearchCommand::Terminate(format!("{} says stop", self.name))
            } else {
                SearchCommand::Continue
            }
        }
    }

    #[test]
    fn test_events_reach_every_monitor() {
        let steps = Cell::new(0);
        let solutions = Cell::new(0);
        let mut composite = CompositeMonitor::new();
        composite.add_monitor(CountingMonitor {
            name: "a",
            steps: &steps,
            solutions: &solutions,
            terminate: false,
        });
        composite.add_monitor_boxed(Box::new(CountingMonitor {
            name: "b",
            steps: &steps,
            solutions: &solutions,
            terminate: false,
        }));

        composite.on_step();
        composite.on_solution_found(&Partition::new(1, vec![1], None));
        assert_eq!(steps.get(), 2);
        assert_eq!(solutions.get(), 2);
        assert_eq!(composite.len(), 2);
        assert_eq!(composite.search_command(), SearchCommand::Continue);
        assert_eq!(composite.to_string(), "CompositeMonitor([a, b])");
    }

    #[test]
    fn test_first_terminate_wins() {
        let steps = Cell::new(0);
        let solutions = Cell::new(0);
        let monitors: Vec<Box<dyn SearchMonitor<i64> + '_>> = vec![
            Box::new(CountingMonitor {
                name: "a",
                steps: &steps,
                solutions: &solutions,
                terminate: false,
            }),
            Box::new(CountingMonitor {
                name: "b",
                steps: &steps,
                solutions: &solutions,
                terminate: true,
            }),
            Box::new(CountingMonitor {
                name: "c",
                steps: &steps,
                solutions: &solutions,
                terminate: true,
            }),
        ];
        let composite: CompositeMonitor<'_, i64> = monitors.into_iter().collect();
        assert_eq!(
            composite.search_command(),
            SearchCommand::Terminate("b says stop".to_string())
        );
    }

    #[test]
    fn test_empty_composite_continues() {
        let composite = CompositeMonitor::<i64>::default();
        assert!(composite.is_empty());
        assert_eq!(composite.search_command(), SearchCommand::Continue);
    }
}
