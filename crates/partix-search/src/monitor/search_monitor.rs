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

use partix_core::num::SolverNumeric;
use partix_model::{instance::Instance, partition::Partition};

/// The verdict of a monitor after a search step.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Observes a strategy-independent search and may ask it to stop.
///
/// Strategies call `on_step` once per unit of work (a node expansion, a DP
/// item layer or a generated DP state) and poll `search_command` right
/// after it.
pub trait SearchMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str;
    fn on_enter_search(&mut self, instance: &Instance<T>);
    fn on_exit_search(&mut self);
    fn on_solution_found(&mut self, partition: &Partition<T>);
    fn on_step(&mut self);
    fn search_command(&self) -> SearchCommand;
}

impl<T> std::fmt::Debug for dyn SearchMonitor<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn SearchMonitor<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<T, M> SearchMonitor<T> for &mut M
where
    T: SolverNumeric,
    M: SearchMonitor<T> + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_search(&mut self, instance: &Instance<T>) {
        (**self).on_enter_search(instance)
    }

    #[inline(always)]
    fn on_exit_search(&mut self) {
        (**self).on_exit_search()
    }

    #[inline(always)]
    fn on_solution_found(&mut self, partition: &Partition<T>) {
        (**self).on_solution_found(partition)
    }

    #[inline(always)]
    fn on_step(&mut self) {
        (**self).on_step()
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        (**self).search_command()
    }
}

/// A monitor that never interferes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOperationSearchMonitor;

impl<T> SearchMonitor<T> for NoOperationSearchMonitor
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "NoOperationSearchMonitor"
    }

    fn on_enter_search(&mut self, _instance: &Instance<T>) {}
    fn on_exit_search(&mut self) {}
    fn on_solution_found(&mut self, _partition: &Partition<T>) {}
    fn on_step(&mut self) {}

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}
