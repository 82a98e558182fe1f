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

//! Incumbent management for branch-and-bound.
//!
//! `IncumbentStore<T>` reads and updates the best known key during a search.
//! `NoSharedIncumbent` keeps everything local; `SharedIncumbentAdapter`
//! publishes to and tightens from a `SharedIncumbent` used by concurrent
//! strategies.

use partix_core::num::SolverNumeric;
use partix_model::partition::Partition;
use partix_search::incumbent::SharedIncumbent;
use std::marker::PhantomData;

pub trait IncumbentStore<T>
where
    T: SolverNumeric,
{
    /// Returns the bound the search starts with.
    fn initial_upper_bound(&self) -> T;
    /// Returns the better of `current_local_best` and the published bound.
    fn tighten(&self, current_local_best: T) -> T;
    /// Publishes a new local improvement.
    fn on_solution_found(&self, partition: &Partition<T>);
    /// Returns the best partition known outside the local search, if any.
    fn snapshot(&self) -> Option<Partition<T>>;
}

/// Local-only incumbent for single-threaded runs.
#[repr(transparent)]
#[derive(Debug, Clone, Copy)]
pub struct NoSharedIncumbent<T>(PhantomData<T>);

impl<T> Default for NoSharedIncumbent<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NoSharedIncumbent<T>
where
    T: SolverNumeric,
{
    #[inline(always)]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> IncumbentStore<T> for NoSharedIncumbent<T>
where
    T: SolverNumeric,
{
    #[inline(always)]
    fn initial_upper_bound(&self) -> T {
        T::max_value()
    }

    #[inline(always)]
    fn tighten(&self, current_local_best: T) -> T {
        current_local_best
    }

    #[inline(always)]
    fn on_solution_found(&self, _: &Partition<T>) {}

    #[inline(always)]
    fn snapshot(&self) -> Option<Partition<T>> {
        None
    }
}

/// Adapts a `SharedIncumbent` to the search.
#[repr(transparent)]
#[derive(Debug, Clone)]
pub struct SharedIncumbentAdapter<'a, T> {
    inner: &'a SharedIncumbent<T>,
}

impl<'a, T> SharedIncumbentAdapter<'a, T> {
    #[inline(always)]
    pub fn new(inner: &'a SharedIncumbent<T>) -> Self {
        Self { inner }
    }
}

impl<'a, T> IncumbentStore<T> for SharedIncumbentAdapter<'a, T>
where
    T: SolverNumeric,
{
    #[inline(always)]
    fn initial_upper_bound(&self) -> T {
        self.inner.upper_bound_as()
    }

    #[inline(always)]
    fn tighten(&self, current_local_best: T) -> T {
        self.inner.upper_bound_as().min(current_local_best)
    }

    #[inline(always)]
    fn on_solution_found(&self, partition: &Partition<T>) {
        self.inner.try_install(partition);
    }

    #[inline]
    fn snapshot(&self) -> Option<Partition<T>> {
        self.inner.snapshot()
    }
}
