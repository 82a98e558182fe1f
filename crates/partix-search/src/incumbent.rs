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

//! A thread-safe incumbent shared by concurrent strategies.
//!
//! The objective of the best partition is mirrored in an `AtomicI64` so the
//! hot loops of the searches can read it without taking the lock; the
//! partition itself lives behind a `Mutex`.

use partix_core::num::SolverNumeric;
use partix_model::partition::Partition;
use std::sync::{
    Mutex, MutexGuard,
    atomic::{AtomicI64, Ordering},
};

#[derive(Debug)]
pub struct SharedIncumbent<T> {
    /// Objective of the incumbent stored as `i64` for atomic access.
    upper_bound: AtomicI64,

    /// The incumbent partition.
    partition: Mutex<Option<Partition<T>>>,
}

impl<T> Default for SharedIncumbent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Display for SharedIncumbent<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Incumbent(upper_bound: {})", self.upper_bound())
    }
}

impl<T> SharedIncumbent<T> {
    /// Creates a new shared incumbent with no partition installed.
    /// The initial upper bound is `i64::MAX`.
    #[inline]
    pub fn new() -> Self {
        SharedIncumbent {
            upper_bound: AtomicI64::new(i64::MAX),
            partition: Mutex::new(None),
        }
    }

    /// Returns the current upper bound.
    #[inline]
    pub fn upper_bound(&self) -> i64 {
        self.upper_bound.load(Ordering::Relaxed)
    }

    /// A poisoned lock still holds a consistent `Option<Partition>`:
    /// installs replace the whole value in one assignment.
    #[inline]
    fn lock(&self) -> MutexGuard<'_, Option<Partition<T>>> {
        self.partition
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> SharedIncumbent<T>
where
    T: SolverNumeric,
{
    /// Returns the current upper bound converted to `T`, or `T::max_value()`
    /// while no partition is installed.
    #[inline]
    pub fn upper_bound_as(&self) -> T {
        T::from_i64(self.upper_bound()).unwrap_or_else(T::max_value)
    }

    /// Returns a snapshot of the current incumbent partition, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<Partition<T>> {
        self.lock().clone()
    }

    /// Attempts to install `candidate` as the new incumbent.
    /// Returns `true` if the candidate was installed, `false` otherwise.
    pub fn try_install(&self, candidate: &Partition<T>) -> bool {
        let candidate_objective: i64 = candidate.objective_value().into();

        // We are minimizing, so lower is better.
        if candidate_objective >= self.upper_bound() {
            return false;
        }

        let mut guard = self.lock();
        // The atomic is only a hint; compare against the partition under the lock.
        if let Some(current) = guard.as_ref() {
            let current_objective: i64 = current.objective_value().into();
            if candidate_objective >= current_objective {
                return false;
            }
        }

        *guard = Some(candidate.clone());
        self.upper_bound
            .store(candidate_objective, Ordering::Relaxed);

        true
    }
}
