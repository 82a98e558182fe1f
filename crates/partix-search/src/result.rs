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

use crate::stats::SolverStatistics;
use partix_core::num::SolverNumeric;
use partix_model::partition::Partition;

/// The result of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<T> {
    /// We have proven that the problem has no partition.
    Infeasible,
    /// We have found a partition and proven its optimality.
    Optimal(Partition<T>),
    /// We have found a partition, but not proven its optimality.
    Feasible(Partition<T>),
    /// The solver terminated without finding a partition and
    /// without proving infeasibility.
    Unknown,
}

impl<T> SolverResult<T> {
    /// Returns the partition, if one was found.
    #[inline]
    pub fn partition(&self) -> Option<&Partition<T>> {
        match self {
            SolverResult::Optimal(partition) | SolverResult::Feasible(partition) => {
                Some(partition)
            }
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }

    /// Consumes the result and returns the partition, if one was found.
    #[inline]
    pub fn into_partition(self) -> Option<Partition<T>> {
        match self {
            SolverResult::Optimal(partition) | SolverResult::Feasible(partition) => {
                Some(partition)
            }
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }
}

impl<T> std::fmt::Display for SolverResult<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(partition) => {
                write!(f, "Optimal(objective={})", partition.objective_value())
            }
            SolverResult::Feasible(partition) => {
                write!(f, "Feasible(objective={})", partition.objective_value())
            }
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Why a search stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The solver found and proved optimality of a partition.
    OptimalityProven,
    /// The solver proved that the problem is infeasible.
    InfeasibilityProven,
    /// The solver aborted due to a search limit (time, solutions, interrupt).
    /// The string contains information about the reason for abortion.
    Aborted(String),
}

impl TerminationReason {
    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self, TerminationReason::Aborted(_))
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// The combined outcome of a (possibly multi-threaded) solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome<T> {
    pub result: SolverResult<T>,
    pub reason: TerminationReason,
    pub statistics: SolverStatistics,
}

impl<T> SolverOutcome<T> {
    #[inline]
    pub fn new(
        result: SolverResult<T>,
        reason: TerminationReason,
        statistics: SolverStatistics,
    ) -> Self {
        Self {
            result,
            reason,
            statistics,
        }
    }

    #[inline]
    pub fn optimal(partition: Partition<T>, statistics: SolverStatistics) -> Self {
        Self::new(
            SolverResult::Optimal(partition),
            TerminationReason::OptimalityProven,
            statistics,
        )
    }

    #[inline]
    pub fn feasible<R>(partition: Partition<T>, reason: R, statistics: SolverStatistics) -> Self
    where
        R: Into<String>,
    {
        Self::new(
            SolverResult::Feasible(partition),
            TerminationReason::Aborted(reason.into()),
            statistics,
        )
    }

    #[inline]
    pub fn infeasible(statistics: SolverStatistics) -> Self {
        Self::new(
            SolverResult::Infeasible,
            TerminationReason::InfeasibilityProven,
            statistics,
        )
    }

    #[inline]
    pub fn unknown<R>(reason: R, statistics: SolverStatistics) -> Self
    where
        R: Into<String>,
    {
        Self::new(
            SolverResult::Unknown,
            TerminationReason::Aborted(reason.into()),
            statistics,
        )
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self.result, SolverResult::Feasible(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, SolverResult::Infeasible)
    }

    #[inline]
    pub fn has_solution(&self) -> bool {
        matches!(
            self.result,
            SolverResult::Optimal(_) | SolverResult::Feasible(_)
        )
    }

    #[inline]
    pub fn partition(&self) -> Option<&Partition<T>> {
        self.result.partition()
    }
}

impl<T> std::fmt::Display for SolverOutcome<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result: {}", self.result)?;
        writeln!(f, "Termination: {}", self.reason)?;
        write!(f, "{}", self.statistics)
    }
}
