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

use crate::stats::DpSolverStatistics;
use partix_core::num::SolverNumeric;
use partix_model::partition::Partition;
use partix_search::{
    portfolio::PortfolioSolverResult,
    result::{SolverResult, TerminationReason},
};

/// The result of one dynamic programming run.
#[derive(Debug, Clone)]
pub struct DpSolverOutcome<T> {
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    statistics: DpSolverStatistics,
}

impl<T> DpSolverOutcome<T> {
    #[inline]
    pub fn optimal(partition: Partition<T>, statistics: DpSolverStatistics) -> Self {
        Self {
            result: SolverResult::Optimal(partition),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    /// A run stopped by a monitor. The DP has no complete assignment
    /// before its last layer, so only a partition known from elsewhere can
    /// make the result `Feasible`.
    #[inline]
    pub fn aborted<R>(
        partition: Option<Partition<T>>,
        reason: R,
        statistics: DpSolverStatistics,
    ) -> Self
    where
        R: Into<String>,
    {
        let result = match partition {
            Some(partition) => SolverResult::Feasible(partition),
            None => SolverResult::Unknown,
        };

        Self {
            result,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn statistics(&self) -> &DpSolverStatistics {
        &self.statistics
    }

    #[inline]
    pub fn partition(&self) -> Option<&Partition<T>> {
        self.result.partition()
    }

    #[inline]
    pub fn into_partition(self) -> Option<Partition<T>> {
        self.result.into_partition()
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }
}

impl<T> std::fmt::Display for DpSolverOutcome<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result: {}", self.result)?;
        writeln!(f, "Termination: {}", self.termination_reason)?;
        write!(f, "{}", self.statistics)
    }
}

impl<T> From<DpSolverOutcome<T>> for PortfolioSolverResult<T>
where
    T: SolverNumeric,
{
    fn from(val: DpSolverOutcome<T>) -> Self {
        let states = val.statistics.states_generated;
        let result = match (val.result, val.termination_reason) {
            (SolverResult::Optimal(partition), _) => PortfolioSolverResult::optimal(partition),
            (result, TerminationReason::Aborted(reason)) => {
                PortfolioSolverResult::aborted(result.into_partition(), reason)
            }
            (_, _) => PortfolioSolverResult::infeasible(),
        };
        result.with_nodes_explored(states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aborted_without_partition_is_unknown() {
        let outcome =
            DpSolverOutcome::<i64>::aborted(None, "stop", DpSolverStatistics::default());
        assert_eq!(outcome.result(), &SolverResult::Unknown);
        assert!(outcome.termination_reason().is_aborted());
        assert!(!outcome.is_optimal());
    }

    #[test]
    fn test_into_portfolio_result() {
        let stats = DpSolverStatistics {
            states_generated: 17,
            ..Default::default()
        };
        let partition = Partition::new(5i64, vec![4, 5], None);
        let result: PortfolioSolverResult<i64> =
            DpSolverOutcome::optimal(partition.clone(), stats).into();
        assert_eq!(result.result(), &SolverResult::Optimal(partition));
        assert_eq!(result.nodes_explored(), 17);

        let result: PortfolioSolverResult<i64> =
            DpSolverOutcome::aborted(None, "stop", stats).into();
        assert_eq!(result.result(), &SolverResult::Unknown);
        assert_eq!(
            result.termination_reason(),
            &TerminationReason::Aborted("stop".to_string())
        );
    }
}
