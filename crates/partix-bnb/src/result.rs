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

use crate::stats::BnbSolverStatistics;
use partix_core::num::SolverNumeric;
use partix_model::partition::Partition;
use partix_search::{
    portfolio::PortfolioSolverResult,
    result::{SolverResult, TerminationReason},
};

/// The result of one branch-and-bound run.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome<T> {
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics<T>,
}

impl<T> BnbSolverOutcome<T> {
    #[inline]
    pub fn optimal(partition: Partition<T>, statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Optimal(partition),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    /// An interrupted run. Without a partition the result is `Unknown`:
    /// stopping early proves nothing about feasibility.
    #[inline]
    pub fn aborted<R>(
        partition: Option<Partition<T>>,
        reason: R,
        statistics: BnbSolverStatistics<T>,
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
    pub fn statistics(&self) -> &BnbSolverStatistics<T> {
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

impl<T> std::fmt::Display for BnbSolverOutcome<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result: {}", self.result)?;
        writeln!(f, "Termination: {}", self.termination_reason)?;
        write!(f, "{}", self.statistics)
    }
}

impl<T> From<BnbSolverOutcome<T>> for PortfolioSolverResult<T>
where
    T: SolverNumeric,
{
    fn from(val: BnbSolverOutcome<T>) -> Self {
        let nodes_explored = val.statistics.nodes_explored;
        let result = match val.termination_reason {
            TerminationReason::OptimalityProven => {
                assert!(
                    matches!(val.result, SolverResult::Optimal(_)),
                    "called `BnbSolverOutcome::into()` with inconsistent state: termination reason is OptimalityProven but result is not Optimal"
                );
                match val.result {
                    SolverResult::Optimal(partition) => PortfolioSolverResult::optimal(partition),
                    _ => PortfolioSolverResult::infeasible(),
                }
            }
            TerminationReason::InfeasibilityProven => PortfolioSolverResult::infeasible(),
            TerminationReason::Aborted(reason) => {
                PortfolioSolverResult::aborted(val.result.into_partition(), reason)
            }
        };
        result.with_nodes_explored(nodes_explored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type I = i64;

    fn stats() -> BnbSolverStatistics<I> {
        BnbSolverStatistics {
            nodes_explored: 12,
            ..Default::default()
        }
    }

    fn partition() -> Partition<I> {
        Partition::new(9, vec![8, 9], None)
    }

    #[test]
    fn test_into_portfolio_optimal_carries_nodes() {
        let portfolio: PortfolioSolverResult<I> =
            BnbSolverOutcome::optimal(partition(), stats()).into();
        assert_eq!(portfolio.result(), &SolverResult::Optimal(partition()));
        assert_eq!(portfolio.termination_reason(), &TerminationReason::OptimalityProven);
        assert_eq!(portfolio.nodes_explored(), 12);
    }

    #[test]
    fn test_into_portfolio_infeasible() {
        let portfolio: PortfolioSolverResult<I> = BnbSolverOutcome::infeasible(stats()).into();
        assert_eq!(portfolio.result(), &SolverResult::Infeasible);
        assert_eq!(
            portfolio.termination_reason(),
            &TerminationReason::InfeasibilityProven
        );
    }

    #[test]
    fn test_aborted_without_partition_is_unknown() {
        let outcome = BnbSolverOutcome::<I>::aborted(None, "time limit reached", stats());
        assert_eq!(outcome.result(), &SolverResult::Unknown);
        assert!(!outcome.is_optimal());

        let portfolio: PortfolioSolverResult<I> = outcome.into();
        assert_eq!(portfolio.result(), &SolverResult::Unknown);
        assert_eq!(
            portfolio.termination_reason(),
            &TerminationReason::Aborted("time limit reached".to_string())
        );
    }

    #[test]
    fn test_aborted_with_partition_is_feasible() {
        let outcome = BnbSolverOutcome::aborted(Some(partition()), "stop", stats());
        assert_eq!(outcome.partition(), Some(&partition()));
        let portfolio: PortfolioSolverResult<I> = outcome.into();
        assert_eq!(portfolio.result(), &SolverResult::Feasible(partition()));
    }

    #[test]
    #[should_panic(expected = "termination reason is OptimalityProven but result is not Optimal")]
    fn test_inconsistent_optimality_panics() {
        let inconsistent = BnbSolverOutcome::<I> {
            result: SolverResult::Infeasible,
            termination_reason: TerminationReason::OptimalityProven,
            statistics: stats(),
        };
        let _portfolio: PortfolioSolverResult<I> = inconsistent.into();
    }
}
