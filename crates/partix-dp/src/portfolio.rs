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

use crate::dp::{DpConfig, DpSolver};
use partix_core::num::SolverNumeric;
use partix_model::bins::BinStore;
use partix_search::{
    monitor::{composite::CompositeMonitor, interrupt::InterruptMonitor},
    portfolio::{PortfolioSolver, PortfolioSolverContext, PortfolioSolverResult},
};

/// Runs the dynamic programming search as one strategy of a portfolio.
///
/// A `DpError` does not fail the portfolio: the strategy gives up and reports
/// whatever the shared incumbent holds.
#[derive(Debug, Clone)]
pub struct DpPortfolioSolver<T, B> {
    inner: DpSolver<T, B>,
}

impl<T, B> Default for DpPortfolioSolver<T, B>
where
    T: SolverNumeric,
    B: BinStore<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, B> DpPortfolioSolver<T, B>
where
    T: SolverNumeric,
    B: BinStore<T>,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: DpSolver::new(),
        }
    }

    #[inline]
    pub fn with_config(config: DpConfig) -> Self {
        Self {
            inner: DpSolver::with_config(config),
        }
    }

    #[inline]
    pub fn inner(&self) -> &DpSolver<T, B> {
        &self.inner
    }
}

impl<T, B> PortfolioSolver<T> for DpPortfolioSolver<T, B>
where
    T: SolverNumeric,
    B: BinStore<T>,
{
    fn solve<'a>(&mut self, context: PortfolioSolverContext<'a, T>) -> PortfolioSolverResult<T> {
        let incumbent = context.incumbent;
        let mut monitor = CompositeMonitor::with_capacity(2);
        monitor.add_monitor(InterruptMonitor::new(context.stop));
        monitor.add_monitor(context.monitor);

        match self.inner.solve_with_incumbent(
            context.instance,
            context.num_bins,
            context.objective,
            &mut monitor,
            incumbent,
        ) {
            Ok(outcome) => outcome.into(),
            Err(err) => {
                log::debug!("dynamic programming gave up: {}", err);
                PortfolioSolverResult::aborted(incumbent.snapshot(), err.to_string())
            }
        }
    }

    fn name(&self) -> &str {
        "DpPortfolioSolver"
    }
}
