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

use partix_core::num::constants::Zero;
use std::time::Duration;

/// Statistics collected during one branch-and-bound run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnbSolverStatistics<T> {
    /// Total nodes entered, including the root.
    pub nodes_explored: u64,
    /// Iterations of the main loop.
    pub steps: u64,
    /// Levels closed after their decisions ran out.
    pub backtracks: u64,
    /// Decisions popped from the stack.
    pub decisions_generated: u64,
    /// The deepest level reached in the tree.
    pub max_depth: u64,
    /// Children whose bound could not beat the incumbent.
    pub prunings_bound: u64,
    /// Children whose fingerprint had been visited before.
    pub prunings_duplicate: u64,
    /// Subtrees closed by placing all remaining items into the smallest bin.
    pub heuristic_completions: u64,
    /// Improving partitions found.
    pub solutions_found: u64,
    pub time_total: Duration,
    /// The admissible bound of the empty assignment.
    pub root_lower_bound: T,
}

impl<T> Default for BnbSolverStatistics<T>
where
    T: Zero,
{
    fn default() -> Self {
        Self {
            nodes_explored: 0,
            steps: 0,
            backtracks: 0,
            decisions_generated: 0,
            max_depth: 0,
            prunings_bound: 0,
            prunings_duplicate: 0,
            heuristic_completions: 0,
            solutions_found: 0,
            time_total: Duration::ZERO,
            root_lower_bound: T::ZERO,
        }
    }
}

impl<T> BnbSolverStatistics<T> {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub fn on_decision_generated(&mut self) {
        self.decisions_generated = self.decisions_generated.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_duplicate(&mut self) {
        self.prunings_duplicate = self.prunings_duplicate.saturating_add(1);
    }

    #[inline]
    pub fn on_heuristic_completion(&mut self) {
        self.heuristic_completions = self.heuristic_completions.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn set_root_lower_bound(&mut self, bound: T) {
        self.root_lower_bound = bound;
    }
}

impl<T> std::fmt::Display for BnbSolverStatistics<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Partix-BnB Solver Statistics:")?;
        writeln!(f, "  Nodes explored:        {}", self.nodes_explored)?;
        writeln!(f, "  Steps:                 {}", self.steps)?;
        writeln!(f, "  Backtracks:            {}", self.backtracks)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Decisions generated:   {}", self.decisions_generated)?;
        writeln!(f, "  Prunings (bound):      {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (duplicate):  {}", self.prunings_duplicate)?;
        writeln!(f, "  Heuristic completions: {}", self.heuristic_completions)?;
        writeln!(f, "  Solutions found:       {}", self.solutions_found)?;
        writeln!(f, "  Root lower bound:      {}", self.root_lower_bound)?;
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let mut stats = BnbSolverStatistics::<i64>::default();
        stats.on_node_explored();
        stats.on_node_explored();
        stats.on_step();
        stats.on_backtrack();
        stats.on_decision_generated();
        stats.on_pruning_bound();
        stats.on_pruning_duplicate();
        stats.on_heuristic_completion();
        stats.on_solution_found();
        stats.on_depth_update(4);
        stats.on_depth_update(2);
        stats.set_root_lower_bound(17);

        assert_eq!(stats.nodes_explored, 2);
        assert_eq!(stats.steps, 1);
        assert_eq!(stats.backtracks, 1);
        assert_eq!(stats.decisions_generated, 1);
        assert_eq!(stats.prunings_bound, 1);
        assert_eq!(stats.prunings_duplicate, 1);
        assert_eq!(stats.heuristic_completions, 1);
        assert_eq!(stats.solutions_found, 1);
        assert_eq!(stats.max_depth, 4);
        assert_eq!(stats.root_lower_bound, 17);
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = BnbSolverStatistics::<i64> {
            nodes_explored: u64::MAX,
            ..Default::default()
        };
        stats.on_node_explored();
        assert_eq!(stats.nodes_explored, u64::MAX);
    }

    #[test]
    fn test_display_lists_counters() {
        let stats = BnbSolverStatistics::<i32>::default();
        let text = stats.to_string();
        assert!(text.contains("Nodes explored:"));
        assert!(text.contains("Prunings (duplicate):"));
        assert!(text.contains("Root lower bound:      0"));
    }
}
