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

//! Branch-and-bound search for multiway number partitioning.
//!
//! Items are placed one at a time in largest-first order, depth-first, while
//! the best complete assignment found so far (the incumbent) bounds the
//! rest of the tree. The search is anytime: every improvement is published
//! immediately, and an interrupted run still reports its incumbent.
//!
//! The node is a single `SearchState` mutated in place: descending pushes a
//! frame onto the undo trail and onto the decision stack, and backtracking
//! pops both. Branching order is delegated to a `DecisionBuilder`, pruning to
//! the lower bound of the `Objective`, and duplicate nodes are skipped
//! through `SeenStates`. A `BnbSolver` keeps its buffers between runs.

use crate::{
    branching::decision::{Decision, DecisionBuilder},
    incumbent::{IncumbentStore, NoSharedIncumbent, SharedIncumbentAdapter},
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    result::BnbSolverOutcome,
    seen::{DEFAULT_MAX_SEEN_STATES, SeenStates},
    stack::SearchStack,
    state::SearchState,
    stats::BnbSolverStatistics,
    trail::SearchTrail,
};
use partix_core::num::SolverNumeric;
use partix_model::{
    bins::BinStore, index::BinIndex, instance::Instance, objective::Objective,
    partition::Partition,
};
use partix_search::{
    incumbent::SharedIncumbent, monitor::search_monitor::SearchCommand,
    result::TerminationReason,
};
use smallvec::SmallVec;

/// Pruning switches of the branch-and-bound engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BnbConfig {
    /// Prune children whose objective bound cannot beat the incumbent.
    pub use_lower_bound: bool,
    /// Skip children identical to a node visited before.
    pub use_seen_states: bool,
    /// Close a branch by pouring every remaining item into the smallest bin
    /// once that cannot raise the largest sum. Only honoured by objectives
    /// that depend on the largest sum alone.
    pub use_largest_sum_completion: bool,
    /// Upper bound on the fingerprints `SeenStates` remembers.
    pub max_seen_states: usize,
}

impl Default for BnbConfig {
    fn default() -> Self {
        Self {
            use_lower_bound: true,
            use_seen_states: true,
            use_largest_sum_completion: false,
            max_seen_states: DEFAULT_MAX_SEEN_STATES,
        }
    }
}

impl std::fmt::Display for BnbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BnbConfig(lower_bound: {}, seen_states: {}, largest_sum_completion: {})",
            self.use_lower_bound, self.use_seen_states, self.use_largest_sum_completion
        )
    }
}

/// The branch-and-bound execution engine.
///
/// `B` chooses the bin representation: `SumBins` when only sums are
/// reported, `ContentBins` when the partition itself is wanted.
#[derive(Debug, Clone)]
pub struct BnbSolver<T, B>
where
    T: SolverNumeric,
{
    trail: SearchTrail<T>,
    stack: SearchStack,
    seen: SeenStates<T>,
    /// Bin sums of the child under evaluation.
    scratch: SmallVec<[T; 8]>,
    config: BnbConfig,
    _phantom: std::marker::PhantomData<B>,
}

impl<T, B> Default for BnbSolver<T, B>
where
    T: SolverNumeric,
    B: BinStore<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, B> BnbSolver<T, B>
where
    T: SolverNumeric,
    B: BinStore<T>,
{
    #[inline]
    pub fn new() -> Self {
        Self::with_config(BnbConfig::default())
    }

    #[inline]
    pub fn with_config(config: BnbConfig) -> Self {
        Self {
            trail: SearchTrail::new(),
            stack: SearchStack::new(),
            seen: SeenStates::with_limit(config.max_seen_states),
            scratch: SmallVec::new(),
            config,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Creates a solver whose buffers already fit the given problem size.
    ///
    /// Every solve grows the buffers on demand; preallocation only moves the
    /// allocations to construction time.
    #[inline]
    pub fn preallocated(num_bins: usize, num_items: usize) -> Self {
        Self {
            trail: SearchTrail::preallocated(num_items),
            stack: SearchStack::preallocated(num_bins, num_items),
            seen: SeenStates::with_limit(DEFAULT_MAX_SEEN_STATES),
            scratch: SmallVec::with_capacity(num_bins),
            config: BnbConfig::default(),
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn config(&self) -> &BnbConfig {
        &self.config
    }

    #[inline]
    pub fn set_config(&mut self, config: BnbConfig) {
        self.config = config;
    }

    /// Solves `instance` into `num_bins` bins as a standalone search.
    ///
    /// # Panics
    ///
    /// Panics if `num_bins` is zero, if the objective is tied to a different
    /// number of bins, or if its keys for `instance` do not fit `T` (see
    /// [`Objective::check_range`]).
    #[inline]
    pub fn solve<D, O, S>(
        &mut self,
        instance: &Instance<T>,
        num_bins: usize,
        objective: &O,
        builder: &mut D,
        monitor: S,
    ) -> BnbSolverOutcome<T>
    where
        D: DecisionBuilder<T, B>,
        O: Objective<T> + ?Sized,
        S: TreeSearchMonitor<T>,
    {
        let backing = NoSharedIncumbent::new();
        self.solve_internal(instance, num_bins, objective, builder, monitor, backing)
    }

    /// Solves `instance` while cooperating through `incumbent`.
    ///
    /// The search starts from the bound already published there (a warm
    /// start), prunes against improvements published by other strategies, and
    /// publishes its own. When the search space is exhausted without a local
    /// improvement, the shared partition is reported as optimal.
    ///
    /// # Panics
    ///
    /// Same as [`BnbSolver::solve`].
    #[inline]
    pub fn solve_with_incumbent<D, O, S>(
        &mut self,
        instance: &Instance<T>,
        num_bins: usize,
        objective: &O,
        builder: &mut D,
        monitor: S,
        incumbent: &SharedIncumbent<T>,
    ) -> BnbSolverOutcome<T>
    where
        D: DecisionBuilder<T, B>,
        O: Objective<T> + ?Sized,
        S: TreeSearchMonitor<T>,
    {
        let backing = SharedIncumbentAdapter::new(incumbent);
        self.solve_internal(instance, num_bins, objective, builder, monitor, backing)
    }

    fn solve_internal<D, O, S, I>(
        &mut self,
        instance: &Instance<T>,
        num_bins: usize,
        objective: &O,
        builder: &mut D,
        mut monitor: S,
        backing: I,
    ) -> BnbSolverOutcome<T>
    where
        D: DecisionBuilder<T, B>,
        O: Objective<T> + ?Sized,
        S: TreeSearchMonitor<T>,
        I: IncumbentStore<T>,
    {
        if let Some(expected) = objective.expected_num_bins() {
            assert_eq!(
                expected,
                num_bins,
                "called `BnbSolver::solve` with {} bins for objective `{}` built for {} bins",
                num_bins,
                objective.name(),
                expected
            );
        }
        if let Err(err) = objective.check_range(num_bins, instance.total_value()) {
            panic!(
                "called `BnbSolver::solve` with objective `{}` out of range: {}",
                objective.name(),
                err
            );
        }

        let session = BnbSolverSearchSession::new(
            self,
            instance,
            num_bins,
            objective,
            builder,
            &mut monitor,
            backing,
        );
        let outcome = session.run();
        self.reset();
        outcome
    }

    /// Clears the per-run state but keeps the allocations.
    #[inline]
    fn reset(&mut self) {
        self.trail.reset();
        self.stack.reset();
        self.seen.reset();
        self.scratch.clear();
    }
}

/// A child that survived bounding, ready to be descended into.
#[derive(Clone, Copy, Debug)]
struct ChildNode<T> {
    /// The key for a leaf, the lower bound otherwise.
    bound: T,
    value: T,
    decision: Decision,
    is_leaf: bool,
}

/// The state of a single search run.
struct BnbSolverSearchSession<'a, T, B, D, O, S, I>
where
    T: SolverNumeric,
    B: BinStore<T>,
    O: ?Sized,
{
    solver: &'a mut BnbSolver<T, B>,
    instance: &'a Instance<T>,
    objective: &'a O,
    builder: &'a mut D,
    monitor: &'a mut S,
    incumbent: I,
    state: SearchState<T, B>,
    symmetric: bool,
    largest_sum_completion: bool,
    best_objective: T,
    best_solution: Option<Partition<T>>,
    root_lower_bound: T,
    stats: BnbSolverStatistics<T>,
    start_time: std::time::Instant,
}

impl<'a, T, B, D, O, S, I> std::fmt::Debug for BnbSolverSearchSession<'a, T, B, D, O, S, I>
where
    T: SolverNumeric,
    B: BinStore<T>,
    O: ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BnbSolverSearchSession")
            .field("state", &self.state)
            .field("best_objective", &self.best_objective)
            .field("best_solution", &self.best_solution)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, B, D, O, S, I> BnbSolverSearchSession<'a, T, B, D, O, S, I>
where
    T: SolverNumeric,
    B: BinStore<T>,
    D: DecisionBuilder<T, B>,
    O: Objective<T> + ?Sized,
    S: TreeSearchMonitor<T>,
    I: IncumbentStore<T>,
{
    #[inline]
    fn new(
        solver: &'a mut BnbSolver<T, B>,
        instance: &'a Instance<T>,
        num_bins: usize,
        objective: &'a O,
        builder: &'a mut D,
        monitor: &'a mut S,
        incumbent: I,
    ) -> Self {
        let state = SearchState::new(num_bins);
        let best_objective = incumbent.initial_upper_bound();
        let symmetric = objective.is_symmetric();
        let largest_sum_completion =
            solver.config.use_largest_sum_completion && objective.depends_only_on_largest_sum();

        Self {
            solver,
            instance,
            objective,
            builder,
            monitor,
            incumbent,
            state,
            symmetric,
            largest_sum_completion,
            best_objective,
            best_solution: None,
            root_lower_bound: T::min_value(),
            stats: BnbSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self) -> BnbSolverOutcome<T> {
        self.monitor.on_enter_search(self.instance, &self.stats);
        log::debug!(
            "branch-and-bound: {} into {} bins, objective {}, builder {}, {}",
            self.instance,
            self.state.num_bins(),
            self.objective.name(),
            self.builder.name(),
            self.solver.config
        );

        self.initialize();

        let termination_reason = loop {
            self.best_objective = self.incumbent.tighten(self.best_objective);
            self.monitor.on_step(self.state.view(), &self.stats);
            self.stats.on_step();

            if let SearchCommand::Terminate(reason) =
                self.monitor.search_command(self.state.view(), &self.stats)
            {
                break TerminationReason::Aborted(reason);
            }

            // Nothing can beat the root bound.
            if self.best_objective <= self.root_lower_bound {
                break TerminationReason::OptimalityProven;
            }

            if self.solver.stack.is_current_level_empty() {
                if self.solver.stack.depth() <= 1 {
                    break TerminationReason::OptimalityProven;
                }
                self.backtrack_step();
            } else {
                self.process_next_decision();
            }
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        self.finalize_result(termination_reason)
    }

    fn finalize_result(self, reason: TerminationReason) -> BnbSolverOutcome<T> {
        log::debug!(
            "branch-and-bound finished: {} after {} nodes, best {}",
            reason,
            self.stats.nodes_explored,
            self.best_objective
        );

        // A partition published by another strategy wins unless ours is at
        // least as good.
        let best = match (self.best_solution, self.incumbent.snapshot()) {
            (Some(local), Some(shared)) if shared.objective_value() < local.objective_value() => {
                Some(shared)
            }
            (Some(local), _) => Some(local),
            (None, shared) => shared,
        };

        match reason {
            TerminationReason::Aborted(reason) => {
                BnbSolverOutcome::aborted(best, reason, self.stats)
            }
            _ => match best {
                Some(partition) => BnbSolverOutcome::optimal(partition, self.stats),
                None => BnbSolverOutcome::infeasible(self.stats),
            },
        }
    }

    /// Sizes the buffers, opens the root frame and enqueues the root decisions.
    fn initialize(&mut self) {
        let num_items = self.instance.num_items();
        self.solver.trail.ensure_capacity(num_items);
        self.solver
            .stack
            .ensure_capacity(self.state.num_bins(), num_items);
        self.solver
            .seen
            .set_max_entries(self.solver.config.max_seen_states);

        self.root_lower_bound = self.objective.lower_bound(
            self.state.sums(),
            self.instance.total_value(),
            true,
        );
        self.stats.set_root_lower_bound(self.root_lower_bound);

        self.solver.trail.push_frame();
        self.solver.stack.push_frame();
        self.stats.on_node_explored();

        if num_items == 0 {
            let value = self.objective.value_to_minimize(self.state.sums(), true);
            self.handle_complete_solution(value);
            return;
        }

        self.enqueue_decisions();
    }

    #[inline]
    fn enqueue_decisions(&mut self) {
        let decisions = self
            .builder
            .next_decision(self.instance, &self.state, self.symmetric);

        let count_before = self.solver.stack.num_entries();
        self.solver.stack.extend(decisions);
        let count = self.solver.stack.num_entries() - count_before;

        self.monitor
            .on_decisions_enqueued(self.state.view(), count, &self.stats);
    }

    #[inline]
    fn backtrack_step(&mut self) {
        self.stats.on_backtrack();
        self.monitor.on_backtrack(self.state.view(), &self.stats);

        self.solver.trail.backtrack(&mut self.state);
        self.solver.stack.pop_frame();
    }

    #[inline]
    fn process_next_decision(&mut self) {
        let Some(decision) = self.solver.stack.pop() else {
            return;
        };
        self.stats.on_decision_generated();

        if let Some(child) = self.build_child(decision) {
            self.descend(child);
        }
    }

    /// Evaluates the child of `decision` without applying it.
    fn build_child(&mut self, decision: Decision) -> Option<ChildNode<T>> {
        let bin = decision.bin().get();
        debug_assert!(
            bin < self.state.num_bins(),
            "called `BnbSolverSearchSession::build_child` with bin index out of bounds: the len is {} but the index is {}",
            self.state.num_bins(),
            bin
        );

        let value = self.instance.value(decision.item());
        let child_depth = self.state.depth() + 1;
        let is_leaf = child_depth == self.instance.num_items();

        let scratch = &mut self.solver.scratch;
        scratch.clear();
        scratch.extend_from_slice(self.state.sums());
        scratch[bin] = scratch[bin].saturating_add_val(value);
        if self.symmetric {
            scratch.sort_unstable();
        }

        let bound = if is_leaf {
            self.objective.value_to_minimize(scratch, self.symmetric)
        } else if self.solver.config.use_lower_bound {
            self.objective.lower_bound(
                scratch,
                self.instance.remaining_from_depth(child_depth),
                self.symmetric,
            )
        } else {
            T::min_value()
        };

        self.monitor
            .on_lower_bound_computed(self.state.view(), bound, &self.stats);

        if bound >= self.best_objective {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(self.state.view(), PruneReason::BoundDominated, &self.stats);
            return None;
        }

        // Positional bins have no canonical fingerprint.
        if !is_leaf
            && self.symmetric
            && self.solver.config.use_seen_states
            && self
                .solver
                .seen
                .check_and_insert(child_depth, &self.solver.scratch)
        {
            self.stats.on_pruning_duplicate();
            self.monitor
                .on_prune(self.state.view(), PruneReason::DuplicateState, &self.stats);
            return None;
        }

        Some(ChildNode {
            bound,
            value,
            decision,
            is_leaf,
        })
    }

    fn descend(&mut self, child: ChildNode<T>) {
        self.solver.trail.push_frame();
        self.solver.trail.apply(
            &mut self.state,
            child.decision.bin(),
            child.decision.item(),
            child.value,
        );
        self.solver.stack.push_frame();

        self.stats.on_node_explored();
        self.stats.on_depth_update(self.state.depth() as u64);
        self.monitor
            .on_descend(self.state.view(), child.decision, &self.stats);

        if child.is_leaf {
            self.handle_complete_solution(child.bound);
            return;
        }

        if self.largest_sum_completion && self.try_largest_sum_completion() {
            return;
        }

        self.enqueue_decisions();
    }

    /// Places every remaining item into the smallest bin when the remaining
    /// total cannot lift that bin above the largest one. For an objective of
    /// the largest sum alone this completion is optimal for the subtree.
    ///
    /// The placements join the current trail frame, so the next backtrack
    /// undoes them together with the decision that led here.
    fn try_largest_sum_completion(&mut self) -> bool {
        let depth = self.state.depth();
        let remaining = self.instance.remaining_from_depth(depth);

        let sums = self.state.sums();
        let Some((smallest_bin, &smallest)) = sums
            .iter()
            .enumerate()
            .min_by_key(|&(_, &sum)| sum)
        else {
            return false;
        };
        let largest = sums.iter().copied().max().unwrap_or(T::ZERO);

        if remaining.saturating_add_val(smallest) > largest {
            return false;
        }

        let bin = BinIndex::new(smallest_bin);
        for d in depth..self.instance.num_items() {
            let item = self.instance.item_at_depth(d);
            let value = self.instance.value(item);
            self.solver.trail.apply(&mut self.state, bin, item, value);
        }
        self.stats.on_heuristic_completion();

        let value = self.objective.value_to_minimize(self.state.sums(), false);
        self.handle_complete_solution(value);
        true
    }

    /// Records the complete assignment of the current state if it improves
    /// on the incumbent.
    fn handle_complete_solution(&mut self, value: T) {
        debug_assert_eq!(
            self.state.depth(),
            self.instance.num_items(),
            "called `BnbSolverSearchSession::handle_complete_solution` on an incomplete state"
        );

        if value >= self.best_objective {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(self.state.view(), PruneReason::BoundDominated, &self.stats);
            return;
        }

        let bins = self.state.bins().copy();
        let partition = if self.symmetric {
            bins.into_partition(value)
        } else {
            bins.into_positional_partition(value)
        };

        self.best_objective = value;
        self.incumbent.on_solution_found(&partition);
        self.stats.on_solution_found();
        self.monitor.on_solution_found(&partition, &self.stats);
        log::trace!(
            "new incumbent {} after {} nodes",
            value,
            self.stats.nodes_explored
        );
        self.best_solution = Some(partition);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        branching::{exhaustive::ExhaustiveBuilder, greedy::CompleteGreedyBuilder},
        monitor::{
            log::LogTreeSearchMonitor, no_op::NoOperationMonitor, solution::SolutionLimitMonitor,
            time::TimeLimitMonitor,
        },
    };
    use partix_model::{
        bins::{ContentBins, SumBins},
        objective::{
            MaximizeKSmallestSums, MaximizeSmallestSum, MaximizeSmallestWeightedSum,
            MinimizeDifference, MinimizeDistanceFromAverage, MinimizeKLargestSums,
            MinimizeLargestSum,
        },
    };
    use crate::state::StateView;
    use partix_search::result::SolverResult;
    use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
    use std::time::Duration;

    type I = i64;

    const WALTER: [I; 7] = [46, 39, 27, 26, 16, 13, 10];

    fn instance(values: &[I]) -> Instance<I> {
        Instance::new(values.to_vec()).unwrap()
    }

    fn solve_content<O>(values: &[I], num_bins: usize, objective: &O) -> BnbSolverOutcome<I>
    where
        O: Objective<I> + ?Sized,
    {
        let instance = instance(values);
        let mut solver = BnbSolver::<I, ContentBins<I>>::new();
        let mut builder = CompleteGreedyBuilder::new();
        let outcome = solver.solve(
            &instance,
            num_bins,
            objective,
            &mut builder,
            NoOperationMonitor::new(),
        );
        if let Some(partition) = outcome.partition() {
            assert_eq!(partition.verify(&instance), Ok(()));
        }
        outcome
    }

    fn optimal_sums(outcome: &BnbSolverOutcome<I>) -> Vec<I> {
        assert!(outcome.is_optimal(), "expected optimal, got {}", outcome.result());
        outcome.partition().map(|p| p.sums().to_vec()).unwrap_or_default()
    }

    /// Enumerates all `num_bins^n` assignments and returns the best key.
    fn brute_force<O>(values: &[I], num_bins: usize, objective: &O) -> I
    where
        O: Objective<I> + ?Sized,
    {
        let n = values.len();
        let mut best = I::MAX;
        let mut assignment = vec![0usize; n];
        loop {
            let mut sums = vec![0; num_bins];
            for (i, &b) in assignment.iter().enumerate() {
                sums[b] += values[i];
            }
            best = best.min(objective.value_to_minimize(&sums, false));

            let mut pos = 0;
            loop {
                if pos == n {
                    return best;
                }
                assignment[pos] += 1;
                if assignment[pos] < num_bins {
                    break;
                }
                assignment[pos] = 0;
                pos += 1;
            }
        }
    }

    #[test]
    fn test_walter_numbers_minimize_largest_sum() {
        let outcome = solve_content(&WALTER, 3, &MinimizeLargestSum);
        assert_eq!(optimal_sums(&outcome), vec![53, 62, 62]);
        assert_eq!(outcome.statistics().root_lower_bound, 59);
    }

    #[test]
    fn test_walter_numbers_maximize_smallest_sum() {
        let outcome = solve_content(&WALTER, 3, &MaximizeSmallestSum);
        assert_eq!(optimal_sums(&outcome), vec![56, 56, 65]);
    }

    #[test]
    fn test_walter_numbers_minimize_difference() {
        let outcome = solve_content(&WALTER, 3, &MinimizeDifference);
        assert_eq!(optimal_sums(&outcome), vec![55, 59, 63]);
        assert_eq!(outcome.partition().map(|p| p.objective_value()), Some(8));
    }

    #[test]
    fn test_walter_numbers_other_objectives() {
        let outcome = solve_content(&WALTER, 3, &MinimizeDistanceFromAverage);
        assert_eq!(outcome.partition().map(|p| p.objective_value()), Some(12));

        let outcome = solve_content(&WALTER, 3, &MaximizeKSmallestSums::new(2));
        assert_eq!(outcome.partition().map(|p| p.objective_value()), Some(-115));

        let outcome = solve_content(&WALTER, 3, &MinimizeKLargestSums::new(2));
        assert_eq!(outcome.partition().map(|p| p.objective_value()), Some(121));
    }

    #[test]
    fn test_two_way_balanced_split() {
        let outcome = solve_content(&[4, 5, 6, 7, 8], 2, &MinimizeDifference);
        assert_eq!(optimal_sums(&outcome), vec![15, 15]);
    }

    #[test]
    fn test_two_way_makespan() {
        let outcome = solve_content(&[4, 5, 5, 6, 7, 8, 8], 2, &MinimizeLargestSum);
        assert_eq!(optimal_sums(&outcome), vec![21, 22]);
    }

    #[test]
    fn test_single_bin_takes_everything() {
        let outcome = solve_content(&[3, 1, 2], 1, &MinimizeLargestSum);
        assert_eq!(optimal_sums(&outcome), vec![6]);
        let partition = outcome.partition().unwrap();
        assert_eq!(partition.bin_items(BinIndex::new(0)).map(<[_]>::len), Some(3));
    }

    #[test]
    fn test_empty_instance_gives_empty_bins() {
        let outcome = solve_content(&[], 3, &MinimizeDifference);
        assert_eq!(optimal_sums(&outcome), vec![0, 0, 0]);
        assert_eq!(outcome.partition().map(|p| p.objective_value()), Some(0));
    }

    #[test]
    fn test_more_bins_than_items() {
        let outcome = solve_content(&[5, 4], 4, &MaximizeSmallestSum);
        assert_eq!(optimal_sums(&outcome), vec![0, 0, 4, 5]);
    }

    #[test]
    #[should_panic(expected = "called `SumBins::new` with zero bins")]
    fn test_zero_bins_panics() {
        let instance = instance(&[1, 2]);
        let mut solver = BnbSolver::<I, SumBins<I>>::new();
        let _ = solver.solve(
            &instance,
            0,
            &MinimizeLargestSum,
            &mut CompleteGreedyBuilder::new(),
            NoOperationMonitor::new(),
        );
    }

    #[test]
    fn test_sums_only_representation_agrees() {
        let instance = instance(&WALTER);
        let mut solver = BnbSolver::<I, SumBins<I>>::preallocated(3, WALTER.len());
        let outcome = solver.solve(
            &instance,
            3,
            &MinimizeLargestSum,
            &mut CompleteGreedyBuilder::preallocated(3),
            NoOperationMonitor::new(),
        );
        let partition = outcome.partition().unwrap();
        assert_eq!(partition.sums(), &[53, 62, 62]);
        assert!(!partition.has_contents());
        assert_eq!(partition.verify(&instance), Ok(()));
    }

    #[test]
    fn test_exhaustive_builder_agrees_with_greedy() {
        let values = [8, 7, 6, 5, 4, 3, 2];
        let instance = instance(&values);
        for num_bins in 2..=3 {
            let mut solver = BnbSolver::<I, SumBins<I>>::with_config(BnbConfig {
                use_seen_states: false,
                ..Default::default()
            });
            let greedy = solver.solve(
                &instance,
                num_bins,
                &MinimizeDifference,
                &mut CompleteGreedyBuilder::new(),
                NoOperationMonitor::new(),
            );
            let exhaustive = solver.solve(
                &instance,
                num_bins,
                &MinimizeDifference,
                &mut ExhaustiveBuilder::new(),
                NoOperationMonitor::new(),
            );
            assert!(greedy.is_optimal() && exhaustive.is_optimal());
            assert_eq!(
                greedy.partition().map(|p| p.objective_value()),
                exhaustive.partition().map(|p| p.objective_value())
            );
        }
    }

    #[test]
    fn test_largest_sum_completion_keeps_optimum() {
        let values = [31, 29, 23, 19, 17, 13, 11, 7, 5, 3, 2];
        let instance = instance(&values);
        let plain = BnbSolver::<I, ContentBins<I>>::new().solve(
            &instance,
            3,
            &MinimizeLargestSum,
            &mut CompleteGreedyBuilder::new(),
            NoOperationMonitor::new(),
        );
        let mut solver = BnbSolver::<I, ContentBins<I>>::with_config(BnbConfig {
            use_largest_sum_completion: true,
            ..Default::default()
        });
        let completed = solver.solve(
            &instance,
            3,
            &MinimizeLargestSum,
            &mut CompleteGreedyBuilder::new(),
            NoOperationMonitor::new(),
        );

        assert!(completed.is_optimal());
        assert_eq!(
            plain.partition().map(|p| p.objective_value()),
            completed.partition().map(|p| p.objective_value())
        );
        assert_eq!(completed.partition().unwrap().verify(&instance), Ok(()));
    }

    #[test]
    fn test_largest_sum_completion_fires_on_dominant_item() {
        // 100 alone in one bin already dominates everything else.
        let instance = instance(&[100, 3, 2, 1]);
        let mut solver = BnbSolver::<I, ContentBins<I>>::with_config(BnbConfig {
            use_largest_sum_completion: true,
            use_lower_bound: false,
            ..Default::default()
        });
        let outcome = solver.solve(
            &instance,
            2,
            &MinimizeLargestSum,
            &mut CompleteGreedyBuilder::new(),
            NoOperationMonitor::new(),
        );
        assert_eq!(optimal_sums(&outcome), vec![6, 100]);
        assert!(outcome.statistics().heuristic_completions >= 1);
    }

    #[test]
    fn test_completion_is_ignored_for_other_objectives() {
        let instance = instance(&[100, 3, 2, 1]);
        let mut solver = BnbSolver::<I, SumBins<I>>::with_config(BnbConfig {
            use_largest_sum_completion: true,
            ..Default::default()
        });
        let outcome = solver.solve(
            &instance,
            2,
            &MaximizeSmallestSum,
            &mut CompleteGreedyBuilder::new(),
            NoOperationMonitor::new(),
        );
        assert_eq!(outcome.statistics().heuristic_completions, 0);
        assert_eq!(outcome.partition().map(|p| p.objective_value()), Some(-6));
    }

    #[test]
    fn test_pruning_switches_do_not_change_optimum() {
        let values = [13, 12, 11, 9, 8, 7, 5, 3];
        let configs = [
            BnbConfig::default(),
            BnbConfig {
                use_lower_bound: false,
                ..Default::default()
            },
            BnbConfig {
                use_seen_states: false,
                ..Default::default()
            },
            BnbConfig {
                use_lower_bound: false,
                use_seen_states: false,
                use_largest_sum_completion: true,
                max_seen_states: 0,
            },
        ];
        let instance = instance(&values);
        let expected = brute_force(&values, 3, &MinimizeLargestSum);
        for config in configs {
            let mut solver = BnbSolver::<I, SumBins<I>>::with_config(config);
            let outcome = solver.solve(
                &instance,
                3,
                &MinimizeLargestSum,
                &mut CompleteGreedyBuilder::new(),
                NoOperationMonitor::new(),
            );
            assert_eq!(
                outcome.partition().map(|p| p.objective_value()),
                Some(expected),
                "config {}",
                config
            );
        }
    }

    #[test]
    fn test_random_instances_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        let objectives: Vec<Box<dyn Objective<I>>> = vec![
            Box::new(MinimizeLargestSum),
            Box::new(MaximizeSmallestSum),
            Box::new(MinimizeDifference),
            Box::new(MinimizeDistanceFromAverage),
            Box::new(MaximizeKSmallestSums::new(2)),
            Box::new(MinimizeKLargestSums::new(2)),
        ];

        for _ in 0..20 {
            let n = rng.random_range(1..=7);
            let num_bins = rng.random_range(1..=3);
            let values: Vec<I> = (0..n).map(|_| rng.random_range(0..40)).collect();
            for objective in &objectives {
                let outcome = solve_content(&values, num_bins, objective.as_ref());
                assert_eq!(
                    outcome.partition().map(|p| p.objective_value()),
                    Some(brute_force(&values, num_bins, objective.as_ref())),
                    "{} on {:?} into {} bins",
                    objective.name(),
                    values,
                    num_bins
                );
            }
        }
    }

    #[test]
    fn test_weighted_objective_keeps_positions() {
        let weights = vec![1, 2];
        let objective = MaximizeSmallestWeightedSum::new(weights).unwrap();
        let values = [6, 5, 4, 3];
        let outcome = solve_content(&values, 2, &objective);
        let partition = outcome.partition().unwrap();

        // Bin 1 has twice the weight of bin 0, so it should get about twice
        // as much: 6 and 12 fit exactly.
        assert_eq!(partition.sums(), &[6, 12]);
        assert_eq!(partition.objective_value(), -12);
        assert_eq!(
            partition.objective_value(),
            brute_force(&values, 2, &objective)
        );
    }

    #[test]
    #[should_panic(expected = "built for 2 bins")]
    fn test_weighted_objective_rejects_other_bin_counts() {
        let objective = MaximizeSmallestWeightedSum::new(vec![1, 2]).unwrap();
        let _ = solve_content(&[1, 2, 3], 3, &objective);
    }

    #[test]
    fn test_time_limit_yields_feasible_or_unknown() {
        let values: Vec<I> = (1..=40).map(|v| v * 7919 % 1000 + 1).collect();
        let instance = instance(&values);
        let mut solver = BnbSolver::<I, SumBins<I>>::new();
        let outcome = solver.solve(
            &instance,
            7,
            &MinimizeDifference,
            &mut CompleteGreedyBuilder::new(),
            TimeLimitMonitor::with_clock_check_mask(Duration::ZERO, 0),
        );
        assert!(outcome.termination_reason().is_aborted());
        assert!(matches!(
            outcome.result(),
            SolverResult::Feasible(_) | SolverResult::Unknown
        ));
    }

    #[test]
    fn test_solution_limit_returns_first_greedy_leaf() {
        let instance = instance(&WALTER);
        let mut solver = BnbSolver::<I, ContentBins<I>>::new();
        let outcome = solver.solve(
            &instance,
            3,
            &MinimizeLargestSum,
            &mut CompleteGreedyBuilder::new(),
            SolutionLimitMonitor::new(1),
        );
        assert!(outcome.termination_reason().is_aborted());
        let partition = outcome.partition().unwrap();
        // The first leaf is the LPT assignment.
        assert_eq!(partition.sums(), &[55, 59, 63]);
        assert_eq!(partition.verify(&instance), Ok(()));
    }

    #[test]
    fn test_warm_start_without_improvement_reports_shared_partition() {
        let instance = instance(&[4, 5, 6, 7, 8]);
        let shared = SharedIncumbent::<I>::new();
        let optimum = Partition::new(0, vec![15, 15], None);
        assert!(shared.try_install(&optimum));

        let mut solver = BnbSolver::<I, SumBins<I>>::new();
        let outcome = solver.solve_with_incumbent(
            &instance,
            2,
            &MinimizeDifference,
            &mut CompleteGreedyBuilder::new(),
            NoOperationMonitor::new(),
            &shared,
        );
        assert!(outcome.is_optimal());
        assert_eq!(outcome.partition(), Some(&optimum));
        assert_eq!(outcome.statistics().solutions_found, 0);
    }

    #[test]
    fn test_shared_incumbent_receives_improvements() {
        let instance = instance(&WALTER);
        let shared = SharedIncumbent::<I>::new();
        let mut solver = BnbSolver::<I, ContentBins<I>>::new();
        let outcome = solver.solve_with_incumbent(
            &instance,
            3,
            &MinimizeLargestSum,
            &mut CompleteGreedyBuilder::new(),
            NoOperationMonitor::new(),
            &shared,
        );
        assert!(outcome.is_optimal());
        assert_eq!(shared.upper_bound(), 62);
        assert_eq!(shared.snapshot().as_ref(), outcome.partition());
    }

    #[test]
    fn test_solver_is_reusable() {
        let mut solver = BnbSolver::<I, SumBins<I>>::new();
        let mut builder = CompleteGreedyBuilder::new();
        let first = solver.solve(
            &instance(&WALTER),
            3,
            &MinimizeLargestSum,
            &mut builder,
            NoOperationMonitor::new(),
        );
        let second = solver.solve(
            &instance(&[4, 5, 6, 7, 8]),
            2,
            &MinimizeLargestSum,
            &mut builder,
            NoOperationMonitor::new(),
        );
        let again = solver.solve(
            &instance(&WALTER),
            3,
            &MinimizeLargestSum,
            &mut builder,
            NoOperationMonitor::new(),
        );
        assert_eq!(first.partition(), again.partition());
        assert_eq!(second.partition().map(|p| p.objective_value()), Some(15));
        assert_eq!(first.statistics().nodes_explored, again.statistics().nodes_explored);
    }

    #[test]
    fn test_statistics_are_coherent() {
        let _ = env_logger::builder().is_test(true).try_init();
        let instance = instance(&WALTER);
        let mut solver = BnbSolver::<I, SumBins<I>>::new();
        let mut monitor = LogTreeSearchMonitor::new(Duration::ZERO, 0);
        let outcome = solver.solve(
            &instance,
            3,
            &MinimizeDifference,
            &mut CompleteGreedyBuilder::new(),
            &mut monitor,
        );
        let stats = outcome.statistics();
        assert!(stats.solutions_found >= 1);
        assert!(stats.nodes_explored >= WALTER.len() as u64 + 1);
        assert!(stats.max_depth <= WALTER.len() as u64);
        assert!(stats.decisions_generated >= stats.nodes_explored - 1);
        assert!(stats.steps >= stats.decisions_generated);
        assert_eq!(monitor.best_objective(), Some(8));
    }

    #[test]
    fn test_narrow_value_type() {
        let instance = Instance::new(vec![9i8, 8, 7, 6, 5]).unwrap();
        let mut solver = BnbSolver::<i8, SumBins<i8>>::new();
        let outcome = solver.solve(
            &instance,
            2,
            &MinimizeLargestSum,
            &mut CompleteGreedyBuilder::new(),
            NoOperationMonitor::new(),
        );
        assert_eq!(outcome.partition().map(|p| p.sums().to_vec()), Some(vec![17, 18]));
    }

    #[test]
    fn test_random_sums_only_matches_contents() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            let n = rng.random_range(3..=9);
            let values: Vec<I> = (0..n).map(|_| rng.random_range(1..100)).collect();
            let instance = instance(&values);
            let sums = BnbSolver::<I, SumBins<I>>::new().solve(
                &instance,
                3,
                &MinimizeDifference,
                &mut CompleteGreedyBuilder::new(),
                NoOperationMonitor::new(),
            );
            let contents = BnbSolver::<I, ContentBins<I>>::new().solve(
                &instance,
                3,
                &MinimizeDifference,
                &mut CompleteGreedyBuilder::new(),
                NoOperationMonitor::new(),
            );
            assert_eq!(
                sums.partition().map(|p| p.sums().to_vec()),
                contents.partition().map(|p| p.sums().to_vec())
            );
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_distance_keys_beyond_value_type_panic() {
        let narrow = Instance::new(vec![33i8, 21, 21, 21]).unwrap();
        let _ = BnbSolver::<i8, SumBins<i8>>::new().solve(
            &narrow,
            3,
            &MinimizeDistanceFromAverage,
            &mut CompleteGreedyBuilder::new(),
            NoOperationMonitor::new(),
        );
    }

    #[test]
    fn test_narrow_distance_keys_match_wide_brute_force() {
        const VALUES: [i8; 4] = [1, 4, 7, 10];
        let mut solver = BnbSolver::<i8, SumBins<i8>>::new();
        for code in 0..VALUES.len().pow(4) {
            let values: Vec<i8> = (0..4)
                .map(|i| VALUES[code / VALUES.len().pow(i) % VALUES.len()])
                .collect();
            let narrow = Instance::new(values.clone()).unwrap();
            let outcome = solver.solve(
                &narrow,
                3,
                &MinimizeDistanceFromAverage,
                &mut CompleteGreedyBuilder::new(),
                NoOperationMonitor::new(),
            );
            assert!(outcome.is_optimal());

            let wide: Vec<I> = values.iter().map(|&v| I::from(v)).collect();
            let sums: Vec<I> = outcome
                .partition()
                .unwrap()
                .sums()
                .iter()
                .map(|&s| I::from(s))
                .collect();
            assert_eq!(
                MinimizeDistanceFromAverage.value_to_minimize(&sums, false),
                brute_force(&wide, 3, &MinimizeDistanceFromAverage),
                "{:?} into 3 bins",
                values
            );
        }
    }

    #[test]
    fn test_more_solutions_never_worsen_the_result() {
        let mut rng = StdRng::seed_from_u64(0xA11);
        let values: Vec<I> = (0..14).map(|_| rng.random_range(1..500)).collect();
        let instance = instance(&values);
        let optimum = solve_content(&values, 3, &MinimizeDifference)
            .partition()
            .map(|p| p.objective_value())
            .unwrap();

        let mut solver = BnbSolver::<I, SumBins<I>>::new();
        let mut previous = I::MAX;
        for limit in 1..=12 {
            let outcome = solver.solve(
                &instance,
                3,
                &MinimizeDifference,
                &mut CompleteGreedyBuilder::new(),
                SolutionLimitMonitor::new(limit),
            );
            let value = outcome.partition().map(|p| p.objective_value()).unwrap();
            assert!(
                value <= previous,
                "limit {} gave {} after {}",
                limit,
                value,
                previous
            );
            assert!(value >= optimum);
            previous = value;
        }
    }

    #[test]
    fn test_item_order_does_not_change_the_optimum() {
        let mut rng = StdRng::seed_from_u64(0x5117);
        let objectives: Vec<Box<dyn Objective<I>>> = vec![
            Box::new(MinimizeLargestSum),
            Box::new(MaximizeSmallestSum),
            Box::new(MinimizeDifference),
            Box::new(MinimizeDistanceFromAverage),
            Box::new(MinimizeKLargestSums::new(2)),
        ];

        for _ in 0..10 {
            let n = rng.random_range(1..=10);
            let num_bins = rng.random_range(2..=4);
            let values: Vec<I> = (0..n).map(|_| rng.random_range(1..60)).collect();
            let mut shuffled = values.clone();
            shuffled.shuffle(&mut rng);
            for objective in &objectives {
                let original = solve_content(&values, num_bins, objective.as_ref());
                let permuted = solve_content(&shuffled, num_bins, objective.as_ref());
                assert!(original.is_optimal() && permuted.is_optimal());
                assert_eq!(
                    original.partition().map(|p| p.objective_value()),
                    permuted.partition().map(|p| p.objective_value()),
                    "{} on {:?} and {:?}",
                    objective.name(),
                    values,
                    shuffled
                );
            }
        }
    }

    #[test]
    fn test_weighted_objective_skips_duplicate_detection() {
        let objective = MaximizeSmallestWeightedSum::new(vec![1, 2]).unwrap();
        let outcome = solve_content(&[3, 3, 3, 3, 2, 2, 1], 2, &objective);
        assert!(outcome.is_optimal());
        assert_eq!(outcome.statistics().prunings_duplicate, 0);
        assert_eq!(
            outcome.partition().map(|p| p.objective_value()),
            Some(brute_force(&[3, 3, 3, 3, 2, 2, 1], 2, &objective))
        );
    }

    /// Publishes a better partition on behalf of another strategy as soon as
    /// the search reports its first solution.
    struct ExternalImprovement<'a> {
        shared: &'a SharedIncumbent<I>,
        external: Partition<I>,
    }

    impl TreeSearchMonitor<I> for ExternalImprovement<'_> {
        fn name(&self) -> &str {
            "ExternalImprovement"
        }

        fn on_enter_search(&mut self, _: &Instance<I>, _: &BnbSolverStatistics<I>) {}

        fn on_exit_search(&mut self, _: &BnbSolverStatistics<I>) {}

        fn on_step(&mut self, _: StateView<'_, I>, _: &BnbSolverStatistics<I>) {}

        fn on_solution_found(&mut self, _: &Partition<I>, _: &BnbSolverStatistics<I>) {
            let _ = self.shared.try_install(&self.external);
        }
    }

    #[test]
    fn test_better_shared_partition_is_reported() {
        let instance = instance(&WALTER);
        let shared = SharedIncumbent::<I>::new();
        let external = Partition::new(62, vec![53, 62, 62], None);
        let monitor = ExternalImprovement {
            shared: &shared,
            external: external.clone(),
        };

        let mut solver = BnbSolver::<I, SumBins<I>>::new();
        let outcome = solver.solve_with_incumbent(
            &instance,
            3,
            &MinimizeLargestSum,
            &mut CompleteGreedyBuilder::new(),
            monitor,
            &shared,
        );
        assert!(outcome.is_optimal());
        assert_eq!(outcome.statistics().solutions_found, 1);
        assert_eq!(outcome.partition(), Some(&external));
    }
}
