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

//! Exact dynamic programming over bin-sum states.
//!
//! Layer `d` holds every distinct vector of bin sums reachable by placing the
//! first `d` items (largest first). For interchangeable bins the vectors are
//! kept sorted ascending, which merges all relabelings of a state into one
//! entry. The search is exact and has no anytime behaviour: it either ends
//! with the optimum or fails with a `DpError` once a layer exceeds its
//! budget. Monitors see one step per generated state, so a portfolio can
//! still stop it from outside.
//!
//! In contents mode every state remembers its parent and the bin position the
//! item went to, and the partition is rebuilt by replaying those positions.

use crate::{error::DpError, result::DpSolverOutcome, stats::DpSolverStatistics};
use partix_core::num::SolverNumeric;
use partix_model::{
    bins::BinStore, index::BinIndex, instance::Instance, objective::Objective,
    partition::Partition,
};
use partix_search::{
    incumbent::SharedIncumbent,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Default number of states allowed in a single layer.
pub const DEFAULT_MAX_STATES: usize = 1 << 21;

type Sums<T> = SmallVec<[T; 8]>;

/// Limits of the dynamic programming search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DpConfig {
    /// States allowed per layer; `None` lifts the limit.
    pub max_states: Option<usize>,
}

impl Default for DpConfig {
    fn default() -> Self {
        Self {
            max_states: Some(DEFAULT_MAX_STATES),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BackPointer {
    parent: usize,
    position: usize,
}

/// The dynamic programming engine.
///
/// `B` decides whether the partition contents are reconstructed
/// (`ContentBins`) or only the sums are reported (`SumBins`).
#[derive(Debug, Clone)]
pub struct DpSolver<T, B> {
    current: Vec<Sums<T>>,
    next: Vec<Sums<T>>,
    index: FxHashMap<Sums<T>, usize>,
    /// `back_pointers[d][s]` leads from state `s` of layer `d + 1` to layer `d`.
    back_pointers: Vec<Vec<BackPointer>>,
    scratch: Sums<T>,
    config: DpConfig,
    _phantom: std::marker::PhantomData<B>,
}

impl<T, B> Default for DpSolver<T, B>
where
    T: SolverNumeric,
    B: BinStore<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, B> DpSolver<T, B>
where
    T: SolverNumeric,
    B: BinStore<T>,
{
    #[inline]
    pub fn new() -> Self {
        Self::with_config(DpConfig::default())
    }

    #[inline]
    pub fn with_config(config: DpConfig) -> Self {
        Self {
            current: Vec::new(),
            next: Vec::new(),
            index: FxHashMap::default(),
            back_pointers: Vec::new(),
            scratch: SmallVec::new(),
            config,
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn config(&self) -> &DpConfig {
        &self.config
    }

    #[inline]
    pub fn set_config(&mut self, config: DpConfig) {
        self.config = config;
    }

    /// Solves `instance` into `num_bins` bins.
    ///
    /// `monitor` is stepped once per item and may stop the search between
    /// states; a stopped search reports `Unknown`.
    ///
    /// # Errors
    ///
    /// Fails when a layer outgrows `max_states`, when a sum overflows, or when
    /// the objective's keys for this instance do not fit `T`.
    ///
    /// # Panics
    ///
    /// Panics if `num_bins` is zero, or if the objective is tied to a
    /// different number of bins.
    #[inline]
    pub fn solve<O, S>(
        &mut self,
        instance: &Instance<T>,
        num_bins: usize,
        objective: &O,
        monitor: &mut S,
    ) -> Result<DpSolverOutcome<T>, DpError>
    where
        O: Objective<T> + ?Sized,
        S: SearchMonitor<T> + ?Sized,
    {
        self.solve_internal(instance, num_bins, objective, monitor, None)
    }

    /// Solves `instance` while cooperating through `incumbent`.
    ///
    /// States whose lower bound cannot beat the published bound are dropped.
    /// When every state is dropped the published partition is optimal and is
    /// reported as such.
    #[inline]
    pub fn solve_with_incumbent<O, S>(
        &mut self,
        instance: &Instance<T>,
        num_bins: usize,
        objective: &O,
        monitor: &mut S,
        incumbent: &SharedIncumbent<T>,
    ) -> Result<DpSolverOutcome<T>, DpError>
    where
        O: Objective<T> + ?Sized,
        S: SearchMonitor<T> + ?Sized,
    {
        self.solve_internal(instance, num_bins, objective, monitor, Some(incumbent))
    }

    fn solve_internal<O, S>(
        &mut self,
        instance: &Instance<T>,
        num_bins: usize,
        objective: &O,
        monitor: &mut S,
        incumbent: Option<&SharedIncumbent<T>>,
    ) -> Result<DpSolverOutcome<T>, DpError>
    where
        O: Objective<T> + ?Sized,
        S: SearchMonitor<T> + ?Sized,
    {
        assert!(
            num_bins > 0,
            "called `DpSolver::solve` with zero bins: at least one bin is required"
        );
        if let Some(expected) = objective.expected_num_bins() {
            assert_eq!(
                expected,
                num_bins,
                "called `DpSolver::solve` with {} bins for objective `{}` built for {} bins",
                num_bins,
                objective.name(),
                expected
            );
        }
        if objective.check_range(num_bins, instance.total_value()).is_err() {
            return Err(DpError::KeyOverflow {
                objective: objective.name().to_string(),
                num_bins,
            });
        }

        let start_time = std::time::Instant::now();
        let mut stats = DpSolverStatistics::default();
        monitor.on_enter_search(instance);
        log::debug!(
            "dynamic programming: {} into {} bins, objective {}, contents {}",
            instance,
            num_bins,
            objective.name(),
            B::KEEPS_CONTENTS
        );

        self.reset();
        let result = self.run_layers(instance, num_bins, objective, &mut *monitor, incumbent, &mut stats);

        stats.set_total_time(start_time.elapsed());
        let outcome = match result {
            Ok(LayerRun::Completed) => {
                let outcome = self.finalize(instance, num_bins, objective, incumbent, stats);
                if let Some(partition) = outcome.partition() {
                    monitor.on_solution_found(partition);
                }
                Ok(outcome)
            }
            Ok(LayerRun::Aborted(reason)) => {
                let known = incumbent.and_then(SharedIncumbent::snapshot);
                Ok(DpSolverOutcome::aborted(known, reason, stats))
            }
            Err(err) => Err(err),
        };
        monitor.on_exit_search();
        self.reset();
        outcome
    }

    /// Builds layer after layer until every item is placed.
    fn run_layers<O, S>(
        &mut self,
        instance: &Instance<T>,
        num_bins: usize,
        objective: &O,
        monitor: &mut S,
        incumbent: Option<&SharedIncumbent<T>>,
        stats: &mut DpSolverStatistics,
    ) -> Result<LayerRun, DpError>
    where
        O: Objective<T> + ?Sized,
        S: SearchMonitor<T> + ?Sized,
    {
        let symmetric = objective.is_symmetric();
        let num_items = instance.num_items();
        self.current.push(SmallVec::from_elem(T::ZERO, num_bins));

        for depth in 0..num_items {
            monitor.on_step();
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                return Ok(LayerRun::Aborted(reason));
            }

            let item = instance.item_at_depth(depth);
            let value = instance.value(item);
            let remaining = instance.remaining_from_depth(depth + 1);
            let is_last = depth + 1 == num_items;
            let upper_bound = incumbent.map_or(T::max_value(), SharedIncumbent::upper_bound_as);

            self.next.clear();
            self.index.clear();
            let mut pointers = Vec::new();

            for (parent, sums) in self.current.iter().enumerate() {
                let mut previous: Option<T> = None;
                for position in 0..num_bins {
                    let sum = sums[position];
                    // Sorted, so equal sums are adjacent.
                    if symmetric && previous == Some(sum) {
                        continue;
                    }
                    previous = Some(sum);

                    let placed = sum.checked_add_val(value).ok_or(DpError::SumOverflow)?;
                    self.scratch.clear();
                    self.scratch.extend_from_slice(sums);
                    self.scratch[position] = placed;
                    if symmetric {
                        self.scratch.sort_unstable();
                    }

                    // Every generated state is one step for the monitors.
                    stats.on_state_generated();
                    monitor.on_step();
                    if let SearchCommand::Terminate(reason) = monitor.search_command() {
                        return Ok(LayerRun::Aborted(reason));
                    }

                    if upper_bound < T::max_value() {
                        let bound = if is_last {
                            objective.value_to_minimize(&self.scratch, symmetric)
                        } else {
                            objective.lower_bound(&self.scratch, remaining, symmetric)
                        };
                        if bound >= upper_bound {
                            stats.on_state_pruned();
                            continue;
                        }
                    }

                    if self.index.contains_key(&self.scratch) {
                        stats.on_state_merged();
                        continue;
                    }

                    if let Some(limit) = self.config.max_states {
                        if self.next.len() >= limit {
                            return Err(DpError::StateLimitExceeded {
                                item_index: item.get(),
                                limit,
                            });
                        }
                    }

                    self.index.insert(self.scratch.clone(), self.next.len());
                    self.next.push(self.scratch.clone());
                    if B::KEEPS_CONTENTS {
                        pointers.push(BackPointer { parent, position });
                    }
                }
            }

            stats.on_layer_completed(self.next.len());
            log::debug!(
                "dp layer {}/{}: value {}, {} states",
                depth + 1,
                num_items,
                value,
                self.next.len()
            );

            std::mem::swap(&mut self.current, &mut self.next);
            if B::KEEPS_CONTENTS {
                self.back_pointers.push(pointers);
            }
            if self.current.is_empty() {
                break;
            }
        }

        Ok(LayerRun::Completed)
    }

    /// Picks the best state of the last layer and turns it into a partition.
    fn finalize<O>(
        &self,
        instance: &Instance<T>,
        num_bins: usize,
        objective: &O,
        incumbent: Option<&SharedIncumbent<T>>,
        stats: DpSolverStatistics,
    ) -> DpSolverOutcome<T>
    where
        O: Objective<T> + ?Sized,
    {
        let symmetric = objective.is_symmetric();

        let mut best: Option<(usize, T)> = None;
        for (index, sums) in self.current.iter().enumerate() {
            let value = objective.value_to_minimize(sums, symmetric);
            if best.is_none_or(|(_, best_value)| value < best_value) {
                best = Some((index, value));
            }
        }

        let Some((best_index, best_value)) = best else {
            // Every state was dominated by the published incumbent.
            return match incumbent.and_then(SharedIncumbent::snapshot) {
                Some(partition) => DpSolverOutcome::optimal(partition, stats),
                None => DpSolverOutcome::aborted(None, "all states pruned", stats),
            };
        };

        let partition = if B::KEEPS_CONTENTS {
            self.replay(instance, num_bins, best_index, best_value, symmetric)
        } else {
            Partition::new(best_value, self.current[best_index].to_vec(), None)
        };

        if let Some(incumbent) = incumbent {
            incumbent.try_install(&partition);
        }
        DpSolverOutcome::optimal(partition, stats)
    }

    /// Follows the back-pointers of `state` to the root and replays the
    /// recorded positions over fresh bins.
    fn replay(
        &self,
        instance: &Instance<T>,
        num_bins: usize,
        state: usize,
        objective_value: T,
        symmetric: bool,
    ) -> Partition<T> {
        let num_items = instance.num_items();
        let mut positions = vec![0usize; num_items];
        let mut index = state;
        for depth in (0..num_items).rev() {
            let pointer = self.back_pointers[depth][index];
            positions[depth] = pointer.position;
            index = pointer.parent;
        }

        let mut bins = B::new(num_bins);
        for (depth, &position) in positions.iter().enumerate() {
            let item = instance.item_at_depth(depth);
            bins.add_item(BinIndex::new(position), item, instance.value(item));
            if symmetric {
                bins.sort_ascending();
            }
        }
        debug_assert_eq!(
            bins.sums(),
            &self.current[state][..],
            "called `DpSolver::replay` with inconsistent back-pointers"
        );

        if symmetric {
            bins.into_partition(objective_value)
        } else {
            bins.into_positional_partition(objective_value)
        }
    }

    /// Clears the per-run state but keeps the allocations.
    #[inline]
    fn reset(&mut self) {
        self.current.clear();
        self.next.clear();
        self.index.clear();
        self.back_pointers.clear();
        self.scratch.clear();
    }
}

enum LayerRun {
    Completed,
    Aborted(String),
}
