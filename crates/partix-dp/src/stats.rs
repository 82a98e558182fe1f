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

use std::time::Duration;

/// Counters of one dynamic programming run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DpSolverStatistics {
    /// Items whose layer was completed.
    pub items_processed: u64,
    /// Child states generated, duplicates included.
    pub states_generated: u64,
    /// Child states merged into an existing state of the same layer.
    pub states_merged: u64,
    /// Child states dropped because their bound could not beat the incumbent.
    pub states_pruned: u64,
    /// The size of the largest layer.
    pub max_layer_size: u64,
    pub time_total: Duration,
}

impl DpSolverStatistics {
    #[inline(always)]
    pub fn on_state_generated(&mut self) {
        self.states_generated = self.states_generated.saturating_add(1);
    }

    #[inline(always)]
    pub fn on_state_merged(&mut self) {
        self.states_merged = self.states_merged.saturating_add(1);
    }

    #[inline(always)]
    pub fn on_state_pruned(&mut self) {
        self.states_pruned = self.states_pruned.saturating_add(1);
    }

    #[inline(always)]
    pub fn on_layer_completed(&mut self, layer_size: usize) {
        self.items_processed = self.items_processed.saturating_add(1);
        self.max_layer_size = self.max_layer_size.max(layer_size as u64);
    }

    #[inline(always)]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for DpSolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Partix-DP Solver Statistics:")?;
        writeln!(f, "  Items Processed:  {}", self.items_processed)?;
        writeln!(f, "  States Generated: {}", self.states_generated)?;
        writeln!(f, "  States Merged:    {}", self.states_merged)?;
        writeln!(f, "  States Pruned:    {}", self.states_pruned)?;
        writeln!(f, "  Max Layer Size:   {}", self.max_layer_size)?;
        writeln!(f, "  Total Time:       {:.2?}", self.time_total)
    }
}
