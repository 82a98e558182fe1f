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

use crate::state::SearchState;
use partix_core::num::SolverNumeric;
use partix_model::{
    bins::BinStore,
    index::{BinIndex, ItemIndex},
};

/// One placement applied to the search state.
///
/// Holds enough to undo the placement: the bin, the item and its value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TrailEntry<T> {
    value: T,
    item: ItemIndex,
    bin: BinIndex,
}

impl<T> TrailEntry<T>
where
    T: Copy,
{
    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    #[inline]
    pub fn item(&self) -> ItemIndex {
        self.item
    }

    #[inline]
    pub fn bin(&self) -> BinIndex {
        self.bin
    }
}

impl<T> std::fmt::Display for TrailEntry<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TrailEntry(bin: {}, item: {}, value: {})",
            self.bin.get(),
            self.item.get(),
            self.value
        )
    }
}

/// A linear undo log with frame markers.
///
/// 1. `push_frame` before applying the placements of one search node,
/// 2. `apply` for every placement of that node,
/// 3. `backtrack` to undo all placements since the last frame.
///
/// A frame may hold more than one placement: the largest-sum completion
/// places every remaining item inside the frame of the node that triggered it.
#[derive(Debug, Clone)]
pub struct SearchTrail<T> {
    entries: Vec<TrailEntry<T>>,
    /// `frames[i]` is the index in `entries` where frame `i` began.
    frames: Vec<usize>,
}

impl<T> Default for SearchTrail<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SearchTrail<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Reserves `num_items` entries and `num_items + 1` frames.
    #[inline]
    pub fn preallocated(num_items: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_items),
            frames: Vec::with_capacity(num_items.saturating_add(1)),
        }
    }

    #[inline]
    pub fn ensure_capacity(&mut self, num_items: usize) {
        let frame_capacity = num_items.saturating_add(1);
        if self.entries.capacity() < num_items {
            self.entries.reserve(num_items - self.entries.len());
        }
        if self.frames.capacity() < frame_capacity {
            self.frames.reserve(frame_capacity - self.frames.len());
        }
    }

    #[inline]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[TrailEntry<T>] {
        &self.entries
    }

    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }

    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        self.entries.capacity() * std::mem::size_of::<TrailEntry<T>>()
            + self.frames.capacity() * std::mem::size_of::<usize>()
    }
}

impl<T> SearchTrail<T>
where
    T: SolverNumeric,
{
    /// Opens a new frame.
    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Places `item` into `bin` and records the placement.
    #[inline]
    pub fn apply<B>(&mut self, state: &mut SearchState<T, B>, bin: BinIndex, item: ItemIndex, value: T)
    where
        B: BinStore<T>,
    {
        state.place(bin, item, value);
        self.entries.push(TrailEntry { value, item, bin });
    }

    /// Undoes every placement of the current frame and closes it.
    ///
    /// Returns `false` if there was no frame to undo.
    #[inline]
    pub fn backtrack<B>(&mut self, state: &mut SearchState<T, B>) -> bool
    where
        B: BinStore<T>,
    {
        let Some(start) = self.frames.pop() else {
            return false;
        };

        while self.entries.len() > start {
            if let Some(entry) = self.entries.pop() {
                state.unplace(entry.bin, entry.item, entry.value);
            }
        }
        true
    }
}

impl<T> std::fmt::Display for SearchTrail<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchTrail(entries: {}, frames: {})",
            self.entries.len(),
            self.frames.len()
        )
    }
}
