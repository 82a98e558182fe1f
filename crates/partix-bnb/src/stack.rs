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

use crate::branching::decision::Decision;

/// A frame-structured LIFO stack of pending decisions.
///
/// All enqueued decisions live in one linear vector; `frames` marks where
/// each decision level begins. Popping a frame truncates the entries back to
/// the recorded start, discarding the untried siblings of that level.
#[derive(Clone, Debug, Default)]
pub struct SearchStack {
    entries: Vec<Decision>,
    /// `frames[i]` is the index in `entries` where level `i` began.
    frames: Vec<usize>,
}

impl SearchStack {
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Creates a stack sized for `num_items` levels of at most `num_bins`
    /// decisions each.
    #[inline]
    pub fn preallocated(num_bins: usize, num_items: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_items.saturating_mul(num_bins)),
            frames: Vec::with_capacity(num_items.saturating_add(1)),
        }
    }

    /// Ensures the stack has capacity for the given problem size.
    #[inline]
    pub fn ensure_capacity(&mut self, num_bins: usize, num_items: usize) {
        let entry_capacity = num_items.saturating_mul(num_bins);
        let frame_capacity = num_items.saturating_add(1);

        if self.entries.capacity() < entry_capacity {
            self.entries.reserve(entry_capacity - self.entries.len());
        }
        if self.frames.capacity() < frame_capacity {
            self.frames.reserve(frame_capacity - self.frames.len());
        }
    }

    #[inline]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of open levels.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Opens a new decision level.
    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Closes the current level and drops its remaining decisions.
    #[inline]
    pub fn pop_frame(&mut self) -> Option<()> {
        let start = self.frames.pop()?;
        self.entries.truncate(start);
        Some(())
    }

    #[inline]
    pub fn push(&mut self, decision: Decision) {
        self.entries.push(decision);
    }

    #[inline]
    pub fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Decision>,
    {
        self.entries.extend(iter);
    }

    /// Pops the most recently pushed decision.
    #[inline]
    pub fn pop(&mut self) -> Option<Decision> {
        self.entries.pop()
    }

    /// Clears all entries and frames but keeps the allocations.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }

    /// Returns `true` if the current level has no decisions left.
    #[inline]
    pub fn is_current_level_empty(&self) -> bool {
        match self.frames.last() {
            Some(&start) => self.entries.len() == start,
            None => true,
        }
    }

    /// Returns the untried decisions of the current level.
    #[inline]
    pub fn current_frame_entries(&self) -> &[Decision] {
        match self.frames.last() {
            Some(&start) => &self.entries[start..],
            None => &[],
        }
    }

    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        self.entries.capacity() * std::mem::size_of::<Decision>()
            + self.frames.capacity() * std::mem::size_of::<usize>()
    }
}

impl std::fmt::Display for SearchStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchStack(entries: {}, frames: {})",
            self.entries.len(),
            self.frames.len()
        )
    }
}
