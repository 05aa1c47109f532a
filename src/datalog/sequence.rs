//! Ring-buffered value sequences.

use std::collections::VecDeque;

use crate::view::Range;

/// One append-only numeric series, addressed by absolute sample index.
///
/// Only the newest `capacity` values are retained. Indices before
/// [`index_begin`](Self::index_begin) have been evicted; the running minimum
/// and maximum still cover every value ever appended.
#[derive(Debug, Clone)]
pub struct DataSequence {
    values: VecDeque<f64>,
    capacity: usize,
    begin: usize,
    min: Option<f64>,
    max: Option<f64>,
}

impl DataSequence {
    /// Create an empty sequence whose first sample will land at `first_index`.
    pub fn starting_at(first_index: usize, capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity.min(1024)),
            capacity: capacity.max(1),
            begin: first_index,
            min: None,
            max: None,
        }
    }

    /// Append a value, evicting the oldest when the buffer is full.
    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
            self.begin += 1;
        }
        self.values.push_back(value);
        if !value.is_nan() {
            self.min = Some(self.min.map_or(value, |min| min.min(value)));
            self.max = Some(self.max.map_or(value, |max| max.max(value)));
        }
    }

    /// First retained sample index.
    pub fn index_begin(&self) -> usize {
        self.begin
    }

    /// One past the newest sample index.
    pub fn index_end(&self) -> usize {
        self.begin + self.values.len()
    }

    /// Number of retained values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no values are retained.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check whether a sample index is retained.
    pub fn has_data(&self, index: usize) -> bool {
        index >= self.begin && index < self.index_end()
    }

    /// Value at an absolute sample index.
    pub fn get(&self, index: usize) -> Option<f64> {
        let offset = index.checked_sub(self.begin)?;
        self.values.get(offset).copied()
    }

    /// Smallest value ever appended.
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    /// Largest value ever appended.
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Retained indices that fall inside a data-space X window.
    ///
    /// Window bounds are truncated toward zero, and the upper bound is
    /// exclusive. An inverted window yields an empty range.
    pub fn visible_indices(&self, window: Range) -> std::ops::Range<usize> {
        let start = truncate_index(window.min).max(self.begin);
        let end = truncate_index(window.max).min(self.index_end());
        start.min(end)..end
    }

    /// Drop every value and restart at `first_index`.
    pub fn clear(&mut self, first_index: usize) {
        self.values.clear();
        self.begin = first_index;
        self.min = None;
        self.max = None;
    }
}

fn truncate_index(value: f64) -> usize {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.trunc() as usize
    }
}
