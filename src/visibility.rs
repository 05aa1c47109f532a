//! Per-sequence visibility.

use std::collections::BTreeSet;

/// Default number of sequences whose visibility can be toggled.
pub const DEFAULT_VISIBILITY_CAPACITY: usize = 10;

/// Visibility flags keyed by sequence index.
///
/// Only indices below the capacity can be hidden. Sequences past the capacity
/// are always shown, so a log can grow new sequences without them vanishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceVisibility {
    capacity: usize,
    hidden: BTreeSet<usize>,
}

impl SequenceVisibility {
    /// Create a visibility set where every sequence is shown.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            hidden: BTreeSet::new(),
        }
    }

    /// Number of toggleable sequences.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check whether a sequence participates in drawing and autoscale.
    pub fn is_visible(&self, index: usize) -> bool {
        index >= self.capacity || !self.hidden.contains(&index)
    }

    /// Flip a sequence's visibility. Returns the new state.
    ///
    /// Indices past the capacity stay visible.
    pub fn toggle(&mut self, index: usize) -> bool {
        if index >= self.capacity {
            return true;
        }
        if !self.hidden.remove(&index) {
            self.hidden.insert(index);
        }
        self.is_visible(index)
    }

    /// Show every sequence again.
    pub fn reset(&mut self) {
        self.hidden.clear();
    }

    /// Iterate over the hidden indices in ascending order.
    pub fn hidden(&self) -> impl Iterator<Item = usize> + '_ {
        self.hidden.iter().copied()
    }
}

impl Default for SequenceVisibility {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBILITY_CAPACITY)
    }
}
