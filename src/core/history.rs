//! Bounded, most-recent-first result history.

use std::collections::VecDeque;

/// Default number of results kept for display.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Fixed-capacity buffer that keeps the newest entry at the head.
///
/// Pushing at capacity evicts the oldest entry (the tail). There is no other
/// removal path and entries are never updated in place.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> History<T> {
    /// Create an empty history with room for `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert a new head, evicting the tail if full.
    pub fn push(&mut self, entry: T) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(entry);
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent entry.
    pub fn head(&self) -> Option<&T> {
        self.entries.front()
    }

    /// Iterate most-recent-first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

impl<T: Clone> History<T> {
    /// Owned copy of the entries, most-recent-first.
    pub fn snapshot(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
