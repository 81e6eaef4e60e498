//! Bounded roll history, most recent first.
//!
//! Entries are ordered by roll id, not by completion time, so a roll that
//! finishes after a newer one still lands behind it. When full, the oldest
//! entry is evicted.

use fairdice_types::RollRecord;
use std::collections::VecDeque;

/// Default number of rolls kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 8;

pub struct RollHistory {
    entries: VecDeque<(u64, RollRecord)>,
    capacity: usize,
}

impl RollHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert a roll, evicting the oldest entry if over capacity.
    pub fn insert(&mut self, roll_id: u64, record: RollRecord) {
        if self.capacity == 0 {
            return;
        }
        let pos = self
            .entries
            .iter()
            .position(|(id, _)| *id < roll_id)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, (roll_id, record));
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// Records, most recent first.
    pub fn records(&self) -> Vec<RollRecord> {
        self.entries.iter().map(|(_, r)| r.clone()).collect()
    }

    pub fn latest(&self) -> Option<&RollRecord> {
        self.entries.front().map(|(_, r)| r)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for RollHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
