//! Bounded entry storage and category visibility.
//!
//! The store enforces a hard entry cap: pushing beyond capacity evicts
//! the oldest entries immediately, so memory stays bounded during long
//! sessions. Category visibility is applied at read time — hiding a
//! category affects already-stored entries, and re-showing it brings
//! them back.

use std::collections::VecDeque;

use markscope_stream_model::{Category, LogEntry};

/// FIFO store of console entries with a hard capacity.
#[derive(Debug)]
pub struct LogStore {
    entries: VecDeque<LogEntry>,
    max_entries: usize,
}

impl LogStore {
    /// Create a store holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Append an entry, evicting oldest entries to stay at capacity.
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// The oldest retained entry.
    pub fn first(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}

/// Which categories are rendered and exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilters {
    pub face: bool,
    pub hand: bool,
    pub pose: bool,
    pub system: bool,
    pub error: bool,
}

impl Default for CategoryFilters {
    fn default() -> Self {
        Self {
            face: true,
            hand: true,
            pose: true,
            system: true,
            error: true,
        }
    }
}

impl CategoryFilters {
    pub fn is_visible(&self, category: Category) -> bool {
        match category {
            Category::Face => self.face,
            Category::Hand => self.hand,
            Category::Pose => self.pose,
            Category::System => self.system,
            Category::Error => self.error,
        }
    }

    pub fn set_visible(&mut self, category: Category, visible: bool) {
        match category {
            Category::Face => self.face = visible,
            Category::Hand => self.hand = visible,
            Category::Pose => self.pose = visible,
            Category::System => self.system = visible,
            Category::Error => self.error = visible,
        }
    }

    /// Flip one category's visibility; returns the new state.
    pub fn toggle(&mut self, category: Category) -> bool {
        let visible = !self.is_visible(category);
        self.set_visible(category, visible);
        visible
    }

    /// Show only the given categories, hiding all others.
    pub fn only(categories: &[Category]) -> Self {
        let mut filters = Self {
            face: false,
            hand: false,
            pose: false,
            system: false,
            error: false,
        };
        for &category in categories {
            filters.set_visible(category, true);
        }
        filters
    }
}
