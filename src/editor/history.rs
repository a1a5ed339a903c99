//! Bounded undo/redo log of state snapshots.

use std::collections::VecDeque;

/// Default number of snapshots kept by the log.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// A bounded snapshot log with a cursor.
///
/// Invariants:
/// - when the log is non-empty, `cursor < len()`;
/// - `len() <= capacity()`;
/// - recording truncates everything after the cursor first.
///
/// The log is agnostic to what it stores; the editor keeps whole documents.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: VecDeque<T>,
    cursor: usize,
    capacity: usize,
}

impl<T: Clone> History<T> {
    /// Create an empty log with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create an empty log holding at most `capacity` snapshots (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            cursor: 0,
            capacity,
        }
    }

    /// Append a snapshot, discarding the redo branch and evicting the oldest
    /// entry when over capacity.
    pub fn record(&mut self, snapshot: T) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push_back(snapshot);

        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            log::warn!(
                "history at capacity ({}), evicted oldest snapshot",
                self.capacity
            );
        }
        self.cursor = self.entries.len() - 1;
        log::debug!("history: recorded, cursor={} len={}", self.cursor, self.len());
    }

    /// Step back one snapshot. Returns `None` at the start of the log.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        log::debug!("history: undo, cursor={}", self.cursor);
        self.entries.get(self.cursor)
    }

    /// Step forward one snapshot. Returns `None` at the end of the log.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        log::debug!("history: redo, cursor={}", self.cursor);
        self.entries.get(self.cursor)
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.cursor)
    }

    /// Check if `undo` would move the cursor.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if `redo` would move the cursor.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of snapshots in the log.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of snapshots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}
