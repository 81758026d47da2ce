//! Snapshot history resource state for tracking undo/redo.

use crate::constants::MAX_HISTORY_SIZE;
use crate::document::Document;

/// A committed document state plus a short description for the history list.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub document: Document,
    pub description: String,
}

/// Linear log of document snapshots with a cursor.
///
/// `cursor` points at the snapshot matching the live document. Whenever the log
/// is non-empty, `0 <= cursor < len`.
#[derive(Debug, Default, Clone)]
pub struct SnapshotHistory {
    entries: Vec<Snapshot>,
    cursor: usize,
}

impl SnapshotHistory {
    /// Append a deep copy of `document`, discarding any redo tail first.
    pub fn push(&mut self, document: &Document, description: impl Into<String>) {
        if !self.entries.is_empty() && self.cursor + 1 < self.entries.len() {
            self.entries.truncate(self.cursor + 1);
        }

        self.entries.push(Snapshot {
            document: document.clone(),
            description: description.into(),
        });
        self.cursor = self.entries.len() - 1;

        // Trim history if it exceeds max size
        while self.entries.len() > MAX_HISTORY_SIZE {
            self.entries.remove(0);
            self.cursor -= 1;
        }
    }

    /// Step back one entry. Returns the snapshot to restore, or None at the oldest entry.
    pub fn undo(&mut self) -> Option<&Document> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).map(|s| &s.document)
    }

    /// Step forward one entry. Returns the snapshot to restore, or None at the tail.
    pub fn redo(&mut self) -> Option<&Document> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor).map(|s| &s.document)
    }

    /// Jump to any valid entry.
    pub fn restore_at(&mut self, index: usize) -> Option<&Document> {
        if index >= self.entries.len() {
            return None;
        }
        self.cursor = index;
        self.entries.get(index).map(|s| &s.document)
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the current entry, None when nothing has been committed.
    pub fn cursor(&self) -> Option<usize> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.cursor)
        }
    }

    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
