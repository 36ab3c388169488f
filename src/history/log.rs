// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Bounded per-document operation log.
//!
//! Entries are stored newest first. Entries are never duplicated or moved:
//! undo and redo only change an entry's kind. When the log grows past its
//! capacity the oldest entries fall off the end.

use std::collections::VecDeque;

use tracing::trace;

use crate::ot::op::Operation;

/// Default number of entries kept per document.
pub const DEFAULT_CAPACITY: usize = 1000;

/// What an entry can still be used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A local edit that can be undone.
    Local,
    /// Anything that can no longer be undone or redone: remote edits, and
    /// local edits or undos that have been consumed.
    Remote,
    /// An undo that can be redone.
    Redoable,
}

/// One applied operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub kind: EntryKind,
    pub operation: Operation,
}

/// The history of one document, newest first.
#[derive(Clone, Debug)]
pub struct OperationLog {
    entries: VecDeque<Entry>,
    capacity: usize,
}

impl OperationLog {
    /// Create an empty log holding at most `capacity` entries.
    pub fn new(capacity: usize) -> OperationLog {
        return OperationLog {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        };
    }

    /// Return the number of entries.
    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    /// Return true if the log is empty.
    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        return self.capacity;
    }

    /// Record a newly applied operation.
    pub fn push(&mut self, kind: EntryKind, operation: Operation) {
        self.entries.push_front(Entry { kind, operation });
        if self.entries.len() > self.capacity {
            let evicted = self.entries.len() - self.capacity;
            self.entries.truncate(self.capacity);
            trace!(evicted, capacity = self.capacity, "history evicted oldest entries");
        }
    }

    /// Index of the newest entry of the given kind (0 is the newest entry).
    pub fn latest(&self, kind: EntryKind) -> Option<usize> {
        return self.entries.iter().position(|entry| entry.kind == kind);
    }

    /// Entry at `index` (0 is the newest entry).
    pub fn get(&self, index: usize) -> Option<&Entry> {
        return self.entries.get(index);
    }

    /// Entries newer than `index`, oldest first.
    pub fn newer_than(&self, index: usize) -> impl Iterator<Item = &Entry> + '_ {
        let end = index.min(self.entries.len());
        return self.entries.range(..end).rev();
    }

    /// Change the kind of the entry at `index`.
    pub fn reclassify(&mut self, index: usize, kind: EntryKind) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.kind = kind;
        }
    }

    /// Change the kind of every entry of kind `from`.
    pub fn reclassify_all(&mut self, from: EntryKind, to: EntryKind) {
        for entry in self.entries.iter_mut().filter(|entry| entry.kind == from) {
            entry.kind = to;
        }
    }

    /// Iterate over the entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> + '_ {
        return self.entries.iter();
    }
}

impl Default for OperationLog {
    fn default() -> Self {
        return Self::new(DEFAULT_CAPACITY);
    }
}
