// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Local undo and redo under concurrent editing.
//!
//! Undo only reverts edits made at this site. Remote edits that arrived in
//! the meantime stay in place, so the inverse of the undone edit is
//! transformed against everything applied after it before being used.
//!
//! Local keystrokes are grouped: edits accumulate into a composite until a
//! history boundary (focus change, explicit commit, or the host editor
//! adding an entry to its own undo stack) closes it and records it as one
//! undoable entry. A remote edit arriving in the middle of a group also
//! closes it.

use tracing::debug;

use crate::history::log::Entry;
use crate::history::log::EntryKind;
use crate::history::log::OperationLog;
use crate::ot::op::Operation;
use crate::ot::transform::transform;

/// Undo and redo for one document at one site.
#[derive(Clone, Debug)]
pub struct UndoManager {
    log: OperationLog,
    /// Local edits since the last boundary, except the newest.
    composite: Option<Operation>,
    /// The newest local edit since the last boundary.
    atomic: Option<Operation>,
}

impl UndoManager {
    /// Create a manager keeping at most `capacity` history entries.
    pub fn new(capacity: usize) -> UndoManager {
        return UndoManager {
            log: OperationLog::new(capacity),
            composite: None,
            atomic: None,
        };
    }

    /// The recorded history.
    pub fn log(&self) -> &OperationLog {
        return &self.log;
    }

    /// Number of recorded entries, not counting pending local edits.
    pub fn len(&self) -> usize {
        return self.log.len();
    }

    /// True if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        return self.log.is_empty() && !self.has_pending();
    }

    /// Recorded entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        return self.log.iter();
    }

    /// True if local edits are waiting for a boundary.
    pub fn has_pending(&self) -> bool {
        return self.composite.is_some() || self.atomic.is_some();
    }

    /// True if `compute_undo` would return something other than `NoOp`.
    pub fn can_undo(&self) -> bool {
        return self.has_pending() || self.log.latest(EntryKind::Local).is_some();
    }

    /// True if `compute_redo` would return something other than `NoOp`.
    pub fn can_redo(&self) -> bool {
        return !self.has_pending() && self.log.latest(EntryKind::Redoable).is_some();
    }

    /// Record an edit made at this site.
    pub fn record_local(&mut self, operation: Operation) {
        if operation.is_noop() {
            return;
        }
        self.fold_atomic();
        self.atomic = Some(operation);
    }

    /// Record an integrated remote edit.
    ///
    /// The log has to list operations in the order they were applied, and
    /// the remote edit landed after any pending local edits. The pending
    /// edits are therefore closed off as their own entry first, the same as
    /// at a boundary.
    pub fn record_remote(&mut self, operation: &Operation) {
        if operation.is_noop() {
            return;
        }
        self.boundary();
        self.log.push(EntryKind::Remote, operation.clone());
    }

    /// Close the current composite and record it as one undoable entry.
    pub fn boundary(&mut self) {
        self.fold_atomic();
        let Some(composite) = self.composite.take() else {
            return;
        };
        if composite.is_noop() {
            return;
        }
        // A fresh edit ends the redo chain; the undos become ordinary edits.
        self.log.reclassify_all(EntryKind::Redoable, EntryKind::Local);
        self.log.push(EntryKind::Local, composite);
    }

    /// Compute the operation that undoes the newest local entry in the
    /// current document. Returns `NoOp` if there is nothing to undo.
    ///
    /// The caller applies the result and sends it to peers, but must not
    /// record it with `record_local`; it is already in the log as a
    /// redoable entry.
    pub fn compute_undo(&mut self) -> Operation {
        self.boundary();
        return self.consume(EntryKind::Local, EntryKind::Redoable);
    }

    /// Compute the operation that redoes the newest undo. Returns `NoOp` if
    /// there is nothing to redo.
    pub fn compute_redo(&mut self) -> Operation {
        self.boundary();
        return self.consume(EntryKind::Redoable, EntryKind::Local);
    }

    fn consume(&mut self, kind: EntryKind, produces: EntryKind) -> Operation {
        let Some(index) = self.log.latest(kind) else {
            return Operation::NoOp;
        };
        let Some(entry) = self.log.get(index) else {
            return Operation::NoOp;
        };

        let mut inverse = entry.operation.invert();
        for newer in self.log.newer_than(index) {
            inverse = transform(&inverse, &newer.operation, true);
        }

        self.log.reclassify(index, EntryKind::Remote);
        self.log.push(produces, inverse.clone());
        debug!(?kind, op = %inverse, "computed inverse");
        return inverse;
    }

    fn fold_atomic(&mut self) {
        let Some(atomic) = self.atomic.take() else {
            return;
        };
        self.composite = Some(match self.composite.take() {
            Some(composite) => Operation::split(composite, atomic),
            None => atomic,
        });
    }
}
