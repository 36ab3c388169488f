// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Operations on a linear text document.
//!
//! An `Operation` describes an edit relative to one particular document
//! state: "insert this text at this position" or "delete this text at this
//! position". Positions shift as soon as someone else edits the document,
//! which is what `transform` exists to correct for.
//!
//! Positions and lengths count `char`s, not bytes.
//!
//! A `Split` is a pair of operations applied one after the other: `second`
//! is expressed against the document as it looks after `first`. Splits are
//! produced by transformation (a delete cut in two by a concurrent insert),
//! by undo of composite edits, and by replacements (delete then insert).

use std::fmt;

use smallvec::SmallVec;

use crate::error::OpError;
use crate::ot::primitives::DocumentPath;
use crate::ot::primitives::SiteId;

/// An edit to a text document.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Insert `text` at `position`. `origin` is the position the edit was
    /// made at before any transformation and breaks ties between inserts
    /// that end up at the same position.
    Insert {
        position: usize,
        text: String,
        origin: usize,
    },

    /// Delete `text`, which starts at `position`.
    Delete { position: usize, text: String },

    /// Apply `first`, then `second`.
    Split {
        first: Box<Operation>,
        second: Box<Operation>,
    },

    /// Does nothing.
    NoOp,

    /// Does nothing to the text; only carries a vector time to the peer.
    Timestamp,
}

/// A primitive text change as the host editor sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub path: DocumentPath,
    pub source: SiteId,
    pub offset: usize,
    /// Text inserted at `offset` (empty for deletions).
    pub text: String,
    /// Text removed at `offset` (empty for insertions).
    pub replaced_text: String,
}

impl Operation {
    /// Create an insert whose origin is its position.
    pub fn insert(position: usize, text: impl Into<String>) -> Operation {
        return Operation::Insert {
            position,
            text: text.into(),
            origin: position,
        };
    }

    /// Create an insert with an explicit origin.
    pub fn insert_with_origin(position: usize, text: impl Into<String>, origin: usize) -> Operation {
        return Operation::Insert {
            position,
            text: text.into(),
            origin,
        };
    }

    /// Create a delete of `text` at `position`.
    pub fn delete(position: usize, text: impl Into<String>) -> Operation {
        return Operation::Delete {
            position,
            text: text.into(),
        };
    }

    /// Create an insert from untyped input.
    pub fn try_insert(position: i64, text: Option<String>) -> Result<Operation, OpError> {
        let position = checked_position(position)?;
        let text = text.ok_or(OpError::MissingText)?;
        return Ok(Operation::insert(position, text));
    }

    /// Create a delete from untyped input.
    pub fn try_delete(position: i64, text: Option<String>) -> Result<Operation, OpError> {
        let position = checked_position(position)?;
        let text = text.ok_or(OpError::MissingText)?;
        return Ok(Operation::delete(position, text));
    }

    /// Sequence two operations. A `NoOp` on either side disappears.
    pub fn split(first: Operation, second: Operation) -> Operation {
        return match (first, second) {
            (Operation::NoOp, other) | (other, Operation::NoOp) => other,
            (first, second) => Operation::Split {
                first: Box::new(first),
                second: Box::new(second),
            },
        };
    }

    /// Sequence any number of operations, left to right.
    pub fn sequence(ops: impl IntoIterator<Item = Operation>) -> Operation {
        return ops.into_iter().fold(Operation::NoOp, Operation::split);
    }

    /// The non-split operations this one is made of, in application order.
    ///
    /// Walks the tree with an explicit stack; composites built from long
    /// typing bursts nest deeply.
    pub fn leaves(&self) -> Vec<&Operation> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];
        while let Some(op) = stack.pop() {
            match op {
                Operation::Split { first, second } => {
                    stack.push(second);
                    stack.push(first);
                }
                leaf => leaves.push(leaf),
            }
        }
        return leaves;
    }

    /// Convert a raw editor change into an operation.
    ///
    /// `deleted` is the text that was removed at `position` and `inserted`
    /// the text that replaced it. A replacement becomes a delete followed by
    /// an insert at the same position.
    pub fn from_edit(position: usize, inserted: &str, deleted: &str) -> Operation {
        let delete = if deleted.is_empty() {
            Operation::NoOp
        } else {
            Operation::delete(position, deleted)
        };
        let insert = if inserted.is_empty() {
            Operation::NoOp
        } else {
            Operation::insert(position, inserted)
        };
        return Operation::split(delete, insert);
    }

    /// The operation that reverts this one when applied right after it.
    pub fn invert(&self) -> Operation {
        return match self {
            Operation::Insert { position, text, .. } => Operation::delete(*position, text.clone()),
            Operation::Delete { position, text } => Operation::insert(*position, text.clone()),
            // The inverse of "a then b" is "undo b then undo a".
            Operation::Split { first, second } => Operation::Split {
                first: Box::new(second.invert()),
                second: Box::new(first.invert()),
            },
            Operation::NoOp => Operation::NoOp,
            Operation::Timestamp => Operation::Timestamp,
        };
    }

    /// Number of characters inserted or deleted by a leaf operation.
    pub fn text_len(&self) -> usize {
        return match self {
            Operation::Insert { text, .. } | Operation::Delete { text, .. } => char_len(text),
            Operation::Split { first, second } => first.text_len() + second.text_len(),
            Operation::NoOp | Operation::Timestamp => 0,
        };
    }

    /// True if applying this operation cannot change any text.
    pub fn is_noop(&self) -> bool {
        return match self {
            Operation::NoOp | Operation::Timestamp => true,
            Operation::Split { first, second } => first.is_noop() && second.is_noop(),
            Operation::Insert { .. } | Operation::Delete { .. } => false,
        };
    }

    /// Project this operation onto the primitive edits an editor applies,
    /// in application order.
    pub fn text_edits(&self, path: &DocumentPath, source: &SiteId) -> SmallVec<[TextEdit; 2]> {
        let mut edits = SmallVec::new();
        self.push_text_edits(path, source, &mut edits);
        return edits;
    }

    fn push_text_edits(&self, path: &DocumentPath, source: &SiteId, edits: &mut SmallVec<[TextEdit; 2]>) {
        match self {
            Operation::Insert { position, text, .. } => edits.push(TextEdit {
                path: path.clone(),
                source: source.clone(),
                offset: *position,
                text: text.clone(),
                replaced_text: String::new(),
            }),
            Operation::Delete { position, text } => edits.push(TextEdit {
                path: path.clone(),
                source: source.clone(),
                offset: *position,
                text: String::new(),
                replaced_text: text.clone(),
            }),
            Operation::Split { first, second } => {
                first.push_text_edits(path, source, edits);
                second.push_text_edits(path, source, edits);
            }
            Operation::NoOp | Operation::Timestamp => {}
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Operation::Insert { position, text, origin } => {
                write!(f, "Insert({}, {:?}, origin={})", position, text, origin)
            }
            Operation::Delete { position, text } => write!(f, "Delete({}, {:?})", position, text),
            Operation::Split { first, second } => write!(f, "Split({}, {})", first, second),
            Operation::NoOp => f.write_str("NoOp"),
            Operation::Timestamp => f.write_str("Timestamp"),
        };
    }
}

fn checked_position(position: i64) -> Result<usize, OpError> {
    return usize::try_from(position).map_err(|_| OpError::NegativePosition(position));
}

/// Length of `text` in chars.
#[inline]
pub(crate) fn char_len(text: &str) -> usize {
    return text.chars().count();
}

/// Split `text` after `at` chars. Splits past the end return the whole text.
pub(crate) fn split_at_char(text: &str, at: usize) -> (&str, &str) {
    let byte = text.char_indices().nth(at).map(|(i, _)| i).unwrap_or(text.len());
    return text.split_at(byte);
}
