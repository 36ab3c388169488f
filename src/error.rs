// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Error types.
//!
//! Construction and application errors are recoverable. Synchronization
//! errors mean two sites disagree about history and the session has to be
//! torn down; nothing in this crate retries them.

use thiserror::Error;

use crate::ot::primitives::DocumentPath;
use crate::ot::primitives::SiteId;
use crate::ot::primitives::VectorTime;

/// An operation could not be built from untyped input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpError {
    #[error("operation position must not be negative, got {0}")]
    NegativePosition(i64),
    #[error("insert and delete operations must carry text")]
    MissingText,
    #[error("operation is missing its `{0}` field")]
    MissingOperand(&'static str),
    #[error("unsupported operation `{0}`")]
    Unsupported(String),
}

/// The host buffer refused an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("position {position} is past the end of the document (length {len})")]
    OutOfBounds { position: usize, len: usize },
    #[error("delete at {position} expected {expected:?} but the document has {found:?}")]
    DeleteMismatch {
        position: usize,
        expected: String,
        found: String,
    },
    #[error("editor unavailable: {0}")]
    Unavailable(String),
}

/// A request could not be integrated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("request {received} acknowledges operations already discarded at {state}")]
    AlreadyAcknowledged { received: VectorTime, state: VectorTime },
    #[error("request {received} acknowledges operations never sent, local state is {state}")]
    UnknownOperation { received: VectorTime, state: VectorTime },
    #[error("request {received} is out of order, local state is {state}")]
    OutOfOrder { received: VectorTime, state: VectorTime },
    #[error("no session for document {0}")]
    UnknownDocument(DocumentPath),
    #[error("site {0} is not connected")]
    UnknownSite(SiteId),
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// A request could not be encoded or decoded.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed request: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Operation(#[from] OpError),
}
