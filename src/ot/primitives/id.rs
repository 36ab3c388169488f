// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Identifier types for sites and documents.
//!
//! Both are opaque to the engine: a `SiteId` is whatever the session layer
//! uses to name a participant, a `DocumentPath` is whatever the host editor
//! uses to name a buffer. They are only compared, hashed and carried along
//! on the wire.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Identifies one replica (a participant's copy of a document).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
    /// Create a site identifier.
    pub fn new(id: impl Into<String>) -> SiteId {
        return SiteId(id.into());
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        return &self.0;
    }
}

impl fmt::Debug for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "SiteId({})", self.0);
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(&self.0);
    }
}

impl From<&str> for SiteId {
    fn from(id: &str) -> SiteId {
        return SiteId::new(id);
    }
}

/// Identifies a shared document.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentPath(String);

impl DocumentPath {
    /// Create a document path.
    pub fn new(path: impl Into<String>) -> DocumentPath {
        return DocumentPath(path.into());
    }

    /// The raw path.
    pub fn as_str(&self) -> &str {
        return &self.0;
    }
}

impl fmt::Debug for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "DocumentPath({})", self.0);
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(&self.0);
    }
}

impl From<&str> for DocumentPath {
    fn from(path: &str) -> DocumentPath {
        return DocumentPath::new(path);
    }
}
