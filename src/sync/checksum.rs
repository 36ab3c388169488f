// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Document checksums for consistency checks.
//!
//! Once no requests are in flight every replica of a document must hold the
//! same text. Replicas exchange a `Checksum` instead of the text to verify
//! that; a mismatch means the session has diverged and needs a resync.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Type constant for document hashes.
pub const TYPE_DOCUMENT: u8 = 0x10;

/// Length and blake3 hash of a document's text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum {
    /// Length in chars.
    pub length: u64,
    pub hash: [u8; 32],
}

impl Checksum {
    /// Checksum some text.
    pub fn of(text: &str) -> Checksum {
        let length = text.chars().count() as u64;
        let mut hasher = blake3::Hasher::new();
        hasher.update(&[TYPE_DOCUMENT]);
        hasher.update(&(text.len() as u64).to_le_bytes());
        hasher.update(text.as_bytes());
        return Checksum {
            length,
            hash: *hasher.finalize().as_bytes(),
        };
    }

    /// True if `text` has this checksum.
    pub fn matches(&self, text: &str) -> bool {
        return *self == Checksum::of(text);
    }
}

impl fmt::Debug for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checksum({}, ", self.length)?;
        for byte in &self.hash[..4] {
            write!(f, "{:02x}", byte)?;
        }
        return f.write_str("..)");
    }
}
