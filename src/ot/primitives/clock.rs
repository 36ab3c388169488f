// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! The Jupiter vector time.
//!
//! Jupiter only ever synchronizes two endpoints, so its "vector" clock has
//! exactly two entries:
//!
//! - `local`: operations this endpoint generated for its peer
//! - `remote`: operations this endpoint received from its peer and integrated
//!
//! A request carries the sender's time at the moment of generation. The
//! receiver reads it as "the sender had generated `local` operations before
//! this one and had seen `remote` of mine".
//!
//! Complexity: every operation is O(1).

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// A two-entry vector clock for one (site, document) pairing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VectorTime {
    local: u64,
    remote: u64,
}

impl VectorTime {
    /// Create a clock at (0, 0).
    pub fn new() -> VectorTime {
        return VectorTime { local: 0, remote: 0 };
    }

    /// Create a clock with specific counts.
    pub fn with_counts(local: u64, remote: u64) -> VectorTime {
        return VectorTime { local, remote };
    }

    /// Number of operations generated locally.
    #[inline]
    pub fn local(&self) -> u64 {
        return self.local;
    }

    /// Number of remote operations integrated.
    #[inline]
    pub fn remote(&self) -> u64 {
        return self.remote;
    }

    /// Count one more locally generated operation.
    /// Returns the new local count.
    #[inline]
    pub fn tick_local(&mut self) -> u64 {
        self.local += 1;
        return self.local;
    }

    /// Count one more integrated remote operation.
    /// Returns the new remote count.
    #[inline]
    pub fn tick_remote(&mut self) -> u64 {
        self.remote += 1;
        return self.remote;
    }
}

impl fmt::Display for VectorTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "({},{})", self.local, self.remote);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_are_independent() {
        let mut time = VectorTime::new();
        assert_eq!(time, VectorTime::with_counts(0, 0));

        assert_eq!(time.tick_local(), 1);
        assert_eq!(time.tick_local(), 2);
        assert_eq!(time.tick_remote(), 1);

        assert_eq!(time.local(), 2);
        assert_eq!(time.remote(), 1);
    }

    #[test]
    fn display_is_compact() {
        let time = VectorTime::with_counts(3, 7);
        assert_eq!(time.to_string(), "(3,7)");
    }
}
