// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Shared primitives for the synchronization layer.
//!
//! ## Clocks
//! - `VectorTime`: the (local, remote) pair stamped on every request
//!
//! ## IDs
//! - `SiteId`: replica identifier
//! - `DocumentPath`: shared document identifier

pub mod clock;
pub mod id;

pub use clock::VectorTime;
pub use id::DocumentPath;
pub use id::SiteId;
