// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Operational transformation over plain text.

pub mod document;
pub mod op;
pub mod primitives;
pub mod transform;

pub use document::Document;
pub use op::Operation;
pub use op::TextEdit;
pub use transform::transform;
pub use transform::transform_index;
pub use transform::transform_indices;
