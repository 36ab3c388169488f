// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Per-document edit history and undo.

pub mod log;
pub mod undo;

pub use self::log::Entry;
pub use self::log::EntryKind;
pub use self::log::OperationLog;
pub use self::undo::UndoManager;
