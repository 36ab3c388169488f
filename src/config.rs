// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Engine configuration.
//!
//! A `Config` is handed to every per-document object explicitly; nothing in
//! the crate reads global state except `logging::init`, which also reads
//! `LOG_LEVEL`.

use serde::Deserialize;
use serde::Serialize;

use crate::history::log::DEFAULT_CAPACITY;
use crate::ot::document::Document;

/// Received edits a replica integrates silently before acknowledging them.
pub const DEFAULT_ACKNOWLEDGE_EVERY: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How many entries each document's history keeps before evicting.
    pub history_capacity: usize,
    /// Should documents reject deletes whose text does not match?
    pub verify_deletes: bool,
    /// Send a bare acknowledgement after this many received edits with
    /// nothing sent back in between. Zero leaves acknowledging to the host.
    pub acknowledge_every: usize,

    /// Should we log at all?
    pub logs: bool,
    /// Should logs be colored?
    pub log_ansi: bool,
}

impl Default for Config {
    fn default() -> Self {
        return Config {
            history_capacity: DEFAULT_CAPACITY,
            verify_deletes: true,
            acknowledge_every: DEFAULT_ACKNOWLEDGE_EVERY,
            logs: true,
            log_ansi: true,
        };
    }
}

impl Config {
    /// Parse a configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Config, serde_json::Error> {
        return serde_json::from_str(json);
    }

    /// Create a document following this configuration.
    pub fn document(&self, text: impl Into<String>) -> Document {
        return Document::with_verification(text, self.verify_deletes);
    }
}
