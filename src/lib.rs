// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Duet - Real-time collaborative text editing with operational transformation.
//!
//! Every site keeps a full replica of each shared document and applies its
//! own edits immediately. Edits travel to the other sites as `Request`s and
//! are transformed against whatever the receiver did concurrently, so all
//! replicas end up with the same text once everything has been delivered.
//!
//! - `ot` holds operations, the transformation function and a reference
//!   text buffer.
//! - `sync` holds the Jupiter protocol that pairs two replicas, and a relay
//!   that connects many replicas in a star.
//! - `history` implements undo and redo that only revert local edits.
//! - `session` binds all of the above to a host editor and a transport.
//!
//! # Quick Start
//!
//! ```
//! use duet::ot::{Document, Operation};
//! use duet::sync::{Jupiter, Side};
//! use duet::ot::primitives::{DocumentPath, SiteId};
//!
//! let path = DocumentPath::new("notes.txt");
//! let mut alice = (Jupiter::new(Side::Client), Document::new("core"));
//! let mut bob = (Jupiter::new(Side::Server), Document::new("core"));
//!
//! // Both edit at the same time.
//! let edit = Operation::insert(3, "f");
//! alice.1.apply(&edit).unwrap();
//! let from_alice = alice.0.generate(edit, &SiteId::new("alice"), &path);
//!
//! let edit = Operation::delete(2, "r");
//! bob.1.apply(&edit).unwrap();
//! let from_bob = bob.0.generate(edit, &SiteId::new("bob"), &path);
//!
//! // Each integrates the other's edit.
//! let op = bob.0.receive(&from_alice).unwrap();
//! bob.1.apply(&op).unwrap();
//! let op = alice.0.receive(&from_bob).unwrap();
//! alice.1.apply(&op).unwrap();
//!
//! assert_eq!(alice.1.text(), "cofe");
//! assert_eq!(bob.1.text(), "cofe");
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod ot;
pub mod session;
pub mod sync;

pub use config::Config;
pub use error::EditorError;
pub use error::OpError;
pub use error::SyncError;
pub use error::WireError;
