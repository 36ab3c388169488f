// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Per-document sessions.
//!
//! A `DocumentSession` owns everything one site keeps for one shared
//! document: the Jupiter endpoint, the undo history, and handles to the host
//! editor and the network. All of it is mutated through `&mut self`, so a
//! session is its own serialization boundary. Different documents live in
//! different sessions and can be driven from different threads.
//!
//! The host editor and the network are ports: the session calls out to them
//! through the `Editor` and `Transport` traits and never calls back into
//! itself from there.

use rustc_hash::FxHashMap;
use tracing::debug;
use tracing::info;

use crate::Config;
use crate::error::EditorError;
use crate::error::SyncError;
use crate::history::undo::UndoManager;
use crate::ot::document::Document;
use crate::ot::op::Operation;
use crate::ot::primitives::DocumentPath;
use crate::ot::primitives::SiteId;
use crate::sync::jupiter::Jupiter;
use crate::sync::jupiter::Side;
use crate::sync::request::Request;

/// The host's live buffer for one document.
pub trait Editor {
    /// Apply an operation to the buffer. Must not start a new local edit.
    fn apply(&mut self, operation: &Operation) -> Result<(), EditorError>;
}

impl Editor for Document {
    fn apply(&mut self, operation: &Operation) -> Result<(), EditorError> {
        return Document::apply(self, operation);
    }
}

/// Outbound half of the network. Sending is fire-and-forget; the transport
/// must deliver requests from one sender in order.
pub trait Transport {
    fn send(&mut self, request: Request);
}

/// An outbox. Useful for tests and for hosts that flush in batches.
impl Transport for Vec<Request> {
    fn send(&mut self, request: Request) {
        self.push(request);
    }
}

/// One site's state for one shared document.
#[derive(Debug)]
pub struct DocumentSession<E, T> {
    path: DocumentPath,
    site: SiteId,
    jupiter: Jupiter,
    history: UndoManager,
    acknowledge_every: usize,
    editor: E,
    transport: T,
}

impl<E: Editor, T: Transport> DocumentSession<E, T> {
    /// Start a session. `editor` must hold the same text as the peer.
    pub fn new(config: &Config, path: DocumentPath, site: SiteId, side: Side, editor: E, transport: T) -> Self {
        return DocumentSession {
            path,
            site,
            jupiter: Jupiter::new(side),
            history: UndoManager::new(config.history_capacity),
            acknowledge_every: config.acknowledge_every,
            editor,
            transport,
        };
    }

    pub fn path(&self) -> &DocumentPath {
        return &self.path;
    }

    pub fn site(&self) -> &SiteId {
        return &self.site;
    }

    pub fn jupiter(&self) -> &Jupiter {
        return &self.jupiter;
    }

    pub fn history(&self) -> &UndoManager {
        return &self.history;
    }

    pub fn editor(&self) -> &E {
        return &self.editor;
    }

    /// Direct access to the editor. Changes made here are invisible to
    /// peers unless reported through `local_edit`.
    pub fn editor_mut(&mut self) -> &mut E {
        return &mut self.editor;
    }

    pub fn transport(&self) -> &T {
        return &self.transport;
    }

    pub fn transport_mut(&mut self) -> &mut T {
        return &mut self.transport;
    }

    /// Report a change the host already made to its buffer: `deleted` was
    /// removed at `position` and `inserted` put in its place. Returns the
    /// operation that was sent, `NoOp` if nothing changed.
    pub fn local_edit(&mut self, position: usize, inserted: &str, deleted: &str) -> Operation {
        let operation = Operation::from_edit(position, inserted, deleted);
        self.commit_local(operation.clone());
        return operation;
    }

    /// Apply a locally authored operation through the editor, then record
    /// and send it.
    pub fn local_operation(&mut self, operation: Operation) -> Result<(), SyncError> {
        if operation.is_noop() {
            return Ok(());
        }
        self.editor.apply(&operation)?;
        self.commit_local(operation);
        return Ok(());
    }

    fn commit_local(&mut self, operation: Operation) {
        if operation.is_noop() {
            return;
        }
        self.history.record_local(operation.clone());
        let request = self.jupiter.generate(operation, &self.site, &self.path);
        self.transport.send(request);
    }

    /// Integrate a request from the peer and apply it to the editor.
    /// Returns the operation that was applied.
    ///
    /// Errors are fatal for the session: the peer's history and ours no
    /// longer line up.
    ///
    /// The peer holds on to its edits until we send something back. After
    /// `acknowledge_every` received edits without a reply, an
    /// acknowledgement goes out on its own.
    pub fn receive(&mut self, request: &Request) -> Result<Operation, SyncError> {
        let operation = self.jupiter.receive(request)?;
        self.editor.apply(&operation)?;
        self.history.record_remote(&operation);
        if self.acknowledge_every > 0 && self.jupiter.unacknowledged() >= self.acknowledge_every {
            self.acknowledge();
        }
        return Ok(operation);
    }

    /// The host closed an undo group (focus change, explicit commit).
    pub fn history_boundary(&mut self) {
        self.history.boundary();
    }

    /// Undo the newest local change. Returns the applied operation, `NoOp`
    /// if there was nothing to undo.
    pub fn undo(&mut self) -> Result<Operation, SyncError> {
        let operation = self.history.compute_undo();
        self.dispatch(&operation)?;
        debug!(path = %self.path, op = %operation, "undo");
        return Ok(operation);
    }

    /// Redo the newest undo. Returns the applied operation, `NoOp` if there
    /// was nothing to redo.
    pub fn redo(&mut self) -> Result<Operation, SyncError> {
        let operation = self.history.compute_redo();
        self.dispatch(&operation)?;
        debug!(path = %self.path, op = %operation, "redo");
        return Ok(operation);
    }

    // Undo and redo are already in the history, so they skip `record_local`.
    fn dispatch(&mut self, operation: &Operation) -> Result<(), SyncError> {
        if operation.is_noop() {
            return Ok(());
        }
        self.editor.apply(operation)?;
        let request = self.jupiter.generate(operation.clone(), &self.site, &self.path);
        self.transport.send(request);
        return Ok(());
    }

    /// Tell the peer how far we are without changing the text.
    pub fn acknowledge(&mut self) {
        let request = self.jupiter.acknowledge(&self.site, &self.path);
        self.transport.send(request);
    }
}

/// Every open document at one site.
#[derive(Debug)]
pub struct Sessions<E, T> {
    config: Config,
    site: SiteId,
    sessions: FxHashMap<DocumentPath, DocumentSession<E, T>>,
}

impl<E: Editor, T: Transport> Sessions<E, T> {
    pub fn new(config: Config, site: SiteId) -> Self {
        return Sessions {
            config,
            site,
            sessions: FxHashMap::default(),
        };
    }

    pub fn config(&self) -> &Config {
        return &self.config;
    }

    /// Open a document, replacing any session already open for `path`.
    pub fn open(&mut self, path: DocumentPath, side: Side, editor: E, transport: T) -> &mut DocumentSession<E, T> {
        info!(%path, site = %self.site, ?side, "opened document");
        let session = DocumentSession::new(&self.config, path.clone(), self.site.clone(), side, editor, transport);
        return self.sessions.entry(path).insert_entry(session).into_mut();
    }

    /// Close a document, handing back its session.
    pub fn close(&mut self, path: &DocumentPath) -> Option<DocumentSession<E, T>> {
        let session = self.sessions.remove(path);
        if session.is_some() {
            info!(%path, site = %self.site, "closed document");
        }
        return session;
    }

    pub fn get(&self, path: &DocumentPath) -> Option<&DocumentSession<E, T>> {
        return self.sessions.get(path);
    }

    pub fn get_mut(&mut self, path: &DocumentPath) -> Option<&mut DocumentSession<E, T>> {
        return self.sessions.get_mut(path);
    }

    /// Open documents, sorted.
    pub fn paths(&self) -> Vec<DocumentPath> {
        let mut paths: Vec<DocumentPath> = self.sessions.keys().cloned().collect();
        paths.sort();
        return paths;
    }

    /// Hand an inbound request to the session for its document.
    pub fn route(&mut self, request: &Request) -> Result<Operation, SyncError> {
        let session = self
            .sessions
            .get_mut(&request.path)
            .ok_or_else(|| SyncError::UnknownDocument(request.path.clone()))?;
        return session.receive(request);
    }

    /// Split into independent sessions, e.g. to drive each from its own
    /// thread.
    pub fn into_sessions(self) -> impl Iterator<Item = (DocumentPath, DocumentSession<E, T>)> {
        return self.sessions.into_iter();
    }
}
