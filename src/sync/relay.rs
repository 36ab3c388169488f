// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Star-topology relay for one document.
//!
//! Jupiter only synchronizes pairs. To share a document between more sites,
//! every client pairs with the relay, and the relay keeps one server-side
//! `Jupiter` (a proxy) per client. A request from one client is integrated
//! through that client's proxy, applied to the relay's own replica, and then
//! regenerated through every other proxy, so each client receives it
//! transformed against exactly what that client has not seen yet.
//!
//! The relay's replica is a full participant: the hosting site can edit it
//! directly and the edit fans out to every client. Those edits have their
//! own undo history, in which client edits count as remote.
//!
//! A client keeps its edits pending until the relay sends it something.
//! When a client edits while nobody else does, the relay answers with a bare
//! acknowledgement every `acknowledge_every` requests.

use rustc_hash::FxHashMap;
use tracing::debug;
use tracing::info;

use crate::Config;
use crate::error::SyncError;
use crate::history::undo::UndoManager;
use crate::ot::document::Document;
use crate::ot::op::Operation;
use crate::ot::primitives::DocumentPath;
use crate::ot::primitives::SiteId;
use crate::sync::checksum::Checksum;
use crate::sync::jupiter::Jupiter;
use crate::sync::jupiter::Side;
use crate::sync::request::Request;

/// A request addressed to one connected site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outgoing {
    pub to: SiteId,
    pub request: Request,
}

/// The hub of a multi-site session for one document.
#[derive(Debug)]
pub struct Relay {
    path: DocumentPath,
    site: SiteId,
    document: Document,
    proxies: FxHashMap<SiteId, Jupiter>,
    history: UndoManager,
    acknowledge_every: usize,
}

impl Relay {
    /// Create a relay hosting `document`. `site` is the hosting site, used
    /// as the source of relay-local edits.
    pub fn new(path: DocumentPath, site: SiteId, document: Document) -> Relay {
        let config = Config::default();
        return Relay {
            path,
            site,
            document,
            proxies: FxHashMap::default(),
            history: UndoManager::new(config.history_capacity),
            acknowledge_every: config.acknowledge_every,
        };
    }

    /// Create a relay hosting `text`, following `config`.
    pub fn from_config(config: &Config, path: DocumentPath, site: SiteId, text: impl Into<String>) -> Relay {
        return Relay {
            path,
            site,
            document: config.document(text),
            proxies: FxHashMap::default(),
            history: UndoManager::new(config.history_capacity),
            acknowledge_every: config.acknowledge_every,
        };
    }

    /// The shared document.
    pub fn path(&self) -> &DocumentPath {
        return &self.path;
    }

    /// The relay's replica.
    pub fn document(&self) -> &Document {
        return &self.document;
    }

    /// Undo history of edits made on the relay's own replica.
    pub fn history(&self) -> &UndoManager {
        return &self.history;
    }

    /// Checksum of the relay's replica.
    pub fn checksum(&self) -> Checksum {
        return self.document.checksum();
    }

    /// Connected sites, sorted.
    pub fn sites(&self) -> Vec<SiteId> {
        let mut sites: Vec<SiteId> = self.proxies.keys().cloned().collect();
        sites.sort();
        return sites;
    }

    /// Connect a site. The site must start from the returned text.
    pub fn connect(&mut self, site: SiteId) -> String {
        info!(path = %self.path, %site, "site connected");
        self.proxies.insert(site, Jupiter::new(Side::Server));
        return self.document.text().to_string();
    }

    /// Disconnect a site, dropping its proxy.
    pub fn disconnect(&mut self, site: &SiteId) -> Result<(), SyncError> {
        if self.proxies.remove(site).is_none() {
            return Err(SyncError::UnknownSite(site.clone()));
        }
        info!(path = %self.path, %site, "site disconnected");
        return Ok(());
    }

    /// Integrate a request from the site `from` and fan it out to every
    /// other site.
    pub fn receive(&mut self, from: &SiteId, request: &Request) -> Result<Vec<Outgoing>, SyncError> {
        let proxy = self
            .proxies
            .get_mut(from)
            .ok_or_else(|| SyncError::UnknownSite(from.clone()))?;
        let operation = proxy.receive(request)?;
        self.document.apply(&operation)?;

        // Acknowledgements stop here; nobody else needs them.
        if operation.is_noop() {
            return Ok(Vec::new());
        }
        self.history.record_remote(&operation);
        let mut outgoing = self.broadcast(operation, &request.source, Some(from));

        if let Some(proxy) = self.proxies.get_mut(from) {
            if self.acknowledge_every > 0 && proxy.unacknowledged() >= self.acknowledge_every {
                outgoing.push(Outgoing {
                    to: from.clone(),
                    request: proxy.acknowledge(&self.site, &self.path),
                });
            }
        }
        return Ok(outgoing);
    }

    /// Apply an edit made on the relay's own replica and fan it out.
    pub fn local_edit(&mut self, operation: Operation) -> Result<Vec<Outgoing>, SyncError> {
        if operation.is_noop() {
            return Ok(Vec::new());
        }
        self.document.apply(&operation)?;
        self.history.record_local(operation.clone());
        let source = self.site.clone();
        return Ok(self.broadcast(operation, &source, None));
    }

    /// The hosting site closed an undo group.
    pub fn history_boundary(&mut self) {
        self.history.boundary();
    }

    /// Undo the newest edit made on the relay's own replica and fan the
    /// inverse out. Sends nothing if there is nothing to undo.
    pub fn undo(&mut self) -> Result<Vec<Outgoing>, SyncError> {
        let operation = self.history.compute_undo();
        return self.dispatch(operation);
    }

    /// Redo the newest relay-local undo.
    pub fn redo(&mut self) -> Result<Vec<Outgoing>, SyncError> {
        let operation = self.history.compute_redo();
        return self.dispatch(operation);
    }

    fn dispatch(&mut self, operation: Operation) -> Result<Vec<Outgoing>, SyncError> {
        if operation.is_noop() {
            return Ok(Vec::new());
        }
        self.document.apply(&operation)?;
        let source = self.site.clone();
        return Ok(self.broadcast(operation, &source, None));
    }

    /// Acknowledge everything integrated so far to every site.
    pub fn acknowledge(&mut self) -> Vec<Outgoing> {
        let mut outgoing = Vec::with_capacity(self.proxies.len());
        for (site, proxy) in self.proxies.iter_mut() {
            outgoing.push(Outgoing {
                to: site.clone(),
                request: proxy.acknowledge(&self.site, &self.path),
            });
        }
        return outgoing;
    }

    fn broadcast(&mut self, operation: Operation, source: &SiteId, except: Option<&SiteId>) -> Vec<Outgoing> {
        let mut outgoing = Vec::with_capacity(self.proxies.len());
        for (site, proxy) in self.proxies.iter_mut() {
            if Some(site) == except {
                continue;
            }
            outgoing.push(Outgoing {
                to: site.clone(),
                request: proxy.generate(operation.clone(), source, &self.path),
            });
        }
        debug!(path = %self.path, %source, op = %operation, fanout = outgoing.len(), "relayed operation");
        return outgoing;
    }
}
