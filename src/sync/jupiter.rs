// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! The Jupiter protocol.
//!
//! Jupiter keeps two replicas of a document in sync over a FIFO channel.
//! Each end applies its own edits immediately and sends them without waiting
//! for an answer, then transforms whatever arrives from the other end
//! against the edits the other end had not seen yet.
//!
//! # Bookkeeping
//!
//! Every endpoint counts the operations it generated (`local`) and the
//! operations it integrated from its peer (`remote`). Outgoing requests are
//! stamped with both counts, and every generated operation stays in the
//! pending buffer until a request from the peer shows that the peer
//! integrated it.
//!
//! When a request arrives, pending operations the sender has now seen are
//! dropped. The incoming operation is transformed against every operation
//! still pending, and each pending operation is transformed against the
//! incoming one in turn. Afterwards the pending buffer is expressed against
//! the state the peer will be in once it integrates it.
//!
//! # Sides
//!
//! Ties between inserts at the same position need one end of the pair to
//! win consistently. A pairing therefore has a client end and a server end,
//! and on both ends the server's operation wins.
//!
//! Multi-site sessions use a star: every client pairs with a relay, which
//! runs one server endpoint per client (see `relay`).

use std::collections::VecDeque;

use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::error::SyncError;
use crate::ot::op::Operation;
use crate::ot::primitives::DocumentPath;
use crate::ot::primitives::SiteId;
use crate::ot::primitives::VectorTime;
use crate::ot::transform::transform;
use crate::ot::transform::transform_index;
use crate::sync::request::Request;

/// Which end of a pairing an endpoint is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Client,
    Server,
}

/// A generated operation waiting to be acknowledged.
#[derive(Clone, Debug)]
struct Pending {
    operation: Operation,
    /// Our local count when the operation was generated.
    local: u64,
}

/// One end of a Jupiter pairing for one document.
#[derive(Clone, Debug)]
pub struct Jupiter {
    side: Side,
    time: VectorTime,
    pending: VecDeque<Pending>,
    /// Edits integrated since we last sent anything.
    unacknowledged: usize,
}

impl Jupiter {
    /// Create an endpoint at (0, 0).
    pub fn new(side: Side) -> Jupiter {
        return Jupiter {
            side,
            time: VectorTime::new(),
            pending: VecDeque::new(),
            unacknowledged: 0,
        };
    }

    /// Which end of the pairing this is.
    pub fn side(&self) -> Side {
        return self.side;
    }

    /// Current vector time.
    pub fn time(&self) -> VectorTime {
        return self.time;
    }

    /// Number of generated operations the peer has not acknowledged.
    pub fn pending_len(&self) -> usize {
        return self.pending.len();
    }

    /// Edits integrated from the peer since we last sent a request. The
    /// peer keeps its own edits pending until we send one.
    pub fn unacknowledged(&self) -> usize {
        return self.unacknowledged;
    }

    /// Stamp a locally applied operation for sending to the peer.
    pub fn generate(&mut self, operation: Operation, source: &SiteId, path: &DocumentPath) -> Request {
        let request = Request {
            path: path.clone(),
            source: source.clone(),
            time: self.time,
            operation: operation.clone(),
        };
        self.pending.push_back(Pending {
            operation,
            local: self.time.local(),
        });
        self.time.tick_local();
        self.unacknowledged = 0;
        debug!(%path, %source, time = %request.time, op = %request.operation, "generated request");
        return request;
    }

    /// Produce a request that carries no edit, only our vector time.
    pub fn acknowledge(&mut self, source: &SiteId, path: &DocumentPath) -> Request {
        return self.generate(Operation::Timestamp, source, path);
    }

    /// Integrate a request from the peer. Returns the operation to apply to
    /// the local document.
    pub fn receive(&mut self, request: &Request) -> Result<Operation, SyncError> {
        self.check_preconditions(request.time)?;
        self.discard_acknowledged(request.time);

        let remote_wins = self.side == Side::Client;
        let mut incoming = request.operation.clone();
        for pending in self.pending.iter_mut() {
            let transformed = transform(&incoming, &pending.operation, remote_wins);
            pending.operation = transform(&pending.operation, &incoming, !remote_wins);
            incoming = transformed;
        }

        self.time.tick_remote();
        // Acknowledging an acknowledgement would never settle.
        if !request.operation.is_noop() {
            self.unacknowledged += 1;
        }
        trace!(
            path = %request.path,
            source = %request.source,
            received = %request.operation,
            integrated = %incoming,
            time = %self.time,
            "integrated request"
        );
        return Ok(incoming);
    }

    /// Map positions the peer stamped with `time` (e.g. its cursor) into the
    /// local document.
    pub fn transform_indices(&self, time: VectorTime, indices: &mut [usize]) -> Result<(), SyncError> {
        self.check_preconditions(time)?;
        for pending in &self.pending {
            // Already seen by the peer.
            if pending.local < time.remote() {
                continue;
            }
            for index in indices.iter_mut() {
                *index = transform_index(*index, &pending.operation);
            }
        }
        return Ok(());
    }

    fn check_preconditions(&self, received: VectorTime) -> Result<(), SyncError> {
        let state = self.time;
        if let Some(oldest) = self.pending.front() {
            if received.remote() < oldest.local {
                warn!(%received, %state, "request acknowledges discarded operations");
                return Err(SyncError::AlreadyAcknowledged { received, state });
            }
        }
        if received.remote() > state.local() {
            warn!(%received, %state, "request acknowledges operations never sent");
            return Err(SyncError::UnknownOperation { received, state });
        }
        if received.local() != state.remote() {
            warn!(%received, %state, "request out of order");
            return Err(SyncError::OutOfOrder { received, state });
        }
        return Ok(());
    }

    fn discard_acknowledged(&mut self, received: VectorTime) {
        while let Some(oldest) = self.pending.front() {
            if oldest.local >= received.remote() {
                break;
            }
            self.pending.pop_front();
        }
    }
}
