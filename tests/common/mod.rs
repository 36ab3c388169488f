// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Deterministic network simulation shared by the integration tests.
//!
//! One relay and several client sessions. Every client has a link to the
//! relay with a fixed latency, used in both directions. Messages are
//! delivered in order of arrival time, ties broken by send order, so each
//! link is FIFO.

#![allow(dead_code)]

use duet::Config;
use duet::ot::Document;
use duet::ot::Operation;
use duet::ot::primitives::{DocumentPath, SiteId};
use duet::session::DocumentSession;
use duet::sync::{Checksum, Relay, Request, Side};

pub type Client = DocumentSession<Document, Vec<Request>>;

#[derive(Clone, Copy, Debug)]
enum Hop {
    ToRelay(usize),
    ToClient(usize),
}

#[derive(Debug)]
struct Message {
    at: u64,
    seq: u64,
    hop: Hop,
    request: Request,
}

pub struct Network {
    now: u64,
    seq: u64,
    relay: Relay,
    clients: Vec<Client>,
    latency: Vec<u64>,
    in_flight: Vec<Message>,
}

impl Network {
    /// `sites` are (name, latency in ms) pairs.
    pub fn new(text: &str, sites: &[(&str, u64)]) -> Network {
        let config = Config::default();
        let path = DocumentPath::new("shared.txt");
        let mut relay = Relay::from_config(&config, path.clone(), SiteId::new("relay"), text);

        let mut clients = Vec::new();
        let mut latency = Vec::new();
        for (name, ms) in sites {
            let site = SiteId::new(*name);
            let start = relay.connect(site.clone());
            clients.push(DocumentSession::new(
                &config,
                path.clone(),
                site,
                Side::Client,
                config.document(start),
                Vec::new(),
            ));
            latency.push(*ms);
        }

        return Network {
            now: 0,
            seq: 0,
            relay,
            clients,
            latency,
            in_flight: Vec::new(),
        };
    }

    pub fn now(&self) -> u64 {
        return self.now;
    }

    pub fn client(&self, index: usize) -> &Client {
        return &self.clients[index];
    }

    pub fn relay(&self) -> &Relay {
        return &self.relay;
    }

    /// Apply an edit at a client and put it on the wire.
    pub fn edit(&mut self, index: usize, op: Operation) {
        self.clients[index].local_operation(op).unwrap();
        self.flush(index);
    }

    pub fn undo(&mut self, index: usize) -> Operation {
        let op = self.clients[index].undo().unwrap();
        self.flush(index);
        return op;
    }

    pub fn redo(&mut self, index: usize) -> Operation {
        let op = self.clients[index].redo().unwrap();
        self.flush(index);
        return op;
    }

    pub fn boundary(&mut self, index: usize) {
        self.clients[index].history_boundary();
    }

    /// Deliver messages until `time`, then set the clock to it.
    pub fn advance_to(&mut self, time: u64) {
        while let Some(next) = self.next_arrival() {
            if self.in_flight[next].at > time {
                break;
            }
            self.deliver(next);
        }
        self.now = self.now.max(time);
    }

    /// Deliver everything in flight.
    pub fn run(&mut self) {
        while let Some(next) = self.next_arrival() {
            self.deliver(next);
        }
    }

    /// Text of every replica, clients first, relay last.
    pub fn texts(&self) -> Vec<String> {
        let mut texts: Vec<String> = self.clients.iter().map(|c| c.editor().text().to_string()).collect();
        texts.push(self.relay.document().text().to_string());
        return texts;
    }

    /// Assert every replica holds the same text and return it.
    pub fn assert_converged(&self) -> String {
        let expected: Checksum = self.relay.checksum();
        for client in &self.clients {
            assert_eq!(
                client.editor().checksum(),
                expected,
                "{} diverged: {:?}",
                client.site(),
                self.texts()
            );
        }
        return self.relay.document().text().to_string();
    }

    fn flush(&mut self, index: usize) {
        for request in std::mem::take(self.clients[index].transport_mut()) {
            self.send(Hop::ToRelay(index), request);
        }
    }

    fn send(&mut self, hop: Hop, request: Request) {
        let link = match hop {
            Hop::ToRelay(index) | Hop::ToClient(index) => index,
        };
        self.in_flight.push(Message {
            at: self.now + self.latency[link],
            seq: self.seq,
            hop,
            request,
        });
        self.seq += 1;
    }

    fn next_arrival(&self) -> Option<usize> {
        return self
            .in_flight
            .iter()
            .enumerate()
            .min_by_key(|(_, m)| (m.at, m.seq))
            .map(|(i, _)| i);
    }

    fn deliver(&mut self, index: usize) {
        let message = self.in_flight.swap_remove(index);
        self.now = message.at;
        match message.hop {
            Hop::ToRelay(from) => {
                let site = self.clients[from].site().clone();
                let outgoing = self.relay.receive(&site, &message.request).unwrap();
                for out in outgoing {
                    let to = self
                        .clients
                        .iter()
                        .position(|c| c.site() == &out.to)
                        .unwrap();
                    self.send(Hop::ToClient(to), out.request);
                }
            }
            Hop::ToClient(to) => {
                self.clients[to].receive(&message.request).unwrap();
                // Acknowledgements the client decided to send.
                self.flush(to);
            }
        }
    }
}

/// Small seeded generator for randomized schedules.
pub struct Lcg(pub u64);

impl Lcg {
    pub fn next(&mut self, bound: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        return ((self.0 >> 33) as usize) % bound.max(1);
    }
}

/// A random insert or delete at `site`, put on the wire.
pub fn scatter(net: &mut Network, rng: &mut Lcg, site: usize) {
    let text: Vec<char> = net.client(site).editor().text().chars().collect();
    if !text.is_empty() && rng.next(3) == 0 {
        let position = rng.next(text.len());
        let count = 1 + rng.next((text.len() - position).min(4));
        let deleted: String = text[position..position + count].iter().collect();
        net.edit(site, Operation::delete(position, deleted));
    } else {
        let position = rng.next(text.len() + 1);
        let inserted = ["a", "bc", "def", "é", "日本"][rng.next(5)];
        net.edit(site, Operation::insert(position, inserted));
    }
}
