// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Two sites editing one document through a relay, in one process.

use duet::Config;
use duet::SyncError;
use duet::logging;
use duet::ot::Document;
use duet::ot::Operation;
use duet::ot::primitives::DocumentPath;
use duet::ot::primitives::SiteId;
use duet::session::DocumentSession;
use duet::sync::Relay;
use duet::sync::Request;
use duet::sync::Side;

type Site = DocumentSession<Document, Vec<Request>>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    logging::init(&config)?;

    let path = DocumentPath::new("greeting.txt");
    let mut relay = Relay::from_config(&config, path.clone(), SiteId::new("relay"), "hello world");
    let mut sites: Vec<Site> = ["alice", "bob"]
        .into_iter()
        .map(|name| {
            let site = SiteId::new(name);
            let text = relay.connect(site.clone());
            DocumentSession::new(&config, path.clone(), site, Side::Client, config.document(text), Vec::new())
        })
        .collect();

    sites[0].local_operation(Operation::insert(5, ","))?;
    sites[1].local_operation(Operation::delete(6, "world"))?;
    sites[1].local_operation(Operation::insert(6, "there"))?;
    sites[0].local_operation(Operation::insert(12, "!"))?;
    exchange(&mut relay, &mut sites)?;

    sites[1].undo()?;
    exchange(&mut relay, &mut sites)?;

    for site in &sites {
        println!("{:>6}: {:?}", site.site().as_str(), site.editor().text());
    }
    println!("{:>6}: {:?}", "relay", relay.document().text());
    println!("checksum {:?}", relay.checksum());
    return Ok(());
}

/// Deliver every queued request until nothing is left in flight.
fn exchange(relay: &mut Relay, sites: &mut [Site]) -> Result<(), SyncError> {
    loop {
        let mut delivered = false;
        for index in 0..sites.len() {
            let from = sites[index].site().clone();
            for request in std::mem::take(sites[index].transport_mut()) {
                delivered = true;
                for outgoing in relay.receive(&from, &request)? {
                    if let Some(site) = sites.iter_mut().find(|s| s.site() == &outgoing.to) {
                        site.receive(&outgoing.request)?;
                    }
                }
            }
        }
        if !delivered {
            return Ok(());
        }
    }
}
