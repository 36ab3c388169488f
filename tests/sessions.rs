// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Sessions over a serialized transport, and one thread per document.

use std::thread;

use duet::Config;
use duet::ot::primitives::{DocumentPath, SiteId};
use duet::ot::{Document, Operation};
use duet::session::{DocumentSession, Sessions};
use duet::sync::{Request, Side};

type Local = DocumentSession<Document, Vec<Request>>;

fn peer(path: &DocumentPath, text: &str) -> Local {
    return DocumentSession::new(
        &Config::default(),
        path.clone(),
        SiteId::new("bob"),
        Side::Server,
        Document::new(text),
        Vec::new(),
    );
}

/// Deliver both outboxes, in order, through JSON.
fn exchange(a: &mut Local, b: &mut Local) {
    let from_a = std::mem::take(a.transport_mut());
    let from_b = std::mem::take(b.transport_mut());
    for request in from_a {
        let decoded = Request::from_json(&request.to_json().unwrap()).unwrap();
        b.receive(&decoded).unwrap();
    }
    for request in from_b {
        let decoded = Request::from_json(&request.to_json().unwrap()).unwrap();
        a.receive(&decoded).unwrap();
    }
}

#[test]
fn json_transport_between_two_sites() {
    let path = DocumentPath::new("notes.md");
    let config = Config::default();
    let mut sessions: Sessions<Document, Vec<Request>> = Sessions::new(config.clone(), SiteId::new("alice"));
    sessions.open(path.clone(), Side::Client, config.document("# notes\n"), Vec::new());
    let mut bob = peer(&path, "# notes\n");

    let alice = sessions.get_mut(&path).unwrap();
    alice.local_operation(Operation::insert(8, "- milk\n")).unwrap();
    alice.local_operation(Operation::split(
        Operation::delete(2, "notes"),
        Operation::insert(2, "todo"),
    ))
    .unwrap();
    bob.local_operation(Operation::insert(8, "- eggs\n")).unwrap();

    // Bob's requests arrive at the site level and are routed by path.
    for request in std::mem::take(bob.transport_mut()) {
        let decoded = Request::from_json(&request.to_json().unwrap()).unwrap();
        sessions.route(&decoded).unwrap();
    }
    let alice = sessions.get_mut(&path).unwrap();
    for request in std::mem::take(alice.transport_mut()) {
        bob.receive(&request).unwrap();
    }

    let alice = sessions.get(&path).unwrap();
    assert_eq!(alice.editor().text(), bob.editor().text());
    assert_eq!(bob.editor().text(), "# todo\n- eggs\n- milk\n");
}

#[test]
fn acknowledgements_drain_pending() {
    let path = DocumentPath::new("a.txt");
    let mut alice = DocumentSession::new(
        &Config::default(),
        path.clone(),
        SiteId::new("alice"),
        Side::Client,
        Document::new(""),
        Vec::new(),
    );
    let mut bob = peer(&path, "");

    alice.local_operation(Operation::insert(0, "hi")).unwrap();
    exchange(&mut alice, &mut bob);
    assert_eq!(alice.jupiter().pending_len(), 1);

    bob.acknowledge();
    exchange(&mut alice, &mut bob);
    assert_eq!(alice.jupiter().pending_len(), 0);
    assert_eq!(alice.editor().text(), "hi");
}

#[test]
fn documents_are_driven_from_their_own_threads() {
    let config = Config::default();
    let mut sessions: Sessions<Document, Vec<Request>> = Sessions::new(config.clone(), SiteId::new("alice"));
    for name in ["a.txt", "b.txt", "c.txt", "d.txt"] {
        sessions.open(DocumentPath::new(name), Side::Client, config.document(""), Vec::new());
    }

    let handles: Vec<_> = sessions
        .into_sessions()
        .map(|(path, mut alice)| {
            thread::spawn(move || {
                let mut bob = peer(&path, "");
                for round in 0..50 {
                    alice.local_operation(Operation::insert(0, "a")).unwrap();
                    let end = bob.editor().len();
                    bob.local_operation(Operation::insert(end, "b")).unwrap();
                    if round % 7 == 0 {
                        exchange(&mut alice, &mut bob);
                    }
                }
                exchange(&mut alice, &mut bob);
                assert_eq!(alice.editor().text(), bob.editor().text());
                return alice.editor().text().to_string();
            })
        })
        .collect();

    for handle in handles {
        let text = handle.join().unwrap();
        assert_eq!(text.len(), 100);
        assert_eq!(text.matches('a').count(), 50);
    }
}
