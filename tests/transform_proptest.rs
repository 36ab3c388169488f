// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Property-based tests for operations and transformation.

use proptest::prelude::*;

use duet::ot::primitives::{DocumentPath, SiteId, VectorTime};
use duet::ot::{Document, Operation, transform, transform_index};
use duet::sync::Request;

// =============================================================================
// Strategies
// =============================================================================

/// A raw edit, resolved against a concrete text by `resolve`.
#[derive(Clone, Debug)]
enum Edit {
    Insert { pos_pct: f64, text: String },
    Delete { pos_pct: f64, len_pct: f64 },
    Replace { pos_pct: f64, len_pct: f64, text: String },
}

fn arbitrary_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0.0..=1.0f64, "[a-z]{1,4}").prop_map(|(pos_pct, text)| Edit::Insert { pos_pct, text }),
        (0.0..=1.0f64, 0.0..=1.0f64).prop_map(|(pos_pct, len_pct)| Edit::Delete { pos_pct, len_pct }),
        (0.0..=1.0f64, 0.0..=1.0f64, "[A-Z]{1,3}")
            .prop_map(|(pos_pct, len_pct, text)| Edit::Replace { pos_pct, len_pct, text }),
    ]
}

fn apply(text: &str, op: &Operation) -> String {
    let mut doc = Document::new(text);
    doc.apply(op).unwrap();
    return doc.text().to_string();
}

/// Turn an edit into an operation valid on `text`.
fn resolve(text: &str, edit: &Edit) -> Operation {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let range = |pos_pct: f64, len_pct: f64| {
        let start = ((pos_pct * len as f64) as usize).min(len);
        let count = ((len_pct * (len - start) as f64) as usize).min(4).min(len - start);
        let deleted: String = chars[start..start + count].iter().collect();
        return (start, deleted);
    };
    return match edit {
        Edit::Insert { pos_pct, text } => Operation::insert(((pos_pct * len as f64) as usize).min(len), text.clone()),
        Edit::Delete { pos_pct, len_pct } => {
            let (start, deleted) = range(*pos_pct, *len_pct);
            Operation::from_edit(start, "", &deleted)
        }
        Edit::Replace { pos_pct, len_pct, text } => {
            let (start, deleted) = range(*pos_pct, *len_pct);
            Operation::from_edit(start, text, &deleted)
        }
    };
}

/// A base text and two operations, each valid on that text. The second
/// component of each pair is a short sequence folded into one `Split`.
fn concurrent_pair() -> impl Strategy<Value = (String, Operation, Operation)> {
    (
        "[a-z]{0,12}",
        prop::collection::vec(arbitrary_edit(), 1..3),
        prop::collection::vec(arbitrary_edit(), 1..3),
    )
        .prop_map(|(base, a, b)| {
            let fold = |edits: &[Edit]| {
                let mut text = base.clone();
                let mut op = Operation::NoOp;
                for edit in edits {
                    let next = resolve(&text, edit);
                    text = apply(&text, &next);
                    op = Operation::split(op, next);
                }
                return op;
            };
            let a = fold(a.as_slice());
            let b = fold(b.as_slice());
            return (base, a, b);
        })
}

// =============================================================================
// Transformation
// =============================================================================

proptest! {
    #[test]
    fn concurrent_operations_converge((base, a, b) in concurrent_pair()) {
        let left = apply(&apply(&base, &a), &transform(&b, &a, false));
        let right = apply(&apply(&base, &b), &transform(&a, &b, true));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn invert_restores_the_document((base, a, _b) in concurrent_pair()) {
        let edited = apply(&base, &a);
        prop_assert_eq!(apply(&edited, &a.invert()), base);
    }

    #[test]
    fn noop_is_absorbed((_base, a, _b) in concurrent_pair(), priority in any::<bool>()) {
        prop_assert_eq!(transform(&a, &Operation::NoOp, priority), a.clone());
        prop_assert_eq!(transform(&a, &Operation::Timestamp, priority), a.clone());
        prop_assert_eq!(transform(&Operation::NoOp, &a, priority), Operation::NoOp);
    }

    #[test]
    fn transform_index_is_monotonic((base, a, _b) in concurrent_pair(), i in 0usize..16, j in 0usize..16) {
        let len = base.chars().count();
        let (i, j) = (i.min(len), j.min(len));
        let (lo, hi) = (i.min(j), i.max(j));
        prop_assert!(transform_index(lo, &a) <= transform_index(hi, &a));
    }

    #[test]
    fn indices_follow_inserts_and_deletes(base in "[a-z]{1,12}", edit in arbitrary_edit(), index in 0usize..16) {
        let len = base.chars().count();
        let index = index.min(len);
        match resolve(&base, &edit) {
            Operation::Insert { position, text, .. } => {
                let moved = transform_index(index, &Operation::insert(position, text.clone()));
                prop_assert!(moved >= index);
                if index >= position {
                    prop_assert_eq!(moved, index + text.chars().count());
                }
            }
            Operation::Delete { position, text } => {
                let removed = text.chars().count();
                let moved = transform_index(index, &Operation::delete(position, text.clone()));
                prop_assert!(moved <= index);
                if index >= position + removed {
                    prop_assert_eq!(moved, index - removed);
                }
            }
            _ => {}
        }
    }

    // =========================================================================
    // Wire format
    // =========================================================================

    #[test]
    fn any_operation_survives_json((base, a, _b) in concurrent_pair(), local in 0u64..1000, remote in 0u64..1000) {
        let request = Request {
            path: DocumentPath::new("doc.txt"),
            source: SiteId::new("site"),
            time: VectorTime::with_counts(local, remote),
            operation: a,
        };
        let decoded = Request::from_json(&request.to_json().unwrap()).unwrap();
        prop_assert_eq!(&decoded.path, &request.path);
        prop_assert_eq!(&decoded.source, &request.source);
        prop_assert_eq!(decoded.time, request.time);
        // Splits arrive flattened into a left-to-right sequence.
        prop_assert_eq!(decoded.operation.leaves(), request.operation.leaves());
        prop_assert_eq!(apply(&base, &decoded.operation), apply(&base, &request.operation));
    }

    #[test]
    fn arbitrary_json_never_panics(json in "\\PC{0,64}") {
        let _ = Request::from_json(&json);
    }
}
