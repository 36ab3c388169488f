// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Inclusion transformation (the GOTO rules).
//!
//! `transform(a, b, priority)` takes two operations made against the same
//! document state and rewrites `a` so that it can be applied after `b`. For
//! any such pair,
//!
//! ```text
//! apply(apply(doc, b), transform(a, b, p)) == apply(apply(doc, a), transform(b, a, !p))
//! ```
//!
//! `priority` only matters when two inserts land at the same position with
//! the same origin. The two sides of a pair must pass opposite values.
//!
//! Everything here is a pure function of its inputs.

use crate::ot::op::Operation;
use crate::ot::op::char_len;
use crate::ot::op::split_at_char;

/// Rewrite `op` so it applies after `against`.
pub fn transform(op: &Operation, against: &Operation, priority: bool) -> Operation {
    return match (op, against) {
        (Operation::NoOp | Operation::Timestamp, _) => op.clone(),
        (_, Operation::NoOp | Operation::Timestamp) => op.clone(),

        // first' runs right after `against`; second was written against the
        // state after first, so it has to see `against` as it looks after first.
        (Operation::Split { first, second }, _) => {
            let first_t = transform(first, against, priority);
            let against_t = transform(against, first, !priority);
            let second_t = transform(second, &against_t, priority);
            Operation::split(first_t, second_t)
        }
        (_, Operation::Split { first, second }) => {
            let partial = transform(op, first, priority);
            transform(&partial, second, priority)
        }

        (
            Operation::Insert { position: pos_a, text: text_a, origin: origin_a },
            Operation::Insert { position: pos_b, text: text_b, origin: origin_b },
        ) => insert_insert(*pos_a, text_a, *origin_a, *pos_b, text_b, *origin_b, priority),

        (
            Operation::Insert { position: pos_a, text: text_a, origin },
            Operation::Delete { position: pos_b, text: text_b },
        ) => insert_delete(*pos_a, text_a, *origin, *pos_b, text_b),

        (
            Operation::Delete { position: pos_a, text: text_a },
            Operation::Insert { position: pos_b, text: text_b, .. },
        ) => delete_insert(*pos_a, text_a, *pos_b, text_b),

        (
            Operation::Delete { position: pos_a, text: text_a },
            Operation::Delete { position: pos_b, text: text_b },
        ) => delete_delete(*pos_a, text_a, *pos_b, text_b),
    };
}

fn insert_insert(
    pos_a: usize,
    text_a: &str,
    origin_a: usize,
    pos_b: usize,
    text_b: &str,
    origin_b: usize,
    priority: bool,
) -> Operation {
    let a_first = pos_a < pos_b
        || (pos_a == pos_b && origin_a < origin_b)
        || (pos_a == pos_b && origin_a == origin_b && priority);

    if a_first {
        return Operation::insert_with_origin(pos_a, text_a, origin_a);
    }
    return Operation::insert_with_origin(pos_a + char_len(text_b), text_a, origin_a);
}

fn insert_delete(pos_a: usize, text_a: &str, origin_a: usize, pos_b: usize, text_b: &str) -> Operation {
    let len_b = char_len(text_b);

    if pos_a <= pos_b {
        return Operation::insert_with_origin(pos_a, text_a, origin_a);
    }
    if pos_a >= pos_b + len_b {
        return Operation::insert_with_origin(pos_a - len_b, text_a, origin_a);
    }
    // Inside the deleted range: the insert survives at the gap.
    return Operation::insert_with_origin(pos_b, text_a, origin_a);
}

fn delete_insert(pos_a: usize, text_a: &str, pos_b: usize, text_b: &str) -> Operation {
    let len_a = char_len(text_a);
    let len_b = char_len(text_b);

    if pos_b >= pos_a + len_a {
        return Operation::delete(pos_a, text_a);
    }
    if pos_b <= pos_a {
        return Operation::delete(pos_a + len_b, text_a);
    }

    // The insert lands inside the deleted range. Delete the head, which
    // leaves the inserted text at pos_a, then the tail right after it.
    let (head, tail) = split_at_char(text_a, pos_b - pos_a);
    return Operation::split(
        Operation::delete(pos_a, head),
        Operation::delete(pos_a + len_b, tail),
    );
}

fn delete_delete(pos_a: usize, text_a: &str, pos_b: usize, text_b: &str) -> Operation {
    let end_a = pos_a + char_len(text_a);
    let end_b = pos_b + char_len(text_b);

    if end_a <= pos_b {
        return Operation::delete(pos_a, text_a);
    }
    if pos_a >= end_b {
        return Operation::delete(pos_a - (end_b - pos_b), text_a);
    }
    if pos_b <= pos_a && end_a <= end_b {
        return Operation::NoOp;
    }
    if pos_b <= pos_a {
        // b removed our head.
        let (_, tail) = split_at_char(text_a, end_b - pos_a);
        return Operation::delete(pos_b, tail);
    }
    if end_a <= end_b {
        // b removed our tail.
        let (head, _) = split_at_char(text_a, pos_b - pos_a);
        return Operation::delete(pos_a, head);
    }

    // b sits strictly inside us.
    let (head, rest) = split_at_char(text_a, pos_b - pos_a);
    let (_, tail) = split_at_char(rest, end_b - pos_b);
    let mut remaining = String::with_capacity(head.len() + tail.len());
    remaining.push_str(head);
    remaining.push_str(tail);
    return Operation::delete(pos_a, remaining);
}

/// Map a cursor position across an applied operation.
///
/// Indices before an insert stay put, indices at or after it move right.
/// Indices after a deleted range move left, indices inside it collapse to
/// the start of the range.
pub fn transform_index(index: usize, op: &Operation) -> usize {
    return match op {
        Operation::Insert { position, text, .. } => {
            if index < *position {
                index
            } else {
                index + char_len(text)
            }
        }
        Operation::Delete { position, text } => {
            let end = position + char_len(text);
            if index <= *position {
                index
            } else if index >= end {
                index - (end - position)
            } else {
                *position
            }
        }
        Operation::Split { first, second } => transform_index(transform_index(index, first), second),
        Operation::NoOp | Operation::Timestamp => index,
    };
}

/// Map several positions (e.g. both ends of a selection) at once.
pub fn transform_indices(indices: &mut [usize], op: &Operation) {
    for index in indices.iter_mut() {
        *index = transform_index(*index, op);
    }
}
