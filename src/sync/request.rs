// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Requests: operations stamped for transport.
//!
//! Wire format (JSON):
//!
//! ```text
//! {
//!   "path": "src/lib.rs",
//!   "site": "alice",
//!   "time": { "local": 3, "remote": 1 },
//!   "operation": { "type": "insert", "position": 4, "text": "f", "origin": 4 }
//! }
//! ```
//!
//! Operation tags are `insert`, `delete`, `split`, `noop` and `timestamp`.
//! A split is sent flat, as the list of operations it applies in order:
//!
//! ```text
//! { "type": "split", "ops": [ { "type": "delete", ... }, { "type": "insert", ... } ] }
//! ```
//!
//! Undoing a long typing burst produces a deeply nested split, and nesting
//! it on the wire would run into the JSON parser's depth limit. Decoding
//! rebuilds the list as a left-to-right sequence, so a split arrives with
//! the same effect but not necessarily the same nesting.
//!
//! Decoding goes through a loosely typed mirror of the operation so that
//! negative positions, missing text and unknown tags from a mismatched peer
//! come back as `OpError`s instead of generic parse failures.

use serde::Deserialize;
use serde::Serialize;

use crate::error::OpError;
use crate::error::WireError;
use crate::ot::op::Operation;
use crate::ot::primitives::DocumentPath;
use crate::ot::primitives::SiteId;
use crate::ot::primitives::VectorTime;

/// An operation together with the synchronization state it was made in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    /// The document the operation applies to.
    pub path: DocumentPath,
    /// The site whose user made the edit.
    pub source: SiteId,
    /// The sender's vector time when it generated the request.
    pub time: VectorTime,
    pub operation: Operation,
}

impl Request {
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, WireError> {
        return Ok(serde_json::to_string(&WireRequest::from(self))?);
    }

    /// Decode from JSON, validating the operation.
    pub fn from_json(json: &str) -> Result<Request, WireError> {
        let wire: WireRequest = serde_json::from_str(json)?;
        return Ok(Request::try_from(wire)?);
    }
}

/// Serialized form of a `Request`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRequest {
    pub path: DocumentPath,
    pub site: SiteId,
    pub time: VectorTime,
    pub operation: WireOperation,
}

/// Serialized form of an `Operation`. Every field is optional so that
/// validation can report what exactly is wrong.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireOperation {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<i64>,
    /// The parts of a split, in application order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ops: Option<Vec<WireOperation>>,
}

impl From<&Request> for WireRequest {
    fn from(request: &Request) -> WireRequest {
        return WireRequest {
            path: request.path.clone(),
            site: request.source.clone(),
            time: request.time,
            operation: WireOperation::from(&request.operation),
        };
    }
}

impl TryFrom<WireRequest> for Request {
    type Error = OpError;

    fn try_from(wire: WireRequest) -> Result<Request, OpError> {
        return Ok(Request {
            path: wire.path,
            source: wire.site,
            time: wire.time,
            operation: Operation::try_from(wire.operation)?,
        });
    }
}

impl From<&Operation> for WireOperation {
    fn from(op: &Operation) -> WireOperation {
        return match op {
            Operation::Insert { position, text, origin } => WireOperation {
                kind: "insert".into(),
                position: Some(*position as i64),
                text: Some(text.clone()),
                origin: Some(*origin as i64),
                ..WireOperation::default()
            },
            Operation::Delete { position, text } => WireOperation {
                kind: "delete".into(),
                position: Some(*position as i64),
                text: Some(text.clone()),
                ..WireOperation::default()
            },
            Operation::Split { .. } => WireOperation {
                kind: "split".into(),
                ops: Some(op.leaves().into_iter().map(WireOperation::from).collect()),
                ..WireOperation::default()
            },
            Operation::NoOp => WireOperation {
                kind: "noop".into(),
                ..WireOperation::default()
            },
            Operation::Timestamp => WireOperation {
                kind: "timestamp".into(),
                ..WireOperation::default()
            },
        };
    }
}

impl TryFrom<WireOperation> for Operation {
    type Error = OpError;

    fn try_from(wire: WireOperation) -> Result<Operation, OpError> {
        return match wire.kind.as_str() {
            "insert" => {
                let position = wire.position.ok_or(OpError::MissingOperand("position"))?;
                let origin = wire.origin.unwrap_or(position);
                if origin < 0 {
                    return Err(OpError::NegativePosition(origin));
                }
                match Operation::try_insert(position, wire.text)? {
                    Operation::Insert { position, text, .. } => Ok(Operation::Insert {
                        position,
                        text,
                        origin: origin as usize,
                    }),
                    other => Ok(other),
                }
            }
            "delete" => {
                let position = wire.position.ok_or(OpError::MissingOperand("position"))?;
                Operation::try_delete(position, wire.text)
            }
            "split" => {
                let ops = wire.ops.ok_or(OpError::MissingOperand("ops"))?;
                if ops.is_empty() {
                    return Err(OpError::MissingOperand("ops"));
                }
                let ops = ops.into_iter().map(Operation::try_from).collect::<Result<Vec<_>, _>>()?;
                Ok(Operation::sequence(ops))
            }
            "noop" => Ok(Operation::NoOp),
            "timestamp" => Ok(Operation::Timestamp),
            _ => Err(OpError::Unsupported(wire.kind)),
        };
    }
}
