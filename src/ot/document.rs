// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! A plain text buffer that operations can be applied to.
//!
//! Host editors keep their own buffers; this one backs the relay's replica,
//! the demo, and the tests.

use crate::error::EditorError;
use crate::ot::op::Operation;
use crate::ot::op::char_len;
use crate::sync::checksum::Checksum;

/// A text document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    /// Length in chars.
    len: usize,
    /// Reject deletes whose text does not match the buffer.
    verify_deletes: bool,
}

impl Document {
    /// Create a document that verifies deleted text.
    pub fn new(text: impl Into<String>) -> Document {
        return Document::with_verification(text, true);
    }

    /// Create a document, choosing whether deletes are verified.
    pub fn with_verification(text: impl Into<String>, verify_deletes: bool) -> Document {
        let text = text.into();
        let len = char_len(&text);
        return Document {
            text,
            len,
            verify_deletes,
        };
    }

    /// Current contents.
    pub fn text(&self) -> &str {
        return &self.text;
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        return self.len;
    }

    /// True if the document is empty.
    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    /// Checksum of the current contents.
    pub fn checksum(&self) -> Checksum {
        return Checksum::of(&self.text);
    }

    /// Apply an operation. On error the document is left unchanged.
    pub fn apply(&mut self, op: &Operation) -> Result<(), EditorError> {
        if let Operation::Split { .. } = op {
            // One copy for the whole composite, however deep.
            let mut scratch = self.clone();
            for leaf in op.leaves() {
                scratch.apply_leaf(leaf)?;
            }
            *self = scratch;
            return Ok(());
        }
        return self.apply_leaf(op);
    }

    fn apply_leaf(&mut self, op: &Operation) -> Result<(), EditorError> {
        match op {
            Operation::Insert { position, text, .. } => {
                if *position > self.len {
                    return Err(EditorError::OutOfBounds {
                        position: *position,
                        len: self.len,
                    });
                }
                let at = self.byte_offset(*position);
                self.text.insert_str(at, text);
                self.len += char_len(text);
            }
            Operation::Delete { position, text } => {
                let count = char_len(text);
                if position + count > self.len {
                    return Err(EditorError::OutOfBounds {
                        position: position + count,
                        len: self.len,
                    });
                }
                let start = self.byte_offset(*position);
                let end = self.byte_offset(position + count);
                if self.verify_deletes && &self.text[start..end] != text.as_str() {
                    return Err(EditorError::DeleteMismatch {
                        position: *position,
                        expected: text.clone(),
                        found: self.text[start..end].to_string(),
                    });
                }
                self.text.replace_range(start..end, "");
                self.len -= count;
            }
            Operation::Split { .. } => return self.apply(op),
            Operation::NoOp | Operation::Timestamp => {}
        }
        return Ok(());
    }

    fn byte_offset(&self, chars: usize) -> usize {
        return self
            .text
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
    }
}
