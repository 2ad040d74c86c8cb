//! The message record and collection helpers.

use serde::{Deserialize, Serialize};

/// A single stored message.
///
/// Field order is significant: it is the order written to disk and
/// returned over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Positive identifier, unique within the collection.
    pub id: u64,
    /// Message text, already trimmed.
    pub message: String,
}

impl Message {
    pub fn new(id: u64, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
        }
    }
}

/// Find the message with the given id.
pub fn find(messages: &[Message], id: u64) -> Option<&Message> {
    messages.iter().find(|m| m.id == id)
}

/// Index of the message with the given id.
pub fn position(messages: &[Message], id: u64) -> Option<usize> {
    messages.iter().position(|m| m.id == id)
}
