//! Chat message type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent
    pub timestamp: DateTime<Utc>,
    /// Sender display name
    pub sender: String,
    /// Message body
    pub text: String,
}

impl Message {
    /// Create a message stamped with the current time
    pub fn now(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            sender: sender.into(),
            text: text.into(),
        }
    }

    /// Create a message with an explicit timestamp
    pub fn at(timestamp: DateTime<Utc>, sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            text: text.into(),
        }
    }
}
