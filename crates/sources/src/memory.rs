//! In-memory message log

use crate::message_source::MessageSource;
use anyhow::{Context, Result};
use chatboard_types::Message;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::io::BufRead;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

/// Append-only message log held in memory
///
/// Messages are kept sorted by timestamp so range queries are two binary
/// searches.
#[derive(Default)]
pub struct InMemoryMessageLog {
    messages: RwLock<Vec<Message>>,
}

impl InMemoryMessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log pre-filled with `messages`
    pub fn with_messages(messages: Vec<Message>) -> Self {
        let log = Self::new();
        for message in messages {
            log.push(message);
        }
        log
    }

    /// Load a JSON-lines file, one `Message` object per line.
    ///
    /// Blank lines are ignored; malformed lines are logged and skipped.
    pub fn load_jsonl(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open message log {}", path.display()))?;
        let log = Self::new();

        for (index, line) in std::io::BufReader::new(file).lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Message>(&line) {
                Ok(message) => log.push(message),
                Err(e) => warn!("{}:{}: skipping malformed message: {}", path.display(), index + 1, e),
            }
        }

        debug!("Loaded {} messages from {}", log.len(), path.display());
        Ok(log)
    }

    /// Append a message, keeping timestamp order
    pub fn push(&self, message: Message) {
        let mut messages = self.messages.write().unwrap_or_else(PoisonError::into_inner);
        let index = messages.partition_point(|m| m.timestamp <= message.timestamp);
        messages.insert(index, message);
    }

    pub fn len(&self) -> usize {
        self.messages.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The newest `count` messages, oldest first
    pub fn latest(&self, count: usize) -> Vec<Message> {
        let messages = self.messages.read().unwrap_or_else(PoisonError::into_inner);
        let start = messages.len().saturating_sub(count);
        messages[start..].to_vec()
    }
}

impl MessageSource for InMemoryMessageLog {
    fn get_messages(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Message> {
        if start > end {
            return Vec::new();
        }
        let messages = self.messages.read().unwrap_or_else(PoisonError::into_inner);
        let from = messages.partition_point(|m| m.timestamp < start);
        let to = messages.partition_point(|m| m.timestamp <= end);
        messages[from..to].to_vec()
    }
}
