//! Message source trait

use chatboard_types::Message;
use chrono::{DateTime, Utc};

/// Trait for chat message sources
///
/// A source answers time-range queries over the messages it knows about.
/// Results are a finite snapshot; ordering is not guaranteed.
pub trait MessageSource: Send + Sync {
    /// All messages with a timestamp in `[start, end]`
    fn get_messages(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Message>;
}
