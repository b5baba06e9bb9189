//! Latest rendered text of every display
//!
//! Renderers publish here; the event loop prints what changed. Nothing is
//! written to disk.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// One display's current content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEntry {
    pub text: String,
    pub updated: DateTime<Utc>,
    /// Board revision at which this entry last changed
    pub revision: u64,
}

#[derive(Default)]
struct BoardInner {
    revision: u64,
    entries: HashMap<String, BoardEntry>,
}

/// Shared board of rendered display content
#[derive(Default)]
pub struct DisplayBoard {
    inner: RwLock<BoardInner>,
}

impl DisplayBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `text` for `display_id`. Returns false if the text is unchanged.
    pub fn publish(&self, display_id: &str, text: String) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner
            .entries
            .get(display_id)
            .is_some_and(|entry| entry.text == text)
        {
            return false;
        }
        inner.revision += 1;
        let revision = inner.revision;
        inner.entries.insert(
            display_id.to_string(),
            BoardEntry {
                text,
                updated: Utc::now(),
                revision,
            },
        );
        true
    }

    pub fn get(&self, display_id: &str) -> Option<BoardEntry> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.entries.get(display_id).cloned()
    }

    /// Entries changed after `revision`, oldest change first
    pub fn changes_since(&self, revision: u64) -> Vec<(String, BoardEntry)> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut changed: Vec<_> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.revision > revision)
            .map(|(id, entry)| (id.clone(), entry.clone()))
            .collect();
        changed.sort_by_key(|(_, entry)| entry.revision);
        changed
    }
}
