//! Application context handed to every renderer

use super::board::DisplayBoard;
use super::session::SessionState;
use chatboard_sources::InMemoryMessageLog;
use std::sync::Arc;

/// Read-mostly state renderers draw from
pub struct AppContext {
    /// Chat message log
    pub messages: Arc<InMemoryMessageLog>,
    /// Current login
    pub session: SessionState,
    /// Rendered output of every display
    pub board: DisplayBoard,
}

impl AppContext {
    pub fn new(messages: Arc<InMemoryMessageLog>) -> Self {
        Self {
            messages,
            session: SessionState::new(),
            board: DisplayBoard::new(),
        }
    }
}
