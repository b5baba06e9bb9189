//! Logged-in session state

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// The current login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: String,
    pub since: DateTime<Utc>,
}

/// Session holder shared between the event loop and renderers
#[derive(Default)]
pub struct SessionState {
    current: ArcSwapOption<Session>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a login, replacing any previous session
    pub fn login(&self, user: impl Into<String>) -> Arc<Session> {
        let session = Arc::new(Session {
            user: user.into(),
            since: Utc::now(),
        });
        self.current.store(Some(Arc::clone(&session)));
        session
    }

    /// End the current session, returning it
    pub fn logout(&self) -> Option<Arc<Session>> {
        self.current.swap(None)
    }

    pub fn current(&self) -> Option<Arc<Session>> {
        self.current.load_full()
    }

    /// Name of the logged-in user
    pub fn user(&self) -> Option<String> {
        self.current().map(|s| s.user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_logout() {
        let state = SessionState::new();
        assert!(state.current().is_none());

        state.login("ana");
        assert_eq!(state.user().as_deref(), Some("ana"));

        state.login("bo");
        assert_eq!(state.user().as_deref(), Some("bo"));

        let ended = state.logout().unwrap();
        assert_eq!(ended.user, "bo");
        assert!(state.logout().is_none());
    }
}
