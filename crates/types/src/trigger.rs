//! Trigger kinds that cause a display to refresh

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Event classes a display listens to.
    ///
    /// Several kinds can be OR-combined so one display is driven by more than
    /// one event source. The empty set means the display is dormant.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct TriggerKind: u32 {
        /// Periodic tick from the display's own timer
        const TIMER = 1 << 0;
        /// Host application finished starting up
        const STARTUP = 1 << 1;
        /// A user logged in
        const LOGIN = 1 << 2;
        /// The session user logged out
        const LOGOUT = 1 << 3;
        /// A new chat message arrived
        const CHAT = 1 << 4;
    }
}

impl TriggerKind {
    /// Lower-case name of a single flag, or `None` for empty or combined values
    pub fn name(self) -> Option<&'static str> {
        const NAMES: [(TriggerKind, &str); 5] = [
            (TriggerKind::TIMER, "timer"),
            (TriggerKind::STARTUP, "startup"),
            (TriggerKind::LOGIN, "login"),
            (TriggerKind::LOGOUT, "logout"),
            (TriggerKind::CHAT, "chat"),
        ];
        NAMES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, name)| *name)
    }
}

/// Map an event word (`"login"`, `"Timer"`, ...) to its flag
pub fn parse_trigger_name(name: &str) -> Option<TriggerKind> {
    let name = name.trim().to_ascii_lowercase();
    TriggerKind::all()
        .iter()
        .find(|kind| kind.name() == Some(name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_dormant() {
        let kinds = TriggerKind::default();
        assert!(kinds.is_empty());
        assert!(!kinds.intersects(TriggerKind::all()));
    }

    #[test]
    fn test_combine_test_and_clear() {
        let mut kinds = TriggerKind::STARTUP | TriggerKind::LOGIN;
        assert!(kinds.intersects(TriggerKind::LOGIN));
        assert!(!kinds.intersects(TriggerKind::TIMER));

        kinds |= TriggerKind::TIMER;
        assert!(kinds.contains(TriggerKind::TIMER));

        kinds &= !TriggerKind::TIMER;
        assert_eq!(kinds, TriggerKind::STARTUP | TriggerKind::LOGIN);
    }

    #[test]
    fn test_serde_uses_flag_names() {
        let kinds = TriggerKind::STARTUP | TriggerKind::LOGIN;
        let json = serde_json::to_string(&kinds).unwrap();
        assert!(json.contains("STARTUP"));
        assert!(json.contains("LOGIN"));

        let parsed: TriggerKind = serde_json::from_str("\"CHAT | LOGOUT\"").unwrap();
        assert_eq!(parsed, TriggerKind::CHAT | TriggerKind::LOGOUT);
    }

    #[test]
    fn test_parse_trigger_name() {
        assert_eq!(parse_trigger_name("Login"), Some(TriggerKind::LOGIN));
        assert_eq!(parse_trigger_name(" timer "), Some(TriggerKind::TIMER));
        assert_eq!(parse_trigger_name("reboot"), None);
        assert_eq!(parse_trigger_name(""), None);
        for kind in TriggerKind::all().iter() {
            assert_eq!(parse_trigger_name(kind.name().unwrap()), Some(kind));
        }
        assert_eq!(TriggerKind::CHAT.name(), Some("chat"));
        assert_eq!((TriggerKind::CHAT | TriggerKind::LOGIN).name(), None);
    }
}
