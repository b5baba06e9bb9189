//! Built-in display set used when the configuration lists none

use chatboard_types::{DisplayConfig, TriggerKind};
use serde_json::json;

/// One display of each built-in kind
pub fn default_displays() -> Vec<DisplayConfig> {
    vec![
        DisplayConfig {
            id: "chat".to_string(),
            ..DisplayConfig::new("chat_tail")
                .with_triggers(TriggerKind::STARTUP | TriggerKind::LOGIN | TriggerKind::CHAT)
                .with_setting("lines", json!(5))
        },
        DisplayConfig {
            id: "activity".to_string(),
            ..DisplayConfig::new("activity")
                .with_triggers(TriggerKind::STARTUP | TriggerKind::CHAT)
                .with_timer(1_000, Some(5_000))
                .with_setting("window_secs", json!(60))
        },
        DisplayConfig {
            id: "session".to_string(),
            ..DisplayConfig::new("session")
                .with_triggers(TriggerKind::STARTUP | TriggerKind::LOGIN | TriggerKind::LOGOUT)
                .with_timer(1_000, Some(1_000))
        },
        DisplayConfig {
            id: "clock".to_string(),
            ..DisplayConfig::new("clock")
                .with_triggers(TriggerKind::STARTUP)
                .with_timer(0, Some(1_000))
                .with_setting("timezone", json!("UTC"))
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let displays = default_displays();
        assert_eq!(displays.len(), 4);
        for display in &displays {
            assert!(display.timer_schedule().is_ok());
            assert!(display.triggers.contains(TriggerKind::STARTUP));
        }
        assert!(displays[0].timer_schedule().unwrap().is_unused());
    }
}
