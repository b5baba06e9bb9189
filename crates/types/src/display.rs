//! Per-display configuration

use crate::schedule::{ScheduleError, TimerSchedule};
use crate::trigger::TriggerKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Configuration for one display instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Unique identifier for this display
    #[serde(default = "generate_uuid")]
    pub id: String,
    /// Renderer kind (e.g., "chat_tail", "clock")
    pub kind: String,
    /// Event triggers enabled at construction.
    /// The timer bit is owned by the timer lifecycle and ignored here.
    #[serde(default)]
    pub triggers: TriggerKind,
    /// Delay before the first timer firing
    #[serde(default)]
    pub timer_start_delay_ms: u64,
    /// Timer period; absent together with a zero delay means no timer
    #[serde(default)]
    pub timer_interval_ms: Option<u64>,
    /// Renderer-specific settings
    #[serde(default)]
    pub settings: HashMap<String, Value>,
}

fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

impl DisplayConfig {
    /// Create a display config of the given kind with a fresh ID and no triggers
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            id: generate_uuid(),
            kind: kind.into(),
            triggers: TriggerKind::empty(),
            timer_start_delay_ms: 0,
            timer_interval_ms: None,
            settings: HashMap::new(),
        }
    }

    /// Builder: set the event triggers
    pub fn with_triggers(mut self, triggers: TriggerKind) -> Self {
        self.triggers = triggers;
        self
    }

    /// Builder: set the timer delay and interval
    pub fn with_timer(mut self, start_delay_ms: u64, interval_ms: Option<u64>) -> Self {
        self.timer_start_delay_ms = start_delay_ms;
        self.timer_interval_ms = interval_ms;
        self
    }

    /// Builder: add a renderer setting
    pub fn with_setting(mut self, key: &str, value: Value) -> Self {
        self.settings.insert(key.to_string(), value);
        self
    }

    /// Timer schedule described by this config
    pub fn timer_schedule(&self) -> Result<TimerSchedule, ScheduleError> {
        TimerSchedule::from_millis(self.timer_start_delay_ms, self.timer_interval_ms)
    }

    /// Read an unsigned integer setting
    pub fn setting_u64(&self, key: &str) -> Option<u64> {
        self.settings.get(key).and_then(|v| v.as_u64())
    }

    /// Read a string setting
    pub fn setting_str(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_config_deserialize_defaults() {
        let json = r#"{ "kind": "chat_tail" }"#;
        let config: DisplayConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.kind, "chat_tail");
        assert!(!config.id.is_empty());
        assert!(config.triggers.is_empty());
        assert!(config.timer_schedule().unwrap().is_unused());
    }

    #[test]
    fn test_display_config_full() {
        let json = r#"{
            "id": "tail",
            "kind": "chat_tail",
            "triggers": "STARTUP | CHAT",
            "timer_start_delay_ms": 100,
            "timer_interval_ms": 50,
            "settings": { "lines": 3 }
        }"#;
        let config: DisplayConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.id, "tail");
        assert_eq!(config.triggers, TriggerKind::STARTUP | TriggerKind::CHAT);
        assert_eq!(config.setting_u64("lines"), Some(3));

        let schedule = config.timer_schedule().unwrap();
        assert_eq!(schedule.start_delay.as_millis(), 100);
        assert_eq!(schedule.interval.map(|d| d.as_millis()), Some(50));
    }

    #[test]
    fn test_zero_interval_is_config_error() {
        let config = DisplayConfig::new("clock").with_timer(0, Some(0));
        assert_eq!(config.timer_schedule(), Err(ScheduleError::ZeroInterval));
    }
}
