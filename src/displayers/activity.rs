//! Activity displayer: message volume over a trailing window

use crate::app::AppContext;
use anyhow::{bail, Result};
use chatboard_core::{BoxedRenderer, DisplayConfig, Renderer, TriggerKind};
use chatboard_sources::MessageSource;
use chrono::{Duration, Utc};
use std::collections::HashSet;

const DEFAULT_WINDOW_SECS: u64 = 60;

pub struct ActivityDisplayer {
    display_id: String,
    window_secs: u64,
}

impl ActivityDisplayer {
    pub fn from_config(config: &DisplayConfig) -> Result<Self> {
        Ok(Self {
            display_id: config.id.clone(),
            window_secs: read_window(config)?,
        })
    }

    pub fn factory(config: &DisplayConfig) -> Result<BoxedRenderer<AppContext>> {
        Ok(Box::new(Self::from_config(config)?))
    }
}

fn read_window(config: &DisplayConfig) -> Result<u64> {
    match config.setting_u64("window_secs") {
        Some(0) => bail!("activity: 'window_secs' must be at least 1"),
        Some(secs) if secs > i32::MAX as u64 => bail!("activity: 'window_secs' is too large"),
        Some(secs) => Ok(secs),
        None => Ok(DEFAULT_WINDOW_SECS),
    }
}

impl Renderer<AppContext> for ActivityDisplayer {
    fn kind(&self) -> &str {
        "activity"
    }

    fn render(&mut self, context: &AppContext, _trigger: TriggerKind) -> Result<()> {
        let end = Utc::now();
        let start = end - Duration::seconds(self.window_secs as i64);
        let messages = context.messages.get_messages(start, end);
        let senders: HashSet<&str> = messages.iter().map(|m| m.sender.as_str()).collect();

        let text = format!(
            "{} message{} from {} sender{} in the last {}s",
            messages.len(),
            plural(messages.len()),
            senders.len(),
            plural(senders.len()),
            self.window_secs
        );
        context.board.publish(&self.display_id, text);
        Ok(())
    }

    fn on_config_changed(&mut self, config: &DisplayConfig) -> Result<()> {
        self.window_secs = read_window(config)?;
        Ok(())
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatboard_sources::InMemoryMessageLog;
    use chatboard_types::Message;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_counts_only_recent_messages() {
        let now = Utc::now();
        let log = InMemoryMessageLog::with_messages(vec![
            Message::at(now - Duration::seconds(5), "ana", "hi"),
            Message::at(now - Duration::seconds(3), "ana", "again"),
            Message::at(now - Duration::seconds(2), "bo", "yo"),
            Message::at(now - Duration::seconds(600), "cy", "old"),
        ]);
        let context = AppContext::new(Arc::new(log));
        let config = DisplayConfig::new("activity").with_setting("window_secs", json!(30));
        let mut activity = ActivityDisplayer::from_config(&config).unwrap();

        activity.render(&context, TriggerKind::TIMER).unwrap();
        assert_eq!(
            context.board.get(&config.id).unwrap().text,
            "3 messages from 2 senders in the last 30s"
        );
    }

    #[test]
    fn test_window_validation() {
        let zero = DisplayConfig::new("activity").with_setting("window_secs", json!(0));
        assert!(ActivityDisplayer::from_config(&zero).is_err());

        let mut activity = ActivityDisplayer::from_config(&DisplayConfig::new("activity")).unwrap();
        assert_eq!(activity.window_secs, DEFAULT_WINDOW_SECS);
        let wider = DisplayConfig::new("activity").with_setting("window_secs", json!(300));
        activity.on_config_changed(&wider).unwrap();
        assert_eq!(activity.window_secs, 300);
    }
}
