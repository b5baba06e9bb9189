//! Session displayer: who is logged in and for how long

use crate::app::AppContext;
use anyhow::Result;
use chatboard_core::{BoxedRenderer, DisplayConfig, Renderer, TriggerKind};
use chrono::{DateTime, Utc};

pub struct SessionDisplayer {
    display_id: String,
}

impl SessionDisplayer {
    pub fn new(display_id: impl Into<String>) -> Self {
        Self {
            display_id: display_id.into(),
        }
    }

    pub fn factory(config: &DisplayConfig) -> Result<BoxedRenderer<AppContext>> {
        Ok(Box::new(Self::new(config.id.clone())))
    }
}

impl Renderer<AppContext> for SessionDisplayer {
    fn kind(&self) -> &str {
        "session"
    }

    fn render(&mut self, context: &AppContext, _trigger: TriggerKind) -> Result<()> {
        let text = match context.session.current() {
            Some(session) => format!(
                "{} logged in for {}",
                session.user,
                format_elapsed(session.since, Utc::now())
            ),
            None => "not logged in".to_string(),
        };
        context.board.publish(&self.display_id, text);
        Ok(())
    }
}

/// Compact elapsed time, e.g. "1h02m", "3m05s", "12s"
fn format_elapsed(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - since).num_seconds().max(0);
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}h{:02}m", h, m)
    } else if m > 0 {
        format!("{}m{:02}s", m, s)
    } else {
        format!("{}s", s)
    }
}
