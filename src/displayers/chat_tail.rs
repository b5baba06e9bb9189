//! Chat tail displayer: the newest messages, oldest first

use crate::app::AppContext;
use anyhow::{bail, Result};
use chatboard_core::{BoxedRenderer, DisplayConfig, Renderer, TriggerKind};

/// Number of lines shown when the `lines` setting is absent
const DEFAULT_LINES: usize = 5;

pub struct ChatTailDisplayer {
    display_id: String,
    lines: usize,
}

impl ChatTailDisplayer {
    pub fn from_config(config: &DisplayConfig) -> Result<Self> {
        Ok(Self {
            display_id: config.id.clone(),
            lines: read_lines(config)?,
        })
    }

    pub fn factory(config: &DisplayConfig) -> Result<BoxedRenderer<AppContext>> {
        Ok(Box::new(Self::from_config(config)?))
    }
}

fn read_lines(config: &DisplayConfig) -> Result<usize> {
    match config.setting_u64("lines") {
        Some(0) => bail!("chat_tail: 'lines' must be at least 1"),
        Some(n) => Ok(n as usize),
        None => Ok(DEFAULT_LINES),
    }
}

impl Renderer<AppContext> for ChatTailDisplayer {
    fn kind(&self) -> &str {
        "chat_tail"
    }

    fn render(&mut self, context: &AppContext, _trigger: TriggerKind) -> Result<()> {
        let messages = context.messages.latest(self.lines);

        let text = if messages.is_empty() {
            "(no messages)".to_string()
        } else {
            messages
                .iter()
                .map(|m| format!("[{}] {}: {}", m.timestamp.format("%H:%M:%S"), m.sender, m.text))
                .collect::<Vec<_>>()
                .join("\n")
        };
        context.board.publish(&self.display_id, text);
        Ok(())
    }

    fn on_config_changed(&mut self, config: &DisplayConfig) -> Result<()> {
        self.lines = read_lines(config)?;
        Ok(())
    }
}
