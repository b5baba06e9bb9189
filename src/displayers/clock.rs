//! Clock displayer: current time in a configured timezone

use crate::app::AppContext;
use anyhow::{anyhow, bail, Result};
use chatboard_core::{BoxedRenderer, DisplayConfig, Renderer, TriggerKind};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use std::fmt::Write;

const DEFAULT_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq)]
enum ClockZone {
    Local,
    Named(Tz),
}

impl ClockZone {
    fn parse(name: &str) -> Result<Self> {
        if name.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }
        name.parse::<Tz>()
            .map(Self::Named)
            .map_err(|e| anyhow!("clock: invalid timezone {:?}: {}", name, e))
    }
}

pub struct ClockDisplayer {
    display_id: String,
    zone: ClockZone,
    format: String,
}

impl ClockDisplayer {
    pub fn from_config(config: &DisplayConfig) -> Result<Self> {
        let (zone, format) = read_settings(config)?;
        Ok(Self {
            display_id: config.id.clone(),
            zone,
            format,
        })
    }

    pub fn factory(config: &DisplayConfig) -> Result<BoxedRenderer<AppContext>> {
        Ok(Box::new(Self::from_config(config)?))
    }

    fn format_time(&self, now: DateTime<Utc>) -> Result<String> {
        let mut text = String::new();
        let written = match self.zone {
            ClockZone::Local => write!(text, "{}", now.with_timezone(&Local).format(&self.format)),
            ClockZone::Named(tz) => write!(text, "{}", now.with_timezone(&tz).format(&self.format)),
        };
        written.map_err(|_| anyhow!("clock: could not format time with {:?}", self.format))?;
        Ok(text)
    }
}

fn read_settings(config: &DisplayConfig) -> Result<(ClockZone, String)> {
    let zone = ClockZone::parse(config.setting_str("timezone").unwrap_or("UTC"))?;
    let format = config.setting_str("format").unwrap_or(DEFAULT_FORMAT).to_string();
    if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
        bail!("clock: invalid format string {:?}", format);
    }
    Ok((zone, format))
}

impl Renderer<AppContext> for ClockDisplayer {
    fn kind(&self) -> &str {
        "clock"
    }

    fn render(&mut self, context: &AppContext, _trigger: TriggerKind) -> Result<()> {
        let text = self.format_time(Utc::now())?;
        context.board.publish(&self.display_id, text);
        Ok(())
    }

    fn on_config_changed(&mut self, config: &DisplayConfig) -> Result<()> {
        let (zone, format) = read_settings(config)?;
        self.zone = zone;
        self.format = format;
        Ok(())
    }
}
