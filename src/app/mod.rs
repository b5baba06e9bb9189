//! Host application: context, session, rendered board and the event handling
//! that turns input lines into trigger broadcasts

mod board;
mod commands;
mod context;
mod session;

pub use board::{BoardEntry, DisplayBoard};
pub use commands::{parse_command, Command};
pub use context::AppContext;
pub use session::{Session, SessionState};

use crate::config::AppConfig;
use anyhow::Result;
use chatboard_core::{BroadcastSummary, ContextSlot, DisplayManager, RendererRegistry, TriggerKind};
use chatboard_sources::InMemoryMessageLog;
use chatboard_types::Message;
use log::{debug, info};
use std::ops::ControlFlow;
use std::sync::Arc;

/// Sender name used for chat lines typed while nobody is logged in
const ANONYMOUS: &str = "anonymous";

/// Owns the displays and the application context
pub struct Host {
    manager: DisplayManager<AppContext>,
    slot: ContextSlot<AppContext>,
    app: Arc<AppContext>,
}

impl Host {
    /// Build every configured display. The context is not supplied until `start`.
    pub fn new(
        config: &AppConfig,
        registry: &RendererRegistry<AppContext>,
        messages: Arc<InMemoryMessageLog>,
    ) -> Result<Self> {
        let slot = ContextSlot::new();
        let manager = DisplayManager::new();
        for display_config in config.effective_displays() {
            let display = registry.build_display(&display_config, &slot)?;
            manager.add(display)?;
        }
        info!("Built {} display(s)", manager.len());

        Ok(Self {
            manager,
            slot,
            app: Arc::new(AppContext::new(messages)),
        })
    }

    /// Supply the context, arm timers and announce startup
    pub fn start(&self) -> Result<BroadcastSummary> {
        self.slot.set(Arc::clone(&self.app));
        self.manager.start_timers()?;
        Ok(self.manager.broadcast(TriggerKind::STARTUP))
    }

    /// Apply one command. `Break` means the loop should exit.
    pub fn handle(&self, command: Command) -> ControlFlow<()> {
        let trigger = match command {
            Command::Quit => return ControlFlow::Break(()),
            Command::Login(user) => {
                info!("{} logged in", user);
                self.app.session.login(user);
                TriggerKind::LOGIN
            }
            Command::Logout => {
                match self.app.session.logout() {
                    Some(session) => info!("{} logged out", session.user),
                    None => debug!("Logout without a session"),
                }
                TriggerKind::LOGOUT
            }
            Command::Refresh(trigger) => trigger,
            Command::Chat { sender, text } => {
                let sender = sender
                    .or_else(|| self.app.session.user())
                    .unwrap_or_else(|| ANONYMOUS.to_string());
                self.app.messages.push(Message::now(sender, text));
                TriggerKind::CHAT
            }
        };
        self.manager.broadcast(trigger);
        ControlFlow::Continue(())
    }

    pub fn app(&self) -> &Arc<AppContext> {
        &self.app
    }

    pub fn manager(&self) -> &DisplayManager<AppContext> {
        &self.manager
    }

    /// Dispose of every display, then withdraw the context
    pub fn shutdown(&self) {
        self.manager.shutdown();
        self.slot.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::displayers;
    use chatboard_types::DisplayConfig;

    fn host(displays: Vec<DisplayConfig>) -> Host {
        let mut registry = RendererRegistry::new();
        displayers::register_all(&mut registry);
        let config = AppConfig {
            displays,
            ..AppConfig::default()
        };
        Host::new(&config, &registry, Arc::new(InMemoryMessageLog::new())).unwrap()
    }

    fn tail_config() -> DisplayConfig {
        DisplayConfig {
            id: "tail".to_string(),
            ..DisplayConfig::new("chat_tail")
                .with_triggers(TriggerKind::STARTUP | TriggerKind::CHAT)
        }
    }

    fn session_config() -> DisplayConfig {
        DisplayConfig {
            id: "session".to_string(),
            ..DisplayConfig::new("session")
                .with_triggers(TriggerKind::LOGIN | TriggerKind::LOGOUT)
        }
    }

    #[test]
    fn test_nothing_renders_before_start() {
        let host = host(vec![tail_config()]);
        let summary = host.manager().broadcast(TriggerKind::STARTUP);
        assert_eq!(summary.no_context, 1);
        assert!(host.app().board.get("tail").is_none());
        host.shutdown();
    }

    #[test]
    fn test_chat_and_login_flow() {
        let host = host(vec![tail_config(), session_config()]);
        let summary = host.start().unwrap();
        assert_eq!(summary.rendered, 1);
        assert_eq!(summary.filtered, 1);

        let flow = host.handle(Command::Login("ana".to_string()));
        assert_eq!(flow, ControlFlow::Continue(()));
        let session_text = host.app().board.get("session").unwrap().text;
        assert!(session_text.contains("ana"), "{}", session_text);

        host.handle(Command::Chat {
            sender: None,
            text: "gl hf".to_string(),
        });
        let tail = host.app().board.get("tail").unwrap().text;
        assert!(tail.contains("ana: gl hf"), "{}", tail);

        host.handle(Command::Logout);
        host.handle(Command::Chat {
            sender: None,
            text: "anyone?".to_string(),
        });
        let tail = host.app().board.get("tail").unwrap().text;
        assert!(tail.contains("anonymous: anyone?"), "{}", tail);
        assert_eq!(
            host.app().board.get("session").unwrap().text,
            "not logged in"
        );

        assert_eq!(host.handle(Command::Quit), ControlFlow::Break(()));
        host.shutdown();
        assert!(host.manager().is_empty());
    }

    #[test]
    fn test_refresh_broadcasts_named_trigger() {
        let host = host(vec![session_config()]);
        host.start().unwrap();
        assert!(host.app().board.get("session").is_none());

        host.handle(Command::Refresh(TriggerKind::LOGOUT));
        assert!(host.app().board.get("session").is_some());
        host.shutdown();
    }
}
