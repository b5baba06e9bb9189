//! chatboard: scheduled text displays driven by chat and session events
//!
//! This library provides:
//! - The host application context and its event handling
//! - Built-in displayers for chat, activity, session and clock views
//! - Configuration management

pub mod app;
pub mod config;
pub mod displayers;

// Re-export commonly used types
pub use app::{AppContext, Command, Host};
pub use config::AppConfig;
pub use chatboard_core::{DisplayManager, RendererRegistry, ScheduledDisplay, TriggerKind};
