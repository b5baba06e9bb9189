//! chatboard-core: Triggered-update scheduler for chatboard displays.
//!
//! This crate decides *when* a display's renderer runs (timer ticks, startup,
//! login and other events) and guarantees that render steps of one display
//! never run concurrently. It contains the `Renderer` trait, the
//! `ScheduledDisplay` unit, its owned timer thread, and the `DisplayManager`
//! and `RendererRegistry` used by the host application.

mod context;
mod manager;
mod registry;
mod renderer;
mod scheduled_display;
mod timer;

pub use context::ContextSlot;
pub use manager::{BroadcastSummary, DisplayManager};
pub use registry::{RendererFactory, RendererRegistry};
pub use renderer::{BoxedRenderer, Renderer};
pub use scheduled_display::{NotifyOutcome, RenderStatsSnapshot, ScheduledDisplay};
pub use timer::{TimerError, TimerHandle};

// Re-export types used in public signatures for convenience
pub use chatboard_types::{DisplayConfig, ScheduleError, TimerSchedule, TriggerKind};
