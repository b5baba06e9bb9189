//! chatboard-types: Shared data types for chatboard.
//!
//! Pure value types (trigger flags, timer schedules, messages, display
//! configuration) shared by the scheduler, the message sources and the host
//! application. Nothing in here spawns threads or takes locks.

pub mod display;
pub mod message;
pub mod schedule;
pub mod trigger;

pub use display::DisplayConfig;
pub use message::Message;
pub use schedule::{ScheduleError, TimerSchedule};
pub use trigger::{parse_trigger_name, TriggerKind};
