//! Built-in displayers
//!
//! Each displayer renders one view of the chat and session state as text and
//! publishes it to the board.

mod activity;
mod chat_tail;
mod clock;
mod session;

pub use activity::ActivityDisplayer;
pub use chat_tail::ChatTailDisplayer;
pub use clock::ClockDisplayer;
pub use session::SessionDisplayer;

use crate::app::AppContext;
use chatboard_core::RendererRegistry;

/// Register all built-in displayers
pub fn register_all(registry: &mut RendererRegistry<AppContext>) {
    registry.register("chat_tail", ChatTailDisplayer::factory);
    registry.register("activity", ActivityDisplayer::factory);
    registry.register("session", SessionDisplayer::factory);
    registry.register("clock", ClockDisplayer::factory);
}
