//! chatboard-sources: Chat message sources consumed by chatboard renderers.

mod memory;
mod message_source;

pub use memory::InMemoryMessageLog;
pub use message_source::MessageSource;
