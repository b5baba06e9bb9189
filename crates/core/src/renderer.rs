//! Renderer trait implemented by every display kind

use anyhow::Result;
use chatboard_types::{DisplayConfig, TriggerKind};

/// Trait for all renderers
///
/// A renderer (re)computes one display's content from the application
/// context. The scheduler guarantees that `render` is never entered twice at
/// once for the same display; it does not interpret failures beyond logging
/// and counting them.
pub trait Renderer<C>: Send {
    /// Kind identifier (e.g., "chat_tail")
    fn kind(&self) -> &str;

    /// Produce or update the display's content.
    ///
    /// `trigger` holds the bits of the incoming notification that this
    /// display has enabled.
    fn render(&mut self, context: &C, trigger: TriggerKind) -> Result<()>;

    /// React to a configuration update
    ///
    /// Called under the display's update guard. Must not call back into the
    /// same display's `notify` or `on_config_changed`.
    fn on_config_changed(&mut self, _config: &DisplayConfig) -> Result<()> {
        Ok(())
    }
}

/// Type-erased renderer for dynamic dispatch
pub type BoxedRenderer<C> = Box<dyn Renderer<C>>;
