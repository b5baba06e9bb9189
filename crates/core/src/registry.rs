//! Registry of renderer kinds

use crate::context::ContextSlot;
use crate::renderer::BoxedRenderer;
use crate::scheduled_display::ScheduledDisplay;
use anyhow::{anyhow, Result};
use chatboard_types::DisplayConfig;
use std::collections::HashMap;
use std::sync::Arc;

/// Function that creates a renderer from its display configuration
pub type RendererFactory<C> = fn(&DisplayConfig) -> Result<BoxedRenderer<C>>;

/// Registry for renderer kinds
///
/// Owned by the host application and passed where displays are built.
pub struct RendererRegistry<C> {
    factories: HashMap<String, RendererFactory<C>>,
}

impl<C: Send + Sync + 'static> RendererRegistry<C> {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a renderer kind
    pub fn register(&mut self, kind: &str, factory: RendererFactory<C>) {
        self.factories.insert(kind.to_string(), factory);
    }

    /// Create a renderer for `config.kind`
    pub fn create_renderer(&self, config: &DisplayConfig) -> Result<BoxedRenderer<C>> {
        let factory = self
            .factories
            .get(&config.kind)
            .ok_or_else(|| anyhow!("Unknown display kind: {}", config.kind))?;
        factory(config)
    }

    /// Build a scheduled display for `config`, sharing `context`
    pub fn build_display(
        &self,
        config: &DisplayConfig,
        context: &ContextSlot<C>,
    ) -> Result<Arc<ScheduledDisplay<C>>> {
        let renderer = self.create_renderer(config)?;
        let display = ScheduledDisplay::from_config(config, renderer, context.clone())
            .map_err(|e| anyhow!("Display {}: {}", config.id, e))?;
        Ok(display)
    }

    /// List all registered kinds, sorted
    pub fn list_kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self.factories.keys().cloned().collect();
        kinds.sort();
        kinds
    }
}

impl<C: Send + Sync + 'static> Default for RendererRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
