//! Shared slot holding the host application context
//!
//! Displays are built before the host context exists. The host fills the slot
//! once it is ready; until then every notification is skipped.

use arc_swap::ArcSwapOption;
use std::sync::Arc;

/// Cloneable handle to the (possibly absent) application context
pub struct ContextSlot<C> {
    inner: Arc<ArcSwapOption<C>>,
}

impl<C> ContextSlot<C> {
    /// Create an empty slot
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ArcSwapOption::empty()),
        }
    }

    /// Create a slot that already holds `context`
    pub fn with_context(context: Arc<C>) -> Self {
        let slot = Self::new();
        slot.set(context);
        slot
    }

    /// Supply the context
    pub fn set(&self, context: Arc<C>) {
        self.inner.store(Some(context));
    }

    /// Withdraw the context; later notifications are skipped
    pub fn clear(&self) {
        self.inner.store(None);
    }

    /// Current context, if supplied
    pub fn get(&self) -> Option<Arc<C>> {
        self.inner.load_full()
    }
}

impl<C> Clone for ContextSlot<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> Default for ContextSlot<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_context() {
        let slot: ContextSlot<String> = ContextSlot::new();
        let other = slot.clone();
        assert!(other.get().is_none());

        slot.set(Arc::new("host".to_string()));
        assert_eq!(other.get().as_deref().map(String::as_str), Some("host"));

        other.clear();
        assert!(slot.get().is_none());
    }
}
