//! Display manager: owns every scheduled display and fans triggers out to them

use crate::scheduled_display::{NotifyOutcome, ScheduledDisplay};
use anyhow::{anyhow, Result};
use chatboard_types::{DisplayConfig, TriggerKind};
use log::{debug, info, warn};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

/// Tally of one broadcast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastSummary {
    pub rendered: usize,
    pub failed: usize,
    pub filtered: usize,
    pub no_context: usize,
}

impl BroadcastSummary {
    fn record(&mut self, outcome: NotifyOutcome) {
        match outcome {
            NotifyOutcome::Rendered => self.rendered += 1,
            NotifyOutcome::Failed => self.failed += 1,
            NotifyOutcome::Filtered => self.filtered += 1,
            NotifyOutcome::NoContext => self.no_context += 1,
        }
    }
}

/// Owns the scheduled displays of an application
///
/// Teardown is explicit: call `shutdown` before discarding the manager.
/// `Drop` only repeats it as a backstop.
pub struct DisplayManager<C: Send + Sync + 'static> {
    displays: RwLock<Vec<Arc<ScheduledDisplay<C>>>>,
}

impl<C: Send + Sync + 'static> DisplayManager<C> {
    /// Create an empty manager
    pub fn new() -> Self {
        Self {
            displays: RwLock::new(Vec::new()),
        }
    }

    /// Add a display. IDs must be unique.
    pub fn add(&self, display: Arc<ScheduledDisplay<C>>) -> Result<()> {
        let mut displays = self.write();
        if displays.iter().any(|d| d.id() == display.id()) {
            return Err(anyhow!("Duplicate display id: {}", display.id()));
        }
        debug!("Registered display {} ({})", display.id(), display.kind());
        displays.push(display);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Look up a display by ID
    pub fn get(&self, id: &str) -> Option<Arc<ScheduledDisplay<C>>> {
        self.read().iter().find(|d| d.id() == id).cloned()
    }

    /// IDs in registration order
    pub fn ids(&self) -> Vec<String> {
        self.read().iter().map(|d| d.id().to_string()).collect()
    }

    /// Start the timer of every timer-driven display.
    ///
    /// Returns the number of displays with an armed timer afterwards.
    pub fn start_timers(&self) -> Result<usize> {
        let mut armed = 0;
        for display in self.snapshot() {
            display
                .start_timer()
                .map_err(|e| anyhow!("Display {}: {}", display.id(), e))?;
            if display.is_timer_armed() {
                armed += 1;
            }
        }
        info!("Started {} display timer(s)", armed);
        Ok(armed)
    }

    /// Stop every display timer without waiting for in-flight firings
    pub fn stop_timers(&self) {
        for display in self.snapshot() {
            display.stop_timer();
        }
    }

    /// Notify every display of `trigger`, in registration order, on the
    /// calling thread
    pub fn broadcast(&self, trigger: TriggerKind) -> BroadcastSummary {
        let start = Instant::now();
        let mut summary = BroadcastSummary::default();

        // Notify outside the collection lock; render steps can be slow
        for display in self.snapshot() {
            summary.record(display.notify(trigger));
        }

        debug!(
            "Broadcast {:?}: {:?} in {:?}",
            trigger,
            summary,
            start.elapsed()
        );
        summary
    }

    /// Apply a configuration update to the display with the same ID.
    ///
    /// The display's hook runs first; an armed timer is then restarted so the
    /// new schedule takes effect (or stopped if the display no longer uses a
    /// timer).
    pub fn reconfigure(&self, config: &DisplayConfig) -> Result<()> {
        let display = self
            .get(&config.id)
            .ok_or_else(|| anyhow!("Unknown display: {}", config.id))?;

        let was_armed = display.is_timer_armed();
        display.on_config_changed(config)?;

        if was_armed {
            if display.is_timer_driven() {
                display
                    .start_timer()
                    .map_err(|e| anyhow!("Display {}: {}", display.id(), e))?;
            } else {
                display.stop_timer();
            }
        }
        info!("Reconfigured display {}", config.id);
        Ok(())
    }

    /// Remove a display, disposing of its timer
    pub fn remove(&self, id: &str) -> Option<Arc<ScheduledDisplay<C>>> {
        let removed = {
            let mut displays = self.write();
            let index = displays.iter().position(|d| d.id() == id)?;
            displays.remove(index)
        };
        removed.dispose();
        Some(removed)
    }

    /// Dispose of every display and empty the manager.
    ///
    /// Stops all timers and waits for their threads. Must not be called from
    /// a render step.
    pub fn shutdown(&self) {
        let displays = std::mem::take(&mut *self.write());
        if displays.is_empty() {
            return;
        }
        for display in &displays {
            display.dispose();
        }
        info!("Shut down {} display(s)", displays.len());
    }

    fn snapshot(&self) -> Vec<Arc<ScheduledDisplay<C>>> {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<ScheduledDisplay<C>>>> {
        self.displays.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<ScheduledDisplay<C>>>> {
        self.displays.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Send + Sync + 'static> Default for DisplayManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Send + Sync + 'static> Drop for DisplayManager<C> {
    fn drop(&mut self) {
        if !self.is_empty() {
            warn!("DisplayManager dropped without shutdown");
            self.shutdown();
        }
    }
}
