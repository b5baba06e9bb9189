//! Scheduled display: trigger matching, timer lifecycle and render serialization
//!
//! A `ScheduledDisplay` decides *when* its renderer runs. Notifications arrive
//! from its own timer thread and from any number of external event sources;
//! the ones that match the enabled trigger bits run the renderer under the
//! display's update guard, so render steps of one display never overlap.
//!
//! Lock order is update guard -> timer slot. Timer start/stop only take the
//! timer slot, which is why a renderer may reconfigure its own timer.
//!
//! There is no render timeout: a renderer that never returns blocks every
//! later notification of its display.

use crate::context::ContextSlot;
use crate::renderer::BoxedRenderer;
use crate::timer::{TimerError, TimerHandle};
use anyhow::Result;
use chatboard_types::{DisplayConfig, ScheduleError, TimerSchedule, TriggerKind};
use log::{debug, error, trace, warn};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// What a call to `notify` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// No enabled trigger matched; nothing was locked
    Filtered,
    /// Trigger matched but the application context is not available yet
    NoContext,
    /// The render step ran and succeeded
    Rendered,
    /// The render step returned an error or panicked
    Failed,
}

/// Lock-free render counters for one display
#[derive(Debug, Default)]
struct RenderStats {
    rendered: AtomicU64,
    failed: AtomicU64,
    filtered: AtomicU64,
    skipped_no_context: AtomicU64,
}

/// Point-in-time copy of a display's render counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStatsSnapshot {
    pub rendered: u64,
    pub failed: u64,
    pub filtered: u64,
    pub skipped_no_context: u64,
}

struct TimerSlot {
    schedule: TimerSchedule,
    handle: Option<TimerHandle>,
}

/// A display whose render step is driven by triggers
pub struct ScheduledDisplay<C> {
    id: String,
    kind: String,
    /// `TriggerKind` bits, read without locking by `notify`
    enabled: AtomicU32,
    /// Holds `TIMER` in `enabled` iff `handle` is present
    timer: Mutex<TimerSlot>,
    /// Update guard; the renderer is only reachable through it
    renderer: Mutex<BoxedRenderer<C>>,
    context: ContextSlot<C>,
    stats: RenderStats,
}

impl<C: Send + Sync + 'static> ScheduledDisplay<C> {
    /// Create a dormant display (no triggers enabled, timer stopped)
    pub fn new(
        id: impl Into<String>,
        renderer: BoxedRenderer<C>,
        schedule: TimerSchedule,
        context: ContextSlot<C>,
    ) -> Arc<Self> {
        let kind = renderer.kind().to_string();
        Arc::new(Self {
            id: id.into(),
            kind,
            enabled: AtomicU32::new(TriggerKind::empty().bits()),
            timer: Mutex::new(TimerSlot {
                schedule,
                handle: None,
            }),
            renderer: Mutex::new(renderer),
            context,
            stats: RenderStats::default(),
        })
    }

    /// Create a display from its configuration with the configured event
    /// triggers enabled. The timer is left stopped.
    pub fn from_config(
        config: &DisplayConfig,
        renderer: BoxedRenderer<C>,
        context: ContextSlot<C>,
    ) -> Result<Arc<Self>, ScheduleError> {
        let display = Self::new(config.id.clone(), renderer, config.timer_schedule()?, context);
        display.enable_triggers(config.triggers);
        Ok(display)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Renderer kind this display was built with
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Currently enabled trigger bits
    pub fn enabled_triggers(&self) -> TriggerKind {
        TriggerKind::from_bits_truncate(self.enabled.load(Ordering::Acquire))
    }

    /// Enable event triggers. `TIMER` is ignored; it follows the timer lifecycle.
    pub fn enable_triggers(&self, kinds: TriggerKind) {
        let kinds = kinds - TriggerKind::TIMER;
        self.enabled.fetch_or(kinds.bits(), Ordering::AcqRel);
    }

    /// Replace the event triggers, keeping the `TIMER` bit as it is
    pub fn set_event_triggers(&self, kinds: TriggerKind) {
        let kinds = (kinds - TriggerKind::TIMER).bits();
        let timer_bit = TriggerKind::TIMER.bits();
        let _ = self
            .enabled
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                Some((bits & timer_bit) | kinds)
            });
    }

    /// Schedule the next `start_timer` will use
    pub fn timer_schedule(&self) -> TimerSchedule {
        self.lock_timer().schedule
    }

    /// True when this display is configured to use a timer at all
    pub fn is_timer_driven(&self) -> bool {
        !self.timer_schedule().is_unused()
    }

    /// True while this display owns a timer
    pub fn is_timer_armed(&self) -> bool {
        self.lock_timer().handle.is_some()
    }

    /// Arm the recurring timer.
    ///
    /// Does nothing for displays without a timer schedule. A running timer is
    /// cancelled before the new one is spawned, so at most one timer is live.
    pub fn start_timer(self: &Arc<Self>) -> Result<(), TimerError> {
        let mut slot = self.lock_timer();
        if slot.schedule.is_unused() {
            return Ok(());
        }
        if let Some(old) = slot.handle.take() {
            debug!("Display {}: restarting timer", self.id);
            old.stop();
        }

        self.enabled
            .fetch_or(TriggerKind::TIMER.bits(), Ordering::AcqRel);

        // The timer thread must not keep the display alive
        let display = Arc::downgrade(self);
        let spawned = TimerHandle::spawn(format!("timer-{}", self.id), slot.schedule, move || {
            match display.upgrade() {
                Some(display) => {
                    display.notify(TriggerKind::TIMER);
                    true
                }
                None => false,
            }
        });

        match spawned {
            Ok(handle) => {
                slot.handle = Some(handle);
                debug!("Display {}: timer started ({:?})", self.id, slot.schedule);
                Ok(())
            }
            Err(e) => {
                self.enabled
                    .fetch_and(!TriggerKind::TIMER.bits(), Ordering::AcqRel);
                warn!("Display {}: could not start timer: {}", self.id, e);
                Err(e)
            }
        }
    }

    /// Disarm the timer and clear the `TIMER` bit.
    ///
    /// Safe when no timer is armed and from inside a render step. Does not
    /// wait for a firing already in progress.
    pub fn stop_timer(&self) {
        let mut slot = self.lock_timer();
        if slot.schedule.is_unused() && slot.handle.is_none() {
            return;
        }
        if let Some(handle) = slot.handle.take() {
            handle.stop();
            debug!("Display {}: timer stopped", self.id);
        }
        self.enabled
            .fetch_and(!TriggerKind::TIMER.bits(), Ordering::AcqRel);
    }

    /// Deliver a trigger notification.
    ///
    /// Returns without locking when `trigger` shares no bits with the enabled
    /// triggers, and without rendering when the context is not supplied.
    /// Otherwise blocks on the update guard and runs the render step with the
    /// matched bits.
    pub fn notify(&self, trigger: TriggerKind) -> NotifyOutcome {
        let matched = self.enabled_triggers() & trigger;
        if matched.is_empty() {
            self.stats.filtered.fetch_add(1, Ordering::Relaxed);
            trace!("Display {}: {:?} filtered", self.id, trigger);
            return NotifyOutcome::Filtered;
        }

        let Some(context) = self.context.get() else {
            self.stats.skipped_no_context.fetch_add(1, Ordering::Relaxed);
            trace!("Display {}: no context for {:?}", self.id, matched);
            return NotifyOutcome::NoContext;
        };

        let mut renderer = self.lock_renderer();
        let result = panic::catch_unwind(AssertUnwindSafe(|| renderer.render(&context, matched)));
        drop(renderer);

        match result {
            Ok(Ok(())) => {
                self.stats.rendered.fetch_add(1, Ordering::Relaxed);
                NotifyOutcome::Rendered
            }
            Ok(Err(e)) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                warn!("Display {}: render on {:?} failed: {:#}", self.id, matched, e);
                NotifyOutcome::Failed
            }
            Err(payload) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                error!(
                    "Display {}: renderer panicked on {:?}: {}",
                    self.id,
                    matched,
                    panic_message(&*payload)
                );
                NotifyOutcome::Failed
            }
        }
    }

    /// Apply a configuration update.
    ///
    /// Runs the renderer's hook under the update guard, then stores the new
    /// schedule and event triggers. A running timer keeps its old schedule
    /// until the caller restarts it. Must not be called from a render step.
    pub fn on_config_changed(&self, config: &DisplayConfig) -> Result<()> {
        let schedule = config.timer_schedule()?;
        self.lock_renderer().on_config_changed(config)?;
        self.lock_timer().schedule = schedule;
        self.set_event_triggers(config.triggers);
        debug!("Display {}: configuration updated", self.id);
        Ok(())
    }

    /// Stop the timer and wait for its thread to exit.
    ///
    /// Deterministic teardown for the owning container. Waits for a timer
    /// firing that is currently rendering, so it must not be called from a
    /// render step of another display that this one may be waiting on.
    pub fn dispose(&self) {
        let handle = {
            let mut slot = self.lock_timer();
            self.enabled
                .fetch_and(!TriggerKind::TIMER.bits(), Ordering::AcqRel);
            slot.handle.take()
        };
        if let Some(handle) = handle {
            handle.shutdown();
            debug!("Display {}: disposed", self.id);
        }
    }

    pub fn stats(&self) -> RenderStatsSnapshot {
        RenderStatsSnapshot {
            rendered: self.stats.rendered.load(Ordering::Relaxed),
            failed: self.stats.failed.load(Ordering::Relaxed),
            filtered: self.stats.filtered.load(Ordering::Relaxed),
            skipped_no_context: self.stats.skipped_no_context.load(Ordering::Relaxed),
        }
    }

    fn lock_timer(&self) -> MutexGuard<'_, TimerSlot> {
        self.timer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_renderer(&self) -> MutexGuard<'_, BoxedRenderer<C>> {
        self.renderer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
