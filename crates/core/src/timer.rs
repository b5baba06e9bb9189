//! Owned timer thread backing a display's `TIMER` trigger
//!
//! Each armed display owns exactly one `TimerHandle`. The thread sleeps on a
//! stop channel until the next deadline, so cancelling it wakes it at once.

use chatboard_types::TimerSchedule;
use crossbeam::channel::{bounded, RecvTimeoutError, Sender};
use log::{debug, error, trace};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use thiserror::Error;

/// Errors raised while arming a timer
#[derive(Debug, Error)]
pub enum TimerError {
    #[error("failed to spawn timer thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Handle to a running timer thread
pub struct TimerHandle {
    name: String,
    cancelled: Arc<AtomicBool>,
    /// Dropping the sender disconnects the channel and wakes the thread
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl TimerHandle {
    /// Spawn a timer thread that calls `on_fire` according to `schedule`.
    ///
    /// `on_fire` returns `false` when its target is gone, which ends the thread.
    /// A schedule without an interval fires once.
    pub fn spawn<F>(name: String, schedule: TimerSchedule, mut on_fire: F) -> Result<Self, TimerError>
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let cancelled = Arc::new(AtomicBool::new(false));
        let thread_cancelled = Arc::clone(&cancelled);
        let thread_name = name.clone();

        let thread = thread::Builder::new().name(name.clone()).spawn(move || {
            debug!("Timer {} armed ({:?})", thread_name, schedule);
            let mut deadline = Instant::now() + schedule.start_delay;

            loop {
                match stop_rx.recv_deadline(deadline) {
                    Err(RecvTimeoutError::Timeout) => {}
                    // Explicit stop or handle dropped
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
                if thread_cancelled.load(Ordering::Acquire) {
                    break;
                }

                trace!("Timer {} fired", thread_name);
                if !on_fire() {
                    debug!("Timer {} target dropped", thread_name);
                    break;
                }

                let Some(interval) = schedule.interval else {
                    break;
                };
                deadline += interval;
                // Skip ticks missed while a slow render step held us up
                let now = Instant::now();
                while deadline <= now {
                    deadline += interval;
                }
            }
            debug!("Timer {} thread exiting", thread_name);
        })?;

        Ok(Self {
            name,
            cancelled,
            stop_tx: Some(stop_tx),
            thread: Some(thread),
        })
    }

    /// True while the timer thread has not exited
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        self.stop_tx.take();
    }

    /// Cancel the timer without waiting for the thread.
    ///
    /// No new firing starts after this returns; one that already passed its
    /// cancellation check finishes. Never blocks, so it is safe from inside a
    /// render step, including one running on this timer's own thread.
    pub fn stop(mut self) {
        self.cancel();
        self.thread.take();
    }

    /// Cancel the timer and wait for its thread to exit.
    ///
    /// Waits for an in-flight firing to finish. Called from the timer thread
    /// itself it degrades to `stop`.
    pub fn shutdown(mut self) {
        self.cancel();
        if let Some(handle) = self.thread.take() {
            if handle.thread().id() == thread::current().id() {
                return;
            }
            if let Err(e) = handle.join() {
                error!("Timer thread {} panicked: {:?}", self.name, e);
            }
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
