//! Single-timer debounce helper
//!
//! A [`Debouncer`] is either idle or holds one pending timer. Every
//! [`Debouncer::trigger`] bumps a generation counter, aborts the previous timer
//! and starts a new one; on expiry the timer task runs its action only if its
//! generation is still the latest and the helper has not been disposed.
//!
//! The action runs on the runtime's worker, not on the owner thread. Callers
//! that need to touch owner state must hand off from inside the action (the
//! registry pushes onto a channel drained by `flush_deferred`).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{trace, warn};

/// Observable state of a [`Debouncer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// No timer pending
    Idle,
    /// A timer is pending and will fire at `deadline` unless superseded
    Pending {
        /// When the pending action is due
        deadline:   Instant,
        /// Generation of the pending timer
        generation: u64,
    },
}

#[derive(Debug, Default)]
struct Shared {
    generation: AtomicU64,
    fired:      AtomicU64,
    disposed:   AtomicBool,
}

/// Coalesces bursts of triggers into one delayed action
#[derive(Debug)]
pub struct Debouncer {
    runtime:  Handle,
    shared:   Arc<Shared>,
    deadline: Option<Instant>,
    timer:    Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Create an idle debouncer whose timers run on `runtime`
    #[must_use]
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            shared: Arc::new(Shared::default()),
            deadline: None,
            timer: None,
        }
    }

    /// Restart the quiet period and schedule `action` to run after `delay`
    ///
    /// Any previously scheduled action is cancelled and will never run.
    /// Triggering a disposed debouncer is ignored.
    pub fn trigger<F>(&mut self, action: F, delay: Duration)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.is_disposed() {
            warn!("Ignoring debounce trigger on a disposed debouncer");
            return;
        }

        let generation = self.shared.generation.fetch_add(1, Ordering::AcqRel) + 1;
        if let Some(previous) = self.timer.take() {
            previous.abort();
        }

        let deadline = Instant::now() + delay;
        self.deadline = Some(deadline);

        let shared = Arc::clone(&self.shared);
        self.timer = Some(self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;

            if shared.disposed.load(Ordering::Acquire)
                || shared.generation.load(Ordering::Acquire) != generation
            {
                trace!("Debounce generation {generation} superseded");
                return;
            }

            action();
            shared.fired.store(generation, Ordering::Release);
        }));
    }

    /// Current state of the timer
    #[must_use]
    pub fn state(&self) -> DebounceState {
        if self.is_disposed() {
            return DebounceState::Idle;
        }

        let generation = self.shared.generation.load(Ordering::Acquire);
        match self.deadline {
            Some(deadline) if self.shared.fired.load(Ordering::Acquire) != generation => {
                DebounceState::Pending {
                    deadline,
                    generation,
                }
            },
            _ => DebounceState::Idle,
        }
    }

    /// Cancel any pending timer; later triggers are ignored
    pub fn dispose(&mut self) {
        self.shared.disposed.store(true, Ordering::Release);
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.deadline = None;
    }

    /// Whether [`Debouncer::dispose`] has been called
    #[must_use]
    pub fn is_disposed(&self) -> bool { self.shared.disposed.load(Ordering::Acquire) }
}

impl Drop for Debouncer {
    fn drop(&mut self) { self.dispose(); }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    use super::*;

    const DELAY: Duration = Duration::from_millis(50);

    #[tokio::test(start_paused = true)]
    async fn test_rapid_triggers_fire_once_with_latest_action() {
        let mut debouncer = Debouncer::new(Handle::current());
        let calls = Arc::new(AtomicUsize::new(0));
        let fired_with = Arc::new(Mutex::new(None));
        let start = Instant::now();

        for (step, offset_ms) in [0_u64, 10, 20].into_iter().enumerate() {
            tokio::time::sleep_until(start + Duration::from_millis(offset_ms)).await;
            let calls = Arc::clone(&calls);
            let fired_with = Arc::clone(&fired_with);
            debouncer.trigger(
                move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    if let Ok(mut slot) = fired_with.lock() {
                        *slot = Some((step, Instant::now()));
                    }
                },
                DELAY,
            );
        }

        tokio::time::sleep_until(start + Duration::from_millis(69)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(matches!(
            debouncer.state(),
            DebounceState::Pending { generation: 3, .. }
        ));

        tokio::time::sleep_until(start + Duration::from_millis(71)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(debouncer.state(), DebounceState::Idle);

        let fired = fired_with.lock().ok().and_then(|slot| *slot);
        assert_eq!(
            fired.map(|(step, at)| (step, at.duration_since(start))),
            Some((2, Duration::from_millis(70)))
        );

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_cancels_pending_action() {
        let mut debouncer = Debouncer::new(Handle::current());
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        debouncer.trigger(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            DELAY,
        );
        debouncer.dispose();

        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(debouncer.state(), DebounceState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_after_dispose_is_ignored() {
        let mut debouncer = Debouncer::new(Handle::current());
        debouncer.dispose();

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        debouncer.trigger(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            DELAY,
        );

        tokio::time::sleep(DELAY * 2).await;
        assert!(debouncer.is_disposed());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_action() {
        let calls = Arc::new(AtomicUsize::new(0));
        {
            let mut debouncer = Debouncer::new(Handle::current());
            let counter = Arc::clone(&calls);
            debouncer.trigger(
                move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                },
                DELAY,
            );
        }

        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_fire_separately() {
        let mut debouncer = Debouncer::new(Handle::current());
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let counter = Arc::clone(&calls);
            debouncer.trigger(
                move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                },
                DELAY,
            );
            tokio::time::sleep(DELAY + Duration::from_millis(1)).await;
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
