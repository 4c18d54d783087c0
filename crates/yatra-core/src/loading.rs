//! Cosmetic loading progress.
//!
//! The indicator is a timer-driven illusion keyed off navigation: it knows
//! nothing about real request progress. Each start or completion opens a new
//! generation; a scheduled step applies only while its generation is
//! current, so steps queued before a completion can never show after it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep, sleep_until};
use tracing::trace;

/// Jumps scheduled by [`LoadingIndicator::start_loading`], as offsets from
/// the start and the progress they set.
pub const STEPS: [(Duration, u8); 5] = [
    (Duration::from_millis(100), 20),
    (Duration::from_millis(300), 40),
    (Duration::from_millis(600), 60),
    (Duration::from_millis(1000), 75),
    (Duration::from_millis(1500), 85),
];

/// How long progress rests at 100 before resetting to 0.
pub const RESET_DELAY: Duration = Duration::from_millis(400);

/// Simulated progress bar state (0-100).
///
/// Must be used from within a tokio runtime; timers are spawned as tasks and
/// aborted on the next start, on completion and on drop.
///
/// # Example
///
/// ```
/// use yatra_core::LoadingIndicator;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let loading = LoadingIndicator::new();
/// loading.start_loading();
/// assert_eq!(loading.progress(), 0);
/// loading.complete_loading();
/// assert_eq!(loading.progress(), 100);
/// # }
/// ```
#[derive(Debug)]
pub struct LoadingIndicator {
    shared: Arc<Shared>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

#[derive(Debug)]
struct Shared {
    generation: AtomicU64,
    progress: watch::Sender<u8>,
}

impl Shared {
    /// Open a new generation and set progress, atomically with respect to
    /// [`apply`](Self::apply).
    fn advance(&self, value: u8) -> u64 {
        let mut generation = 0;
        self.progress.send_modify(|p| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *p = value;
        });
        generation
    }

    /// Set progress if `generation` is still current. Returns whether it
    /// applied.
    fn apply(&self, generation: u64, value: u8) -> bool {
        self.progress.send_if_modified(|p| {
            if self.generation.load(Ordering::SeqCst) != generation {
                trace!(generation, value, "Dropping stale progress step");
                return false;
            }
            *p = value;
            true
        })
    }
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingIndicator {
    pub fn new() -> Self {
        let (progress, _) = watch::channel(0);
        Self {
            shared: Arc::new(Shared {
                generation: AtomicU64::new(0),
                progress,
            }),
            pending: Mutex::new(None),
        }
    }

    /// Current progress percentage.
    pub fn progress(&self) -> u8 {
        *self.shared.progress.borrow()
    }

    /// The current generation; bumped by every start and completion.
    pub fn generation(&self) -> u64 {
        self.shared.generation.load(Ordering::SeqCst)
    }

    /// Watch progress changes, e.g. to render a bar.
    pub fn subscribe(&self) -> watch::Receiver<u8> {
        self.shared.progress.subscribe()
    }

    /// Reset to 0 and schedule the fixed sequence of jumps.
    pub fn start_loading(&self) {
        self.cancel_pending();
        let generation = self.shared.advance(0);
        let shared = Arc::clone(&self.shared);
        let started = Instant::now();

        let task = tokio::spawn(async move {
            for (offset, value) in STEPS {
                sleep_until(started + offset).await;
                if !shared.apply(generation, value) {
                    return;
                }
            }
        });

        self.set_pending(task);
    }

    /// Cancel pending jumps, jump to 100, then reset to 0 after
    /// [`RESET_DELAY`].
    pub fn complete_loading(&self) {
        self.cancel_pending();
        let generation = self.shared.advance(100);
        let shared = Arc::clone(&self.shared);

        let task = tokio::spawn(async move {
            sleep(RESET_DELAY).await;
            shared.apply(generation, 0);
        });

        self.set_pending(task);
    }

    fn cancel_pending(&self) {
        if let Some(task) = self.lock_pending().take() {
            task.abort();
        }
    }

    fn set_pending(&self, task: JoinHandle<()>) {
        if let Some(previous) = self.lock_pending().replace(task) {
            previous.abort();
        }
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for LoadingIndicator {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERMEDIATE: [u8; 5] = [20, 40, 60, 75, 85];

    #[tokio::test(start_paused = true)]
    async fn start_schedules_monotonic_jumps() {
        let loading = LoadingIndicator::new();
        let started = Instant::now();
        loading.start_loading();
        assert_eq!(loading.progress(), 0);

        let mut last = 0;
        for (offset, value) in STEPS {
            sleep_until(started + offset - Duration::from_millis(1)).await;
            assert_eq!(loading.progress(), last);
            sleep_until(started + offset + Duration::from_millis(1)).await;
            assert_eq!(loading.progress(), value);
            assert!(value > last);
            last = value;
        }

        sleep(Duration::from_secs(10)).await;
        assert_eq!(loading.progress(), 85);
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_completion_shows_no_intermediate_steps() {
        let loading = LoadingIndicator::new();
        let mut rx = loading.subscribe();

        loading.start_loading();
        loading.complete_loading();
        assert_eq!(loading.progress(), 100);
        let _ = rx.borrow_and_update();

        let mut seen = Vec::new();
        let watcher = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                seen.push(*rx.borrow_and_update());
            }
            seen
        });

        sleep(RESET_DELAY - Duration::from_millis(1)).await;
        assert_eq!(loading.progress(), 100);
        sleep(Duration::from_millis(2)).await;
        assert_eq!(loading.progress(), 0);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(loading.progress(), 0);

        drop(loading);
        let seen = watcher.await.unwrap();
        assert_eq!(seen, vec![0]);
        assert!(seen.iter().all(|v| !INTERMEDIATE.contains(v)));
    }

    #[tokio::test(start_paused = true)]
    async fn completion_mid_sequence_cancels_remaining_steps() {
        let loading = LoadingIndicator::new();
        loading.start_loading();

        sleep(Duration::from_millis(350)).await;
        assert_eq!(loading.progress(), 40);

        loading.complete_loading();
        assert_eq!(loading.progress(), 100);

        sleep(Duration::from_millis(300)).await;
        assert_eq!(loading.progress(), 100);

        sleep(Duration::from_millis(200)).await;
        assert_eq!(loading.progress(), 0);

        sleep(Duration::from_secs(2)).await;
        assert_eq!(loading.progress(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_discards_previous_cycle() {
        let loading = LoadingIndicator::new();
        loading.start_loading();
        sleep(Duration::from_millis(650)).await;
        assert_eq!(loading.progress(), 60);

        loading.start_loading();
        assert_eq!(loading.progress(), 0);

        sleep(Duration::from_millis(99)).await;
        assert_eq!(loading.progress(), 0);
        sleep(Duration::from_millis(2)).await;
        assert_eq!(loading.progress(), 20);

        // The first cycle's 75 would have landed here.
        sleep(Duration::from_millis(400)).await;
        assert_eq!(loading.progress(), 40);
    }

    #[tokio::test(start_paused = true)]
    async fn start_after_complete_cancels_pending_reset() {
        let loading = LoadingIndicator::new();
        loading.start_loading();
        loading.complete_loading();
        loading.start_loading();

        sleep(Duration::from_millis(450)).await;
        // The reset to 0 from the completion must not clobber the new cycle.
        assert_eq!(loading.progress(), 40);
    }

    #[test]
    fn stale_generation_is_dropped() {
        let loading = LoadingIndicator::new();
        let old = loading.shared.advance(0);
        let current = loading.shared.advance(100);
        assert!(current > old);

        assert!(!loading.shared.apply(old, 20));
        assert_eq!(loading.progress(), 100);
        assert!(loading.shared.apply(current, 0));
        assert_eq!(loading.progress(), 0);
        assert_eq!(loading.generation(), current);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_timers() {
        let loading = LoadingIndicator::new();
        let rx = loading.subscribe();
        loading.start_loading();
        drop(loading);

        sleep(Duration::from_secs(2)).await;
        assert_eq!(*rx.borrow(), 0);
    }
}
