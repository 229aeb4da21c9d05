//! Sweep Scheduler
//!
//! Background task that periodically walks the cache store and reclaims
//! expired entries that would otherwise never be removed (lazy expiration
//! only hides them from readers; it never frees them).
//!
//! The scheduler is a single recurring task per cache instance. It cycles
//! between an armed timer (idle) and a sweep pass (sweeping), and becomes
//! terminal once aborted (stopped). Because the timer is only re-armed after
//! a pass completes, at most one pass is ever active and a pass that outlasts
//! the configured interval simply coalesces the next firing.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{current_timestamp_ms, CacheStore};

// == Sweep Scheduler ==
/// Handle to the recurring sweep task of one cache instance.
///
/// Changing the interval re-arms the timer without touching store state;
/// [`destroy`](SweepScheduler::destroy) cancels the task for good. Dropping
/// the handle also cancels the task.
#[derive(Debug)]
pub struct SweepScheduler {
    /// The spawned sweep task, used as the single cancellation point
    handle: JoinHandle<()>,
    /// Interval reconfiguration channel; the task observes updates
    interval_tx: watch::Sender<u64>,
}

impl SweepScheduler {
    // == Spawn ==
    /// Spawns the recurring sweep task for the given store.
    ///
    /// Must be called within a Tokio runtime.
    ///
    /// # Arguments
    /// * `cache` - Shared reference to the store being swept
    /// * `check_interval_secs` - Interval in seconds between sweep passes
    /// * `chunk_size` - Entries examined per batch before yielding
    pub fn spawn<V>(
        cache: Arc<RwLock<CacheStore<V>>>,
        check_interval_secs: u64,
        chunk_size: usize,
    ) -> Self
    where
        V: Send + Sync + 'static,
    {
        let (interval_tx, interval_rx) = watch::channel(check_interval_secs);
        let handle = tokio::spawn(run_sweep_loop(cache, interval_rx, chunk_size));

        Self {
            handle,
            interval_tx,
        }
    }

    // == Check Interval ==
    /// Returns the configured interval in seconds between sweep passes.
    pub fn check_interval(&self) -> u64 {
        *self.interval_tx.borrow()
    }

    /// Updates the sweep interval.
    ///
    /// The currently armed timer is cancelled and re-armed with the new
    /// interval; an in-flight pass is allowed to finish first.
    pub fn set_check_interval(&self, secs: u64) {
        // After destroy() the task no longer observes the channel; the send
        // result is irrelevant either way.
        let _ = self.interval_tx.send(secs);
    }

    // == Destroy ==
    /// Cancels the sweep task. Terminal and idempotent.
    ///
    /// No further passes occur after this returns; an in-flight pass stops at
    /// its next yield point.
    pub fn destroy(&self) {
        self.handle.abort();
    }

    /// Returns true once the sweep task has fully terminated.
    pub fn is_stopped(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for SweepScheduler {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// == Sweep Loop ==
/// Arms the timer, runs a pass when it fires, and re-arms, until aborted.
async fn run_sweep_loop<V>(
    cache: Arc<RwLock<CacheStore<V>>>,
    mut interval_rx: watch::Receiver<u64>,
    chunk_size: usize,
) where
    V: Send + Sync + 'static,
{
    info!(
        "Starting sweep task with interval of {} seconds",
        *interval_rx.borrow()
    );

    loop {
        let interval_secs = *interval_rx.borrow_and_update();

        tokio::select! {
            _ = tokio::time::sleep(jittered_delay(interval_secs)) => {
                let removed = sweep_pass(&cache, chunk_size).await;
                if removed > 0 {
                    info!("Sweep pass removed {} expired entries", removed);
                } else {
                    debug!("Sweep pass found no expired entries");
                }
            }
            changed = interval_rx.changed() => {
                if changed.is_err() {
                    // Scheduler handle is gone; nothing left to sweep for
                    break;
                }
                debug!(
                    "Sweep interval changed to {} seconds, rescheduling",
                    *interval_rx.borrow()
                );
            }
        }
    }
}

// == Sweep Pass ==
/// Walks a key snapshot in batches, retiring every expired entry.
///
/// The write lock is held per batch, not for the whole pass, and the task
/// yields between batches so sweeping a large store does not starve other
/// work on the runtime.
async fn sweep_pass<V>(cache: &Arc<RwLock<CacheStore<V>>>, chunk_size: usize) -> usize {
    let keys = cache.read().await.sweep_keys();

    let mut removed = 0;
    for batch in keys.chunks(chunk_size) {
        {
            let mut guard = cache.write().await;
            let now = current_timestamp_ms();
            for key in batch {
                if guard.remove_expired_step(key, now) {
                    removed += 1;
                }
            }
        }
        tokio::task::yield_now().await;
    }

    removed
}

// == Jitter ==
/// Adds up to 10% of the interval so multiple caches in one process do not
/// sweep in lockstep.
fn jittered_delay(interval_secs: u64) -> Duration {
    let base_ms = interval_secs * 1000;
    let jitter_ms = rand::rng().random_range(0..=base_ms / 10);
    Duration::from_millis(base_ms + jitter_ms)
}
