//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::cache::SharedCache;

/// How often the task wakes up to check the stop flag between sweeps.
const TICK: Duration = Duration::from_millis(50);

// == Cleanup Handle ==
/// Handle to a running cleanup task.
///
/// Dropping the handle without calling [`stop`](CleanupHandle::stop) leaves
/// the task running for the process lifetime, which is the normal mode for
/// a process-wide cache.
#[derive(Debug)]
pub struct CleanupHandle {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl CleanupHandle {
    /// Signals the task to stop and waits for it to finish.
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Returns true if the task thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map(JoinHandle::is_finished)
            .unwrap_or(true)
    }
}

// == Spawn ==
/// Spawns a background thread that periodically sweeps expired cache entries.
///
/// The thread sleeps in short ticks so a stop request is honored promptly
/// even with long cleanup intervals. Each sweep locks the shared store for
/// the duration of `cleanup_expired()` only.
///
/// # Arguments
/// * `cache` - Shared handle to the cache store
/// * `interval` - Time between cleanup sweeps
pub fn spawn_cleanup_task<V>(cache: SharedCache<V>, interval: Duration) -> CleanupHandle
where
    V: Clone + Send + 'static,
{
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);

    let handle = thread::spawn(move || {
        info!("starting TTL cleanup task with interval {:?}", interval);

        let mut next_run = Instant::now() + interval;
        while !stop_flag.load(Ordering::Relaxed) {
            thread::sleep(TICK.min(interval));
            if Instant::now() < next_run {
                continue;
            }
            next_run = Instant::now() + interval;

            let removed = cache.lock().cleanup_expired();
            if removed > 0 {
                info!("TTL cleanup removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }

        debug!("TTL cleanup task stopped");
    });

    CleanupHandle {
        stop,
        handle: Some(handle),
    }
}
