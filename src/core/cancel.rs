//! Cooperative cancellation with a wakeable bounded sleep.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Condvar, Mutex};

/// Cancellation signal shared between the event loop and whoever shuts it
/// down.
///
/// The token carries the loop's exit flag and doubles as its sleep primitive:
/// [`Scheduler::run_loop`](crate::core::Scheduler::run_loop) parks on the
/// token's condvar for its bounded sleeps, so a [`cancel`](Self::cancel) from
/// any context wakes the loop immediately instead of letting it ride out the
/// full sleep ceiling. Clones share the same underlying flag.
///
/// Cancellation is advisory: an in-progress idle slice or dispatch always
/// runs to completion, and the documented worst-case exit latency remains one
/// idle slice plus the sleep ceiling.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    requested: AtomicBool,
    lock: Mutex<()>,
    wake: Condvar,
}

impl CancelToken {
    /// Fresh token with no cancellation requested.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation and wake any sleeper sharing this token.
    pub fn cancel(&self) {
        self.inner.requested.store(true, Ordering::Release);
        // Hold the lock across the notify so a sleeper cannot check the flag,
        // miss the store, and then park past the wake.
        let _guard = self.inner.lock.lock();
        self.inner.wake.notify_all();
    }

    /// Whether cancellation has been requested and not yet acknowledged.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.requested.load(Ordering::Acquire)
    }

    /// Re-arm the token once the loop has actually returned, so the same
    /// scheduler instance can be restarted.
    pub(crate) fn clear(&self) {
        self.inner.requested.store(false, Ordering::Release);
    }

    /// Block the calling context until `deadline` or until cancelled,
    /// whichever comes first.
    pub(crate) fn sleep_until(&self, deadline: Instant) {
        let mut guard = self.inner.lock.lock();
        while !self.is_cancelled() {
            if self.inner.wake.wait_until(&mut guard, deadline).timed_out() {
                break;
            }
        }
    }
}
