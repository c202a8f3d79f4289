//! The exclusivity resource held while sampling is active.
//!
//! While a session runs, the process must not be suspended out from under
//! the sampling loop. Platform integrations provide their own [`WakeLock`]
//! (a systemd inhibitor, a power-management API); the default implementation
//! only tracks held state so the lifecycle contract stays observable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Result;

/// Hard upper bound on how long one session may hold the lock, as a safety
/// net against a stop that never comes.
pub const MAX_WAKE_HOLD: Duration = Duration::from_secs(5 * 60 * 60);

pub trait WakeLock: Send + Sync {
    /// Acquires the lock for at most `max_hold`.
    fn acquire(&self, max_hold: Duration) -> Result<()>;

    /// Releases the lock. Releasing an unheld lock is a no-op.
    fn release(&self);

    fn is_held(&self) -> bool;
}

#[derive(Default)]
pub struct NoopWakeLock {
    held: AtomicBool,
}

impl NoopWakeLock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WakeLock for NoopWakeLock {
    fn acquire(&self, _max_hold: Duration) -> Result<()> {
        self.held.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn release(&self) {
        self.held.store(false, Ordering::SeqCst);
    }

    fn is_held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_held_state() {
        let lock = NoopWakeLock::new();
        assert!(!lock.is_held());
        lock.acquire(MAX_WAKE_HOLD).unwrap();
        assert!(lock.is_held());
        lock.release();
        assert!(!lock.is_held());
    }

    #[test]
    fn releasing_unheld_lock_is_a_noop() {
        let lock = NoopWakeLock::new();
        lock.release();
        assert!(!lock.is_held());
    }
}
