//! Request rate limiter
//!
//! Trailing-edge throttle for autocomplete traffic: at most one call fires
//! per interval window, and when several calls pile up inside a window only
//! the most recently issued one survives. Each call receives a monotonically
//! increasing ticket; a ticket that is no longer the newest — whether still
//! waiting or already resolved — is discarded, so stale responses never
//! overwrite fresher ones.

use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

/// Proof that a throttled call fired. Compare against the throttle with
/// [`Throttle::is_current`] before applying the call's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Inner {
    /// When the last admitted call fired
    last_fired: Option<Instant>,
    /// Newest ticket handed out; older tickets are superseded
    newest: u64,
}

/// Trailing-edge rate limiter
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    inner: Mutex<Inner>,
}

impl Throttle {
    /// Create a throttle with the given minimum interval between calls
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            inner: Mutex::new(Inner {
                last_fired: None,
                newest: 0,
            }),
        }
    }

    /// Create a throttle from an interval in milliseconds
    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Get the configured interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait for a slot in the current interval window.
    ///
    /// Returns `None` when a newer call was issued while this one waited;
    /// the superseded caller should drop its work. Returns a [`Ticket`]
    /// when the call may proceed, at which point the window restarts.
    pub async fn admit(&self) -> Option<Ticket> {
        let (ticket, wait) = {
            let mut inner = self.inner.lock().unwrap();
            inner.newest += 1;
            let wait = match inner.last_fired {
                Some(at) => self.interval.saturating_sub(at.elapsed()),
                None => Duration::ZERO,
            };
            (inner.newest, wait)
        };

        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }

        let mut inner = self.inner.lock().unwrap();
        if inner.newest != ticket {
            return None;
        }
        inner.last_fired = Some(Instant::now());
        Some(Ticket(ticket))
    }

    /// True while no call newer than `ticket` has been issued. Used to
    /// discard responses whose request is no longer the most recent.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.inner.lock().unwrap().newest == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_call_fires_immediately() {
        let throttle = Throttle::from_millis(250);
        let ticket = throttle.admit().await;
        assert!(ticket.is_some());
        assert!(throttle.is_current(&ticket.unwrap()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_call_waits_out_the_window() {
        let throttle = Throttle::from_millis(250);
        throttle.admit().await.unwrap();

        let start = Instant::now();
        let ticket = throttle.admit().await;
        assert!(ticket.is_some());
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_call_is_dropped() {
        let throttle = Throttle::from_millis(250);
        throttle.admit().await.unwrap();

        // Both queue inside the same window; only the later one survives.
        let (first, second) = tokio::join!(throttle.admit(), throttle.admit());
        assert!(first.is_none());
        assert!(second.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_ticket_detected_after_newer_issue() {
        let throttle = Throttle::from_millis(250);
        let ticket = throttle.admit().await.unwrap();
        assert!(throttle.is_current(&ticket));

        // A newer call arrives while the first response is still in flight.
        tokio::time::sleep(Duration::from_millis(300)).await;
        let newer = throttle.admit().await.unwrap();

        assert!(!throttle.is_current(&ticket));
        assert!(throttle.is_current(&newer));
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_restarts_after_fire() {
        let throttle = Throttle::from_millis(100);
        throttle.admit().await.unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;

        // Window expired; next call goes straight through.
        let start = Instant::now();
        assert!(throttle.admit().await.is_some());
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
