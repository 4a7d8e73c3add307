//! Outbound request admission control.
//!
//! Imageboard APIs publish strict usage policies; e621 in particular asks
//! clients to stay well under two requests per second. The [`RateLimiter`]
//! enforces a minimum interval between any two dispatches through one client
//! instance, across all concurrent callers combined. Callers experience it as
//! a suspension before the request leaves, never as a rejection.

use std::time::Duration;

use log::debug;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// A "next allowed time" watermark guarding outbound dispatch.
///
/// Each acquire reserves the earliest free slot and advances the watermark by
/// the configured interval. The reservation happens under the lock, the wait
/// happens outside it, so concurrent callers queue up with the correct
/// spacing instead of racing past each other.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    next_allowed: Mutex<Option<Instant>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_allowed: Mutex::new(None),
        }
    }

    /// The configured minimum spacing between dispatches.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Suspends until the caller is allowed to dispatch.
    ///
    /// With a zero interval this returns immediately.
    pub async fn acquire(&self) {
        if self.interval.is_zero() {
            return;
        }

        let scheduled = {
            let mut next_allowed = self.next_allowed.lock().await;
            let now = Instant::now();
            let scheduled = match *next_allowed {
                Some(at) if at > now => at,
                _ => now,
            };
            *next_allowed = Some(scheduled + self.interval);
            scheduled
        };

        let wait = scheduled.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            debug!("Rate limit: delaying request by {wait:?}");
        }
        sleep_until(scheduled).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn sequential_dispatches_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_millis(1500));

        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;

        // First slot is immediate, the next two each wait a full interval.
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_dispatches_keep_minimum_spacing() {
        use std::sync::Arc;

        let limiter = Arc::new(RateLimiter::new(Duration::from_millis(1500)));
        let start = Instant::now();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let limiter = Arc::clone(&limiter);
            handles.push(tokio::spawn(async move {
                limiter.acquire().await;
                start.elapsed()
            }));
        }

        let mut stamps = Vec::new();
        for handle in handles {
            stamps.push(handle.await.unwrap());
        }
        stamps.sort();

        for pair in stamps.windows(2) {
            assert!(
                pair[1] - pair[0] >= Duration::from_millis(1500),
                "dispatches {:?} and {:?} are too close",
                pair[0],
                pair[1]
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_is_a_no_op() {
        let limiter = RateLimiter::new(Duration::ZERO);

        let start = Instant::now();
        for _ in 0..10 {
            limiter.acquire().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
