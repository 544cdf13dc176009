//! Trailing-edge debouncing driven by explicit timestamps.
//!
//! The debouncer owns no timer. The caller reports each event with the time
//! it happened and polls from its own event loop; a value is released once no
//! newer event has arrived for the configured delay.

use std::time::{Duration, Instant};

/// Holds back a value until events stop arriving for `delay`.
///
/// ```rust
/// use std::time::{Duration, Instant};
/// use themekeeper::Debouncer;
///
/// let start = Instant::now();
/// let mut widths = Debouncer::new(Duration::from_millis(10));
///
/// widths.call(800, start);
/// widths.call(640, start + Duration::from_millis(5));
/// assert_eq!(widths.poll(start + Duration::from_millis(12)), None);
/// assert_eq!(widths.poll(start + Duration::from_millis(15)), Some(640));
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending value and restarts the delay from `now`.
    pub fn call(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Releases the pending value if the delay has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, at)) if now.saturating_duration_since(*at) >= self.delay => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// When the pending value becomes due, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.delay)
    }

    /// Drops the pending value without releasing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
