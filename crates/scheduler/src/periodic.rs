use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::trace;

use crate::period::Period;
use crate::shutdown::ShutdownSignal;

/// One firing of a [`PeriodicSchedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// The wall-clock boundary the timer was armed for. Always aligned.
    pub boundary: DateTime<Utc>,
    /// When the timer actually fired; trails `boundary` by scheduler latency.
    pub fired_at: DateTime<Utc>,
}

impl Tick {
    pub fn lag(&self) -> TimeDelta {
        self.fired_at - self.boundary
    }
}

/// Unbounded sequence of ticks, one per wall-clock period boundary.
///
/// Each call re-derives the next boundary from the current time rather than
/// from the previous target, so a slow consumer skips boundaries instead of
/// drifting. Boundaries never repeat, even when the wall clock runs behind
/// the timer. Ends for good once the shutdown signal trips.
pub struct PeriodicSchedule {
    period: Period,
    shutdown: ShutdownSignal,
    last: Option<DateTime<Utc>>,
    exhausted: bool,
}

impl PeriodicSchedule {
    pub fn new(period: Period, shutdown: ShutdownSignal) -> Self {
        Self {
            period,
            shutdown,
            last: None,
            exhausted: false,
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// Wait for the next boundary. `None` once shutdown has tripped.
    pub async fn tick(&mut self) -> Option<Tick> {
        if self.exhausted || self.shutdown.is_triggered() {
            self.exhausted = true;
            return None;
        }

        let now = Utc::now();
        let mut boundary = self.period.align_down(now) + self.period.as_delta();
        if let Some(last) = self.last {
            boundary = boundary.max(last + self.period.as_delta());
        }
        let wait = (boundary - now).to_std().unwrap_or(Duration::ZERO);

        let shutdown = self.shutdown.clone();
        let fired = tokio::select! {
            biased;
            _ = shutdown.triggered() => false,
            _ = tokio::time::sleep(wait) => true,
        };

        // The timer may fire in the same instant the signal trips
        if !fired || self.shutdown.is_triggered() {
            self.exhausted = true;
            return None;
        }

        self.last = Some(boundary);
        let tick = Tick {
            boundary,
            fired_at: Utc::now(),
        };
        trace!(boundary = %tick.boundary, lag_us = tick.lag().num_microseconds(), "tick");
        Some(tick)
    }
}
