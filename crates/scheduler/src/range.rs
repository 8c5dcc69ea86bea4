use std::iter::FusedIterator;

use chrono::{DateTime, Utc};

use crate::period::Period;
use crate::shutdown::ShutdownSignal;

/// Lazy, finite sequence of period boundaries in `(from, to]`.
///
/// Both endpoints are aligned down first. The aligned `from` itself is never
/// yielded; the aligned `to` always is, unless the range is empty. A `from`
/// that aligns to the Unix epoch is treated as unset and yields nothing.
///
/// Iteration holds no resources. Constructing another range from the same
/// inputs (or cloning before iterating) reproduces the sequence.
#[derive(Debug, Clone)]
pub struct AlignedRange {
    cursor: DateTime<Utc>,
    to: DateTime<Utc>,
    period: Period,
    shutdown: Option<ShutdownSignal>,
}

impl AlignedRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>, period: Period) -> Self {
        let cursor = period.align_down(from);
        let to = if cursor.timestamp_micros() == 0 {
            cursor
        } else {
            period.align_down(to)
        };

        Self {
            cursor,
            to,
            period,
            shutdown: None,
        }
    }

    /// The `periods` boundaries ending at the boundary at or before `now`.
    pub fn backfill(now: DateTime<Utc>, period: Period, periods: u32) -> Self {
        let to = period.align_down(now);
        let from = to.checked_sub_signed(period.span(periods)).unwrap_or(to);
        Self::new(from, to, period)
    }

    /// Stop yielding as soon as `shutdown` trips.
    pub fn until(mut self, shutdown: ShutdownSignal) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    pub fn period(&self) -> Period {
        self.period
    }
}

impl Iterator for AlignedRange {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.to {
            return None;
        }
        if self.shutdown.as_ref().is_some_and(ShutdownSignal::is_triggered) {
            self.to = self.cursor;
            return None;
        }

        self.cursor += self.period.as_delta();
        Some(self.cursor)
    }
}

impl FusedIterator for AlignedRange {}
