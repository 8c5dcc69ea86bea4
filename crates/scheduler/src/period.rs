use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::ScheduleError;

/// Alignment granularity for a schedule. Always at least one microsecond.
///
/// Boundaries are measured from the Unix epoch, so a one-minute period
/// aligns to the wall-clock minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    micros: i64,
}

impl Period {
    pub fn new(duration: Duration) -> Result<Self, ScheduleError> {
        let micros = i64::try_from(duration.as_micros())
            .map_err(|_| ScheduleError::InvalidPeriod(format!("{:?} is too long", duration)))?;
        if micros == 0 {
            return Err(ScheduleError::InvalidPeriod(format!(
                "{:?} is shorter than one microsecond",
                duration
            )));
        }
        Ok(Self { micros })
    }

    pub fn from_secs(secs: u64) -> Result<Self, ScheduleError> {
        Self::new(Duration::from_secs(secs))
    }

    pub fn from_millis(millis: u64) -> Result<Self, ScheduleError> {
        Self::new(Duration::from_millis(millis))
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_micros(self.micros.unsigned_abs())
    }

    pub fn as_delta(&self) -> TimeDelta {
        TimeDelta::microseconds(self.micros)
    }

    /// `n` whole periods, saturating at the largest representable span.
    pub fn span(&self, n: u32) -> TimeDelta {
        TimeDelta::microseconds(self.micros.saturating_mul(i64::from(n)))
    }

    /// Floor `ts` to the nearest boundary at or before it.
    pub fn align_down(&self, ts: DateTime<Utc>) -> DateTime<Utc> {
        let past_boundary = ts.timestamp_micros().rem_euclid(self.micros);
        let sub_micro = i64::from(ts.timestamp_subsec_nanos() % 1_000);
        ts - TimeDelta::microseconds(past_boundary) - TimeDelta::nanoseconds(sub_micro)
    }

    /// Whether `ts` sits exactly on a boundary.
    pub fn is_aligned(&self, ts: DateTime<Utc>) -> bool {
        ts.timestamp_subsec_nanos() % 1_000 == 0
            && ts.timestamp_micros().rem_euclid(self.micros) == 0
    }
}

impl TryFrom<Duration> for Period {
    type Error = ScheduleError;

    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        Self::new(duration)
    }
}
