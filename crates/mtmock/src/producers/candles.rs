use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use mtmock_middleware::{SubjectBuilder, Transport};
use mtmock_scheduler::{AlignedRange, Period, PeriodicSchedule, ShutdownSignal};

use crate::error::ProducerError;
use crate::metrics::Metrics;
use crate::prices;
use crate::producers::publish_json;

/// Publishes one candle per symbol at every period boundary, after first
/// replaying the most recent `backfill_periods` boundaries.
///
/// Boundaries passed while publishing are filled in before the live one, so
/// the candle stream has no gaps.
pub struct CandleProducer {
    transport: Arc<dyn Transport>,
    subjects: SubjectBuilder,
    symbols: Arc<[String]>,
    period: Period,
    backfill_periods: u32,
    metrics: Arc<Metrics>,
}

impl CandleProducer {
    pub fn new(
        transport: Arc<dyn Transport>,
        subjects: SubjectBuilder,
        symbols: Arc<[String]>,
        period: Period,
        backfill_periods: u32,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            transport,
            subjects,
            symbols,
            period,
            backfill_periods,
            metrics,
        }
    }

    pub async fn run(self, shutdown: ShutdownSignal) -> Result<(), ProducerError> {
        let started = Utc::now();
        // Latest boundary covered so far
        let mut last = self.period.align_down(started);

        let history = AlignedRange::backfill(started, self.period, self.backfill_periods)
            .until(shutdown.clone());
        let mut backfilled = 0u32;
        for ts in history {
            self.publish_all(ts).await?;
            backfilled += 1;
        }
        info!(
            periods = backfilled,
            symbols = self.symbols.len(),
            "candle backfill published"
        );

        let mut schedule = PeriodicSchedule::new(self.period, shutdown.clone());
        while let Some(tick) = schedule.tick().await {
            let pending =
                AlignedRange::new(last, tick.boundary, self.period).until(shutdown.clone());
            for ts in pending {
                if ts < tick.boundary {
                    debug!(ts = %ts, "filling skipped candle boundary");
                }
                self.publish_all(ts).await?;
                last = ts;
            }
        }

        info!("candle producer stopped");
        Ok(())
    }

    async fn publish_all(&self, ts: DateTime<Utc>) -> Result<(), ProducerError> {
        for symbol in self.symbols.iter() {
            let candle = prices::candle(symbol, ts);
            publish_json(self.transport.as_ref(), self.subjects.candle(), &candle).await?;
            self.metrics.candles_published.inc();
        }
        debug!(ts = %ts, "candles published");
        Ok(())
    }
}
