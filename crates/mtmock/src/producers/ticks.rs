use std::sync::Arc;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{info, trace};

use mtmock_middleware::{SubjectBuilder, Transport};
use mtmock_scheduler::{Period, PeriodicSchedule, ShutdownSignal};

use crate::error::ProducerError;
use crate::metrics::Metrics;
use crate::prices;
use crate::producers::publish_json;

/// Publishes a tick for one randomly chosen symbol every interval.
pub struct TickProducer {
    transport: Arc<dyn Transport>,
    subjects: SubjectBuilder,
    symbols: Arc<[String]>,
    interval: Period,
    rng: StdRng,
    metrics: Arc<Metrics>,
}

impl TickProducer {
    pub fn new(
        transport: Arc<dyn Transport>,
        subjects: SubjectBuilder,
        symbols: Arc<[String]>,
        interval: Period,
        rng: StdRng,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            transport,
            subjects,
            symbols,
            interval,
            rng,
            metrics,
        }
    }

    pub async fn run(mut self, shutdown: ShutdownSignal) -> Result<(), ProducerError> {
        if self.symbols.is_empty() {
            return Ok(());
        }

        let mut schedule = PeriodicSchedule::new(self.interval, shutdown);
        while let Some(fired) = schedule.tick().await {
            let symbol = &self.symbols[self.rng.random_range(0..self.symbols.len())];
            let tick = prices::tick(symbol, fired.boundary);
            publish_json(self.transport.as_ref(), self.subjects.tick(), &tick).await?;
            self.metrics.ticks_published.inc();
            trace!(symbol = %symbol, ts = tick.ts, "tick published");
        }

        info!("tick producer stopped");
        Ok(())
    }
}
