use std::sync::Arc;

use tracing::info;

use mtmock_middleware::{SubjectBuilder, Transport};
use mtmock_schemas::{GroupSymbol, TradeMode};

use crate::error::ProducerError;
use crate::metrics::Metrics;
use crate::producers::publish_json;

/// One-shot publisher of per-group symbol parameters.
pub struct GroupSymbolProducer {
    transport: Arc<dyn Transport>,
    subjects: SubjectBuilder,
    groups: Arc<[String]>,
    symbols: Arc<[String]>,
    metrics: Arc<Metrics>,
}

impl GroupSymbolProducer {
    pub fn new(
        transport: Arc<dyn Transport>,
        subjects: SubjectBuilder,
        groups: Arc<[String]>,
        symbols: Arc<[String]>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            transport,
            subjects,
            groups,
            symbols,
            metrics,
        }
    }

    /// Publishes every (group, symbol) pair once, then returns.
    pub async fn run(self) -> Result<(), ProducerError> {
        for group in self.groups.iter() {
            for symbol in self.symbols.iter() {
                let record = group_symbol(group, symbol);
                publish_json(self.transport.as_ref(), self.subjects.group(), &record).await?;
                self.metrics.group_symbols_published.inc();
            }
        }
        info!(
            groups = self.groups.len(),
            symbols = self.symbols.len(),
            "group symbols published"
        );
        Ok(())
    }
}

pub fn group_symbol(group: &str, symbol: &str) -> GroupSymbol {
    GroupSymbol {
        account_group: group.to_string(),
        symbol: symbol.to_string(),
        description: format!("{} {}", group, symbol),
        digits: 5,
        mode: TradeMode::Full,
        contract_size: 100_000.0,
        tick_size: 0.00001,
        swap_long: 0.1,
        swap_short: 0.1,
        lot_min: 0.01,
        lot_max: 10.0,
        lot_step: 0.01,
    }
}
