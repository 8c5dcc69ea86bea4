//! mtmock: MT4 gateway mock
//!
//! Publishes synthetic candles, ticks and group-symbol parameters over NATS
//! and answers trade requests with synthetic accepts and rejects, so
//! downstream consumers can be exercised without a live MT4 server.

pub mod config;
pub mod error;
pub mod metrics;
pub mod prices;
pub mod producers;
pub mod responder;
pub mod server;

use std::sync::Arc;

use tracing::info;

use mtmock_middleware::Transport;
use mtmock_scheduler::{CoordinatorError, ProducerCoordinator, ShutdownSignal};

pub use config::{Config, Settings};
pub use error::{ConfigError, ProducerError};
pub use metrics::Metrics;
pub use producers::{CandleProducer, GroupSymbolProducer, TickProducer};
pub use responder::{AcceptPolicy, OrderCounter, TradeResponder};

/// Run every producer until shutdown or the first fatal failure.
///
/// Returns after all tasks have stopped. The group-symbol producer finishes
/// early on its own without stopping the others.
pub async fn run(
    settings: Settings,
    transport: Arc<dyn Transport>,
    shutdown: ShutdownSignal,
    metrics: Arc<Metrics>,
) -> Result<(), CoordinatorError<ProducerError>> {
    let symbols: Arc<[String]> = settings.symbols.into();
    let groups: Arc<[String]> = settings.groups.into();
    let subjects = settings.subjects;

    info!(
        service = subjects.service(),
        symbols = symbols.len(),
        groups = groups.len(),
        candle_period = ?settings.candle_period.as_duration(),
        tick_interval = ?settings.tick_interval.as_duration(),
        accept_policy = ?settings.accept_policy,
        "starting producers"
    );

    let mut coordinator = ProducerCoordinator::new(shutdown);

    let groups_producer = GroupSymbolProducer::new(
        transport.clone(),
        subjects.clone(),
        groups,
        symbols.clone(),
        metrics.clone(),
    );
    coordinator.spawn("group-symbols", move |_| groups_producer.run());

    let candles = CandleProducer::new(
        transport.clone(),
        subjects.clone(),
        symbols.clone(),
        settings.candle_period,
        settings.backfill_periods,
        metrics.clone(),
    );
    coordinator.spawn("candles", move |shutdown| candles.run(shutdown));

    let ticks = TickProducer::new(
        transport.clone(),
        subjects.clone(),
        symbols,
        settings.tick_interval,
        producers::seeded_rng(settings.rng_seed),
        metrics.clone(),
    );
    coordinator.spawn("ticks", move |shutdown| ticks.run(shutdown));

    // Offset so ticks and responses draw from separate streams
    let responder = TradeResponder::new(
        settings.accept_policy,
        producers::seeded_rng(settings.rng_seed.map(|seed| seed.wrapping_add(1))),
        metrics.clone(),
    );
    let recv_timeout = settings.trade_recv_timeout;
    coordinator.spawn("trade-responder", move |shutdown| {
        responder.run(transport, subjects, recv_timeout, shutdown)
    });

    if let Some(addr) = settings.metrics_addr {
        coordinator.spawn("metrics-server", move |shutdown| {
            server::serve(addr, metrics, shutdown)
        });
    }

    coordinator.wait().await
}
