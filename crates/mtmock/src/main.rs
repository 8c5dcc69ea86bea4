use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use mtmock::{Config, Metrics};
use mtmock_middleware::{NatsTransport, Transport};
use mtmock_scheduler::ShutdownSignal;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "mtmock=info,mtmock_scheduler=info,mtmock_middleware=info".into()
            }),
        )
        .json()
        .init();

    let config = Config::parse();
    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    info!(
        nats_url = %settings.nats_url,
        service = settings.subjects.service(),
        symbols = ?settings.symbols,
        groups = ?settings.groups,
        "mtmock starting"
    );

    let metrics = match Metrics::new() {
        Ok(metrics) => Arc::new(metrics),
        Err(e) => {
            error!(error = %e, "failed to register metrics");
            return ExitCode::FAILURE;
        }
    };

    let nats = match NatsTransport::connect(&settings.nats_url).await {
        Ok(nats) => Arc::new(nats),
        Err(e) => {
            error!(error = %e, "failed to connect to NATS");
            return ExitCode::FAILURE;
        }
    };
    info!("connected to NATS");

    let shutdown = ShutdownSignal::new();
    let listener = shutdown.listen_for_os_signals();

    let transport: Arc<dyn Transport> = nats.clone();
    let result = mtmock::run(settings, transport, shutdown.clone(), metrics).await;

    shutdown.trigger();
    if let Err(e) = listener.await {
        warn!(error = %e, "signal listener ended abnormally");
    }
    if let Err(e) = nats.flush().await {
        warn!(error = %e, "failed to flush NATS on shutdown");
    }

    match result {
        Ok(()) => {
            info!("mtmock stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(task = e.task(), error = %e, "mtmock stopped on producer failure");
            ExitCode::FAILURE
        }
    }
}
