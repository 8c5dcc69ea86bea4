use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Process-wide cancellation scope.
///
/// Trips once, irreversibly, either on an OS termination request or when a
/// supervised producer fails. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    token: CancellationToken,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip the signal. No-op if already tripped.
    pub fn trigger(&self) {
        self.token.cancel();
    }

    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the signal has tripped (immediately if it already has).
    pub async fn triggered(&self) {
        self.token.cancelled().await
    }

    /// Trip the signal on SIGTERM or ctrl-c.
    ///
    /// The listener task exits on its own once the signal trips for any
    /// other reason.
    pub fn listen_for_os_signals(&self) -> JoinHandle<()> {
        let signal = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = termination_requested() => {
                    info!("termination requested, shutting down");
                    signal.trigger();
                }
                _ = signal.triggered() => {}
            }
        })
    }
}

/// Listen for SIGTERM (Kubernetes pod termination) or ctrl-c.
#[cfg(unix)]
async fn termination_requested() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = sigterm.recv() => info!("SIGTERM received"),
                _ = ctrl_c() => info!("ctrl-c received"),
            }
        }
        Err(e) => {
            warn!(error = %e, "failed to listen for SIGTERM, ctrl-c only");
            ctrl_c().await;
            info!("ctrl-c received");
        }
    }
}

#[cfg(not(unix))]
async fn termination_requested() {
    ctrl_c().await;
    info!("ctrl-c received");
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
