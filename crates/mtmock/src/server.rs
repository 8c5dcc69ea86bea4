use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Router};
use tracing::{error, info};

use mtmock_scheduler::ShutdownSignal;

use crate::error::ProducerError;
use crate::metrics::Metrics;

pub fn router(metrics: Arc<Metrics>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(prom_metrics))
        .with_state(metrics)
}

/// Health + metrics HTTP server, stopped gracefully on shutdown.
pub async fn serve(
    addr: SocketAddr,
    metrics: Arc<Metrics>,
    shutdown: ShutdownSignal,
) -> Result<(), ProducerError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "health/metrics server listening");

    axum::serve(listener, router(metrics))
        .with_graceful_shutdown(async move { shutdown.triggered().await })
        .await?;

    info!("health/metrics server stopped");
    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn prom_metrics(State(metrics): State<Arc<Metrics>>) -> Result<String, StatusCode> {
    metrics.render().map_err(|e| {
        error!(error = %e, "failed to encode metrics");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_healthz() {
        let app = router(Arc::new(Metrics::new().unwrap()));
        let (status, body) = get_body(app, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let metrics = Arc::new(Metrics::new().unwrap());
        metrics.group_symbols_published.inc_by(4);
        let (status, body) = get_body(router(metrics), "/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("mtmock_group_symbols_published_total 4"));
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        let shutdown = ShutdownSignal::new();
        let metrics = Arc::new(Metrics::new().unwrap());
        let handle = tokio::spawn(serve(
            "127.0.0.1:0".parse().unwrap(),
            metrics,
            shutdown.clone(),
        ));
        shutdown.trigger();
        let result = tokio::time::timeout(std::time::Duration::from_secs(2), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }
}
