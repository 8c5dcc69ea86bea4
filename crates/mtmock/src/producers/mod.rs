//! Market-data producers. Each runs as one coordinated task.

pub mod candles;
pub mod groups;
pub mod ticks;

use bytes::Bytes;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use mtmock_middleware::Transport;

use crate::error::ProducerError;

pub use candles::CandleProducer;
pub use groups::GroupSymbolProducer;
pub use ticks::TickProducer;

/// Serialize `payload` as JSON and publish it to `subject`.
pub async fn publish_json<T: Serialize>(
    transport: &dyn Transport,
    subject: &str,
    payload: &T,
) -> Result<(), ProducerError> {
    let bytes = serde_json::to_vec(payload)?;
    transport.publish(subject, Bytes::from(bytes)).await?;
    Ok(())
}

/// Reproducible when seeded, OS entropy otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtmock_middleware::{InMemoryTransport, Subscription};
    use rand::Rng;

    #[tokio::test]
    async fn test_publish_json() {
        let transport = InMemoryTransport::new();
        let mut sub = transport.subscribe("mt4.mt4_tick").await.unwrap();
        publish_json(&transport, "mt4.mt4_tick", &serde_json::json!({"symbol": "EURUSD"}))
            .await
            .unwrap();
        let msg = sub.next().await.unwrap();
        assert_eq!(msg.payload, Bytes::from(r#"{"symbol":"EURUSD"}"#));
    }

    #[tokio::test]
    async fn test_publish_json_surfaces_transport_failure() {
        let transport = InMemoryTransport::new();
        transport.fail_subject("mt4.mt4_tick");
        let err = publish_json(&transport, "mt4.mt4_tick", &1u8).await.unwrap_err();
        assert!(matches!(err, ProducerError::Transport(_)));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = seeded_rng(Some(42));
        let mut b = seeded_rng(Some(42));
        for _ in 0..8 {
            assert_eq!(a.random_range(0..100u32), b.random_range(0..100u32));
        }
    }
}
