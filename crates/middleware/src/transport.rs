use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

use crate::error::TransportError;

/// Message envelope
#[derive(Debug, Clone)]
pub struct TransportMessage {
    pub subject: String,
    pub payload: Bytes,
}

/// Subscription handle for receiving messages
#[async_trait]
pub trait Subscription: Send + Sync {
    /// Receive next message (blocks until available)
    async fn next(&mut self) -> Result<TransportMessage, TransportError>;

    /// Receive next message, giving up after `timeout`.
    ///
    /// Expiry is reported as `TransportError::Timeout`, which callers treat
    /// as "nothing arrived" rather than a failure. Dropping the pending
    /// receive on expiry loses no message.
    async fn next_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<TransportMessage, TransportError> {
        tokio::time::timeout(timeout, self.next())
            .await
            .map_err(|_| TransportError::Timeout)?
    }

    /// Unsubscribe and close
    async fn unsubscribe(self: Box<Self>) -> Result<(), TransportError>;
}

/// Transport abstraction for pub/sub messaging
#[async_trait]
pub trait Transport: Send + Sync {
    /// Publish a message (fire and forget)
    async fn publish(&self, subject: &str, payload: Bytes) -> Result<(), TransportError>;

    /// Subscribe to a subject
    async fn subscribe(&self, subject: &str) -> Result<Box<dyn Subscription>, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverSubscription;

    #[async_trait]
    impl Subscription for NeverSubscription {
        async fn next(&mut self) -> Result<TransportMessage, TransportError> {
            std::future::pending().await
        }

        async fn unsubscribe(self: Box<Self>) -> Result<(), TransportError> {
            Ok(())
        }
    }

    #[test]
    fn test_transport_message_creation() {
        let msg = TransportMessage {
            subject: "mt4.mt4_trade_request".to_string(),
            payload: Bytes::from(r#"{"request_id":1}"#),
        };

        assert_eq!(msg.subject, "mt4.mt4_trade_request");
        assert_eq!(msg.payload, Bytes::from(r#"{"request_id":1}"#));
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_timeout_reports_timeout() {
        let mut sub = NeverSubscription;
        let err = sub
            .next_timeout(Duration::from_secs(10))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }
}
