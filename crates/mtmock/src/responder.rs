use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, warn};

use mtmock_middleware::{SubjectBuilder, Subscription, Transport};
use mtmock_scheduler::{PollLoop, ShutdownSignal};
use mtmock_schemas::{TradeRequest, TradeResponse};

use crate::error::{ConfigError, ProducerError};
use crate::metrics::Metrics;
use crate::producers::publish_json;

pub const REJECT_CODE: i32 = 1;
pub const REJECT_MESSAGE: &str = "Wrong parameters";

/// How the responder decides between accepting and rejecting a request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AcceptPolicy {
    Always,
    Never,
    Random { accept_ratio: f64 },
}

impl AcceptPolicy {
    /// 1.0 accepts everything, 0.0 rejects everything.
    pub fn from_ratio(accept_ratio: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&accept_ratio) {
            return Err(ConfigError::Invalid(format!(
                "accept ratio must be within [0, 1], got {}",
                accept_ratio
            )));
        }
        Ok(if accept_ratio == 1.0 {
            AcceptPolicy::Always
        } else if accept_ratio == 0.0 {
            AcceptPolicy::Never
        } else {
            AcceptPolicy::Random { accept_ratio }
        })
    }
}

impl Default for AcceptPolicy {
    fn default() -> Self {
        AcceptPolicy::Random { accept_ratio: 0.5 }
    }
}

/// Order ids handed out to accepted requests: 1, 2, 3, ...
#[derive(Debug, Default)]
pub struct OrderCounter {
    last: u64,
}

impl OrderCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_order_id(&mut self) -> u64 {
        self.last += 1;
        self.last
    }

    pub fn last(&self) -> u64 {
        self.last
    }
}

/// Answers trade requests with synthetic accepts and rejects.
pub struct TradeResponder {
    policy: AcceptPolicy,
    rng: StdRng,
    orders: OrderCounter,
    metrics: Arc<Metrics>,
}

impl TradeResponder {
    pub fn new(policy: AcceptPolicy, rng: StdRng, metrics: Arc<Metrics>) -> Self {
        Self {
            policy,
            rng,
            orders: OrderCounter::new(),
            metrics,
        }
    }

    pub fn orders(&self) -> &OrderCounter {
        &self.orders
    }

    /// Build the response for one raw request. `None` if it fails to decode.
    pub fn handle(&mut self, payload: &[u8]) -> Option<TradeResponse> {
        let request: TradeRequest = match serde_json::from_slice(payload) {
            Ok(request) => request,
            Err(e) => {
                warn!(
                    error = %e,
                    payload = %String::from_utf8_lossy(payload),
                    "dropping malformed trade request"
                );
                self.metrics.trade_requests_malformed.inc();
                return None;
            }
        };

        let response = if self.accepts() {
            let order_id = self.orders.next_order_id();
            debug!(
                request_id = request.request_id,
                order_id,
                symbol = %request.symbol,
                side = %request.side,
                "trade request accepted"
            );
            TradeResponse::accepted(request.request_id, order_id)
        } else {
            debug!(
                request_id = request.request_id,
                symbol = %request.symbol,
                "trade request rejected"
            );
            TradeResponse::rejected(request.request_id, REJECT_CODE, REJECT_MESSAGE)
        };

        let result = if response.is_accepted() {
            "accepted"
        } else {
            "rejected"
        };
        self.metrics.trade_responses.with_label_values(&[result]).inc();
        Some(response)
    }

    fn accepts(&mut self) -> bool {
        match self.policy {
            AcceptPolicy::Always => true,
            AcceptPolicy::Never => false,
            AcceptPolicy::Random { accept_ratio } => self.rng.random::<f64>() < accept_ratio,
        }
    }

    /// Subscribe to the request subject and answer until shutdown.
    pub async fn run(
        self,
        transport: Arc<dyn Transport>,
        subjects: SubjectBuilder,
        recv_timeout: Duration,
        shutdown: ShutdownSignal,
    ) -> Result<(), ProducerError> {
        let subscription = transport.subscribe(subjects.trade_request()).await?;
        info!(subject = subjects.trade_request(), "listening for trade requests");
        self.serve(subscription, transport.as_ref(), &subjects, recv_timeout, shutdown)
            .await
    }

    /// Answer requests arriving on `subscription`. Each receive waits at most
    /// `recv_timeout`; an idle wait just moves on to the next step. The
    /// subscription is released on every exit path.
    pub async fn serve(
        mut self,
        mut subscription: Box<dyn Subscription>,
        transport: &dyn Transport,
        subjects: &SubjectBuilder,
        recv_timeout: Duration,
        shutdown: ShutdownSignal,
    ) -> Result<(), ProducerError> {
        let result = self
            .answer_requests(subscription.as_mut(), transport, subjects, recv_timeout, &shutdown)
            .await;

        if let Err(e) = subscription.unsubscribe().await {
            warn!(error = %e, "failed to unsubscribe from trade requests");
        }
        info!(orders = self.orders.last(), "trade responder stopped");
        result
    }

    async fn answer_requests(
        &mut self,
        subscription: &mut dyn Subscription,
        transport: &dyn Transport,
        subjects: &SubjectBuilder,
        recv_timeout: Duration,
        shutdown: &ShutdownSignal,
    ) -> Result<(), ProducerError> {
        for _ in PollLoop::new(shutdown.clone()) {
            let received = tokio::select! {
                biased;
                _ = shutdown.triggered() => break,
                received = subscription.next_timeout(recv_timeout) => received,
            };

            let msg = match received {
                Ok(msg) => msg,
                Err(e) if e.is_timeout() => continue,
                Err(e) => return Err(e.into()),
            };

            if let Some(response) = self.handle(&msg.payload) {
                publish_json(transport, subjects.trade_response(), &response).await?;
            }
        }
        Ok(())
    }
}
