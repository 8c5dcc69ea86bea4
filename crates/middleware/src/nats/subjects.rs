use std::sync::Arc;

/// Topic names for the mocked MT4 gateway: `{service}.mt4_{kind}`.
///
/// All subjects are formatted once at construction; accessors hand out
/// borrowed strs so producers never allocate per publish.
#[derive(Debug, Clone)]
pub struct SubjectBuilder {
    service: Arc<str>,
    candle: Arc<str>,
    tick: Arc<str>,
    trade_request: Arc<str>,
    trade_response: Arc<str>,
    group: Arc<str>,
}

impl SubjectBuilder {
    /// Create a SubjectBuilder for a service name (the topic prefix)
    pub fn new(service: impl Into<String>) -> Self {
        let service = service.into();
        let subject = |kind: &str| -> Arc<str> { format!("{}.mt4_{}", service, kind).into() };

        Self {
            candle: subject("candle"),
            tick: subject("tick"),
            trade_request: subject("trade_request"),
            trade_response: subject("trade_response"),
            group: subject("group"),
            service: service.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// {service}.mt4_candle
    #[inline]
    pub fn candle(&self) -> &str {
        &self.candle
    }

    /// {service}.mt4_tick
    #[inline]
    pub fn tick(&self) -> &str {
        &self.tick
    }

    /// {service}.mt4_trade_request (inbound)
    #[inline]
    pub fn trade_request(&self) -> &str {
        &self.trade_request
    }

    /// {service}.mt4_trade_response
    #[inline]
    pub fn trade_response(&self) -> &str {
        &self.trade_response
    }

    /// {service}.mt4_group
    #[inline]
    pub fn group(&self) -> &str {
        &self.group
    }
}
