use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

pub struct Metrics {
    pub registry: Registry,
    pub candles_published: IntCounter,
    pub ticks_published: IntCounter,
    pub trade_responses: IntCounterVec,
    pub trade_requests_malformed: IntCounter,
    pub group_symbols_published: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let candles_published = IntCounter::new(
            "mtmock_candles_published_total",
            "Candles published, backfill included",
        )?;
        let ticks_published =
            IntCounter::new("mtmock_ticks_published_total", "Ticks published")?;
        let trade_responses = IntCounterVec::new(
            Opts::new("mtmock_trade_responses_total", "Trade responses published"),
            &["result"],
        )?;
        let trade_requests_malformed = IntCounter::new(
            "mtmock_trade_requests_malformed_total",
            "Trade requests dropped because they failed to decode",
        )?;
        let group_symbols_published = IntCounter::new(
            "mtmock_group_symbols_published_total",
            "Group symbol records published",
        )?;

        registry.register(Box::new(candles_published.clone()))?;
        registry.register(Box::new(ticks_published.clone()))?;
        registry.register(Box::new(trade_responses.clone()))?;
        registry.register(Box::new(trade_requests_malformed.clone()))?;
        registry.register(Box::new(group_symbols_published.clone()))?;

        Ok(Self {
            registry,
            candles_published,
            ticks_published,
            trade_responses,
            trade_requests_malformed,
            group_symbols_published,
        })
    }

    /// Prometheus text exposition of every registered metric
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
