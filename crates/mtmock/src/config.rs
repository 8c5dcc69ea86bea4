use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use mtmock_middleware::SubjectBuilder;
use mtmock_scheduler::Period;

use crate::error::ConfigError;
use crate::responder::AcceptPolicy;

/// mtmock: MT4 gateway mock publishing synthetic market data over NATS
#[derive(Parser, Debug, Clone)]
#[command(name = "mtmock")]
#[command(about = "MT4 gateway mock: synthetic candles, ticks and trade responses over NATS")]
pub struct Config {
    /// NATS server URL
    #[arg(long, env = "NATS_URL")]
    pub nats_url: String,

    /// Service name, used as the topic prefix ({name}.mt4_candle, ...)
    #[arg(long, env = "SERVER_NAME")]
    pub server_name: String,

    /// Comma-separated symbols to simulate
    #[arg(long = "symbols", env = "SYMBOL_LIST", value_delimiter = ',', required = true)]
    pub symbol_list: Vec<String>,

    /// Comma-separated account groups to simulate
    #[arg(long = "groups", env = "GROUP_NAMES", value_delimiter = ',', required = true)]
    pub group_names: Vec<String>,

    /// Candle period in seconds
    #[arg(long, env = "CANDLE_PERIOD_SECS", default_value = "60")]
    pub candle_period_secs: u64,

    /// Candle periods to backfill before live emission starts
    #[arg(long, env = "BACKFILL_PERIODS", default_value = "2")]
    pub backfill_periods: u32,

    /// Tick interval in milliseconds
    #[arg(long, env = "TICK_INTERVAL_MS", default_value = "1000")]
    pub tick_interval_ms: u64,

    /// Upper bound on each trade request receive, in seconds
    #[arg(long, env = "TRADE_RECV_TIMEOUT_SECS", default_value = "10")]
    pub trade_recv_timeout_secs: u64,

    /// Fraction of trade requests accepted (0.0 rejects all, 1.0 accepts all)
    #[arg(long, env = "ACCEPT_RATIO", default_value = "0.5")]
    pub accept_ratio: f64,

    /// Seed for the simulation RNG; random when unset
    #[arg(long, env = "RNG_SEED")]
    pub rng_seed: Option<u64>,

    /// Health/metrics listen address; server disabled when unset
    #[arg(long, env = "METRICS_ADDR")]
    pub metrics_addr: Option<SocketAddr>,
}

/// Validated runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub nats_url: String,
    pub subjects: SubjectBuilder,
    pub symbols: Vec<String>,
    pub groups: Vec<String>,
    pub candle_period: Period,
    pub backfill_periods: u32,
    pub tick_interval: Period,
    pub trade_recv_timeout: Duration,
    pub accept_policy: AcceptPolicy,
    pub rng_seed: Option<u64>,
    pub metrics_addr: Option<SocketAddr>,
}

impl Config {
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let server_name = self.server_name.trim();
        if server_name.is_empty() {
            return Err(ConfigError::Invalid("server name is empty".to_string()));
        }

        let symbols = non_empty_list("symbol list", &self.symbol_list)?;
        let groups = non_empty_list("group names", &self.group_names)?;

        if self.trade_recv_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "trade receive timeout must be greater than zero".to_string(),
            ));
        }

        Ok(Settings {
            nats_url: self.nats_url.clone(),
            subjects: SubjectBuilder::new(server_name),
            symbols,
            groups,
            candle_period: Period::from_secs(self.candle_period_secs)?,
            backfill_periods: self.backfill_periods,
            tick_interval: Period::from_millis(self.tick_interval_ms)?,
            trade_recv_timeout: Duration::from_secs(self.trade_recv_timeout_secs),
            accept_policy: AcceptPolicy::from_ratio(self.accept_ratio)?,
            rng_seed: self.rng_seed,
            metrics_addr: self.metrics_addr,
        })
    }
}

fn non_empty_list(what: &str, raw: &[String]) -> Result<Vec<String>, ConfigError> {
    let items: Vec<String> = raw
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect();
    if items.is_empty() {
        return Err(ConfigError::Invalid(format!("{} is empty", what)));
    }
    Ok(items)
}
