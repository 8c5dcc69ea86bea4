use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wire_ts;

/// OHLC bar for one symbol, stamped with its period boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub symbol: String,
    pub ts: i32,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn at(
        symbol: impl Into<String>,
        ts: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            ts: wire_ts(ts),
            open,
            high,
            low,
            close,
        }
    }
}

/// Top-of-book quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub symbol: String,
    pub ts: i32,
    pub bid: f64,
    pub ask: f64,
}

impl Tick {
    pub fn at(symbol: impl Into<String>, ts: DateTime<Utc>, bid: f64, ask: f64) -> Self {
        Self {
            symbol: symbol.into(),
            ts: wire_ts(ts),
            bid,
            ask,
        }
    }

    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_candle_wire_fields() {
        let ts = Utc.timestamp_opt(1_700_000_040, 0).unwrap();
        let candle = Candle::at("EURUSD", ts, 1.0, 1.2, 0.9, 1.15);
        let json: serde_json::Value = serde_json::to_value(&candle).unwrap();
        assert_eq!(json["symbol"], "EURUSD");
        assert_eq!(json["ts"], 1_700_000_040);
        assert_eq!(json["open"], 1.0);
        assert_eq!(json["high"], 1.2);
        assert_eq!(json["low"], 0.9);
        assert_eq!(json["close"], 1.15);
    }

    #[test]
    fn test_tick_from_bridge_json() {
        let tick: Tick =
            serde_json::from_str(r#"{"symbol":"XAUUSD","ts":1700000000,"bid":1.5,"ask":1.75}"#)
                .unwrap();
        assert_eq!(tick.symbol, "XAUUSD");
        assert_eq!(tick.ts, 1_700_000_000);
        assert_eq!(tick.spread(), 0.25);
    }
}
