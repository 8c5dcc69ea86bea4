//! Deterministic synthetic prices derived from the timestamp alone.

use chrono::{DateTime, Utc};

use mtmock_schemas::{Candle, Tick};

/// `sin(unix_secs) + 1`, so every symbol quotes the same curve.
pub fn base_price(ts: DateTime<Utc>) -> f64 {
    (ts.timestamp() as f64).sin() + 1.0
}

pub fn candle(symbol: &str, ts: DateTime<Utc>) -> Candle {
    let p = base_price(ts);
    Candle::at(symbol, ts, p - 0.1, p + 0.1, p - 0.2, p + 0.05)
}

pub fn tick(symbol: &str, ts: DateTime<Utc>) -> Tick {
    let p = base_price(ts);
    Tick::at(symbol, ts, p - 0.1, p + 0.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_epoch_price() {
        let ts = Utc.timestamp_opt(0, 0).unwrap();
        assert_eq!(base_price(ts), 1.0);
        let c = candle("EURUSD", ts);
        assert!((c.open - 0.9).abs() < 1e-12);
        assert!((c.high - 1.1).abs() < 1e-12);
        assert!((c.low - 0.8).abs() < 1e-12);
        assert!((c.close - 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_candle_bounds_hold() {
        for secs in [1_700_000_000i64, 1_700_000_060, 1_700_000_120] {
            let c = candle("XAUUSD", Utc.timestamp_opt(secs, 0).unwrap());
            assert_eq!(c.ts as i64, secs);
            assert!(c.low <= c.open && c.open <= c.high);
            assert!(c.low <= c.close && c.close <= c.high);
        }
    }

    #[test]
    fn test_tick_spread() {
        let t = tick("GBPUSD", Utc.timestamp_opt(1_700_000_001, 0).unwrap());
        assert!((t.spread() - 0.2).abs() < 1e-12);
        assert_eq!(t.symbol, "GBPUSD");
    }
}
