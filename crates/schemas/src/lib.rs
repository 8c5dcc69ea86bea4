//! JSON payloads exchanged with the MT4 trade bridge.
//!
//! Field names and integer enum encodings follow the bridge's wire format.

pub mod group;
pub mod market;
pub mod trade;

use chrono::{DateTime, Utc};
use thiserror::Error;

pub use group::{GroupSymbol, TradeMode};
pub use market::{Candle, Tick};
pub use trade::{OrderSide, TradeRequest, TradeResponse};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unknown order side: {0}")]
    UnknownSide(u8),
    #[error("unknown trade mode: {0}")]
    UnknownTradeMode(u8),
}

/// Unix seconds as carried in `ts` fields (32-bit on the wire).
/// Saturates outside the i32 range.
pub fn wire_ts(ts: DateTime<Utc>) -> i32 {
    let secs = ts.timestamp();
    i32::try_from(secs).unwrap_or(if secs < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_wire_ts() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 1, 0).unwrap();
        assert_eq!(wire_ts(ts), 1_704_067_260);
    }

    #[test]
    fn test_wire_ts_saturates() {
        let far = Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(wire_ts(far), i32::MAX);
    }
}
