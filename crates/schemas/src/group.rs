use serde::{Deserialize, Serialize};

use crate::SchemaError;

/// Encoded as 0 (no trading), 1 (close only), 2 (full), 3 (long only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TradeMode {
    No,
    CloseOnly,
    Full,
    LongOnly,
}

impl From<TradeMode> for u8 {
    fn from(mode: TradeMode) -> Self {
        match mode {
            TradeMode::No => 0,
            TradeMode::CloseOnly => 1,
            TradeMode::Full => 2,
            TradeMode::LongOnly => 3,
        }
    }
}

impl TryFrom<u8> for TradeMode {
    type Error = SchemaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TradeMode::No),
            1 => Ok(TradeMode::CloseOnly),
            2 => Ok(TradeMode::Full),
            3 => Ok(TradeMode::LongOnly),
            other => Err(SchemaError::UnknownTradeMode(other)),
        }
    }
}

/// Static trading parameters of a symbol within an account group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSymbol {
    pub account_group: String,
    pub symbol: String,
    pub description: String,
    pub digits: i32,
    pub mode: TradeMode,
    pub contract_size: f64,
    pub tick_size: f64,
    pub swap_long: f64,
    pub swap_short: f64,
    pub lot_min: f64,
    pub lot_max: f64,
    pub lot_step: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_roundtrip_values() {
        for (mode, code) in [
            (TradeMode::No, 0u8),
            (TradeMode::CloseOnly, 1),
            (TradeMode::Full, 2),
            (TradeMode::LongOnly, 3),
        ] {
            assert_eq!(u8::from(mode), code);
            assert_eq!(TradeMode::try_from(code), Ok(mode));
        }
        assert_eq!(TradeMode::try_from(4), Err(SchemaError::UnknownTradeMode(4)));
    }

    #[test]
    fn test_group_symbol_wire_fields() {
        let gs = GroupSymbol {
            account_group: "demo".into(),
            symbol: "EURUSD".into(),
            description: "demo EURUSD".into(),
            digits: 5,
            mode: TradeMode::Full,
            contract_size: 100000.0,
            tick_size: 0.00001,
            swap_long: 0.1,
            swap_short: 0.1,
            lot_min: 0.01,
            lot_max: 10.0,
            lot_step: 0.01,
        };
        let json: serde_json::Value = serde_json::to_value(&gs).unwrap();
        assert_eq!(json["account_group"], "demo");
        assert_eq!(json["mode"], 2);
        assert_eq!(json["digits"], 5);
        assert_eq!(json["contract_size"], 100000.0);
    }
}
