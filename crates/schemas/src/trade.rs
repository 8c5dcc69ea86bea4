use serde::{Deserialize, Serialize};

use crate::SchemaError;

/// Encoded as 0 (buy) / 1 (sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl From<OrderSide> for u8 {
    fn from(side: OrderSide) -> Self {
        match side {
            OrderSide::Buy => 0,
            OrderSide::Sell => 1,
        }
    }
}

impl TryFrom<u8> for OrderSide {
    type Error = SchemaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OrderSide::Buy),
            1 => Ok(OrderSide::Sell),
            other => Err(SchemaError::UnknownSide(other)),
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "buy"),
            OrderSide::Sell => write!(f, "sell"),
        }
    }
}

/// Inbound order from the bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRequest {
    pub request_id: i64,
    pub side: OrderSide,
    /// Account id
    pub login: i64,
    pub volume: f64,
    #[serde(default)]
    pub sl: f64,
    #[serde(default)]
    pub tp: f64,
    pub symbol: String,
    #[serde(default)]
    pub comment: String,
}

/// Reply to a [`TradeRequest`]. `order_id` is 0 and `reject_code` non-zero
/// when rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeResponse {
    pub request_id: i64,
    pub order_id: u64,
    pub reject_code: i32,
    pub reject_message: String,
}

impl TradeResponse {
    pub fn accepted(request_id: i64, order_id: u64) -> Self {
        Self {
            request_id,
            order_id,
            reject_code: 0,
            reject_message: String::new(),
        }
    }

    pub fn rejected(request_id: i64, reject_code: i32, reject_message: impl Into<String>) -> Self {
        Self {
            request_id,
            order_id: 0,
            reject_code,
            reject_message: reject_message.into(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.reject_code == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bridge_request() {
        let json = r#"{
            "request_id": 42,
            "side": 1,
            "login": 1001,
            "volume": 0.5,
            "sl": 1.05,
            "tp": 1.25,
            "symbol": "EURUSD",
            "comment": "scalp"
        }"#;
        let req: TradeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.request_id, 42);
        assert_eq!(req.side, OrderSide::Sell);
        assert_eq!(req.login, 1001);
        assert_eq!(req.symbol, "EURUSD");
        assert_eq!(req.comment, "scalp");
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{"request_id":1,"side":0,"login":7,"volume":1.0,"symbol":"GBPUSD"}"#;
        let req: TradeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.sl, 0.0);
        assert_eq!(req.tp, 0.0);
        assert!(req.comment.is_empty());
    }

    #[test]
    fn test_unknown_side_rejected() {
        let json = r#"{"request_id":1,"side":7,"login":7,"volume":1.0,"symbol":"GBPUSD"}"#;
        let err = serde_json::from_str::<TradeRequest>(json).unwrap_err();
        assert!(err.to_string().contains("unknown order side: 7"));
    }

    #[test]
    fn test_side_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&OrderSide::Buy).unwrap(), "0");
        assert_eq!(serde_json::to_string(&OrderSide::Sell).unwrap(), "1");
        assert_eq!(OrderSide::Sell.to_string(), "sell");
    }

    #[test]
    fn test_response_constructors() {
        let ok = TradeResponse::accepted(9, 3);
        assert!(ok.is_accepted());
        assert!(ok.reject_message.is_empty());

        let rejected = TradeResponse::rejected(9, 1, "Wrong parameters");
        assert!(!rejected.is_accepted());
        assert_eq!(rejected.order_id, 0);

        let json: serde_json::Value = serde_json::to_value(&rejected).unwrap();
        assert_eq!(json["reject_code"], 1);
        assert_eq!(json["reject_message"], "Wrong parameters");
    }
}
