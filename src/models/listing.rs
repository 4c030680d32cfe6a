use serde::{Deserialize, Serialize};

use crate::models::RawRecord;
use crate::pipeline::normalize::coerce_price;

// ---------------------------------------------------------------------------
// Listing: Live marketplace listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    pub price: f64,
    pub currency: String,
    pub url: String,
}

// ---------------------------------------------------------------------------
// CardQuote: Headline prices for one card from the price tracker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardQuote {
    pub id: Option<String>,
    pub name: String,
    pub market_price: Option<f64>,
    pub low_price: Option<f64>,
    pub high_price: Option<f64>,
}

impl CardQuote {
    /// Read a card detail payload. Missing or unparseable prices become `None`.
    pub fn from_record(record: &RawRecord) -> Self {
        let price = |key: &str| record.get(key).and_then(|v| coerce_price(v).ok());
        let id = record.get("id").and_then(|v| match v {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        let name = record
            .get("name")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown")
            .to_string();

        Self {
            id,
            name,
            market_price: price("market_price"),
            low_price: price("low_price"),
            high_price: price("high_price"),
        }
    }
}
