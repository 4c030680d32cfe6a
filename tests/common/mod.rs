//! Shared test fixtures for the card price SDK integration tests.
//!
//! Provides raw-record builders in the shapes returned by the price tracker
//! and the eBay APIs, plus helpers for timestamps and float comparison.

#![allow(dead_code)]

use card_price_sdk::{PricePoint, PriceSeries, RawRecord};
use chrono::{DateTime, Duration, Utc};
use std::io::Write;
use tempfile::NamedTempFile;

/// Seconds in a day.
pub const DAY: i64 = 86_400;

/// Install a test logger once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Turn a `json!({...})` object into a `RawRecord`.
pub fn record(value: serde_json::Value) -> RawRecord {
    value
        .as_object()
        .cloned()
        .expect("fixture must be a JSON object")
}

pub fn records(values: Vec<serde_json::Value>) -> Vec<RawRecord> {
    values.into_iter().map(record).collect()
}

/// Parse an RFC 3339 timestamp.
pub fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

/// Midnight UTC on 2024-03-01.
pub fn base_time() -> DateTime<Utc> {
    ts("2024-03-01T00:00:00Z")
}

/// A point `days` after [`base_time`].
pub fn point(days: i64, price: f64, currency: &str) -> PricePoint {
    PricePoint::new(base_time() + Duration::days(days), price, currency)
}

/// A GBP series with one point per day at the given prices.
pub fn daily_series(prices: &[f64]) -> PriceSeries {
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| point(i as i64, p, "GBP"))
        .collect()
}

pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * (1.0 + a.abs().max(b.abs()))
}

/// Price-tracker history rows with the usual mix of field names and junk.
pub fn tracker_history() -> Vec<RawRecord> {
    records(vec![
        serde_json::json!({"date": "2024-03-01T10:00:00Z", "price": 12.0}),
        serde_json::json!({"sold_at": "2024-03-02T11:30:00+00:00", "sold_price": "14.50"}),
        serde_json::json!({"timestamp": "2024-03-03", "price": 13}),
        serde_json::json!({"date": "not a date", "price": 99.0}),
        serde_json::json!({"date": "2024-03-04T09:00:00Z", "price": "n/a"}),
        serde_json::json!({"date": "2024-03-05T09:00:00Z"}),
        serde_json::json!({"date": "2024-03-06T09:00:00Z", "price": 15.25, "currency": "gbp"}),
    ])
}

/// eBay Finding API `findCompletedItems` response (every scalar is wrapped
/// in a one-element array).
pub fn finding_api_payload() -> serde_json::Value {
    serde_json::json!({
        "findCompletedItemsResponse": [{
            "ack": ["Success"],
            "searchResult": [{
                "@count": "2",
                "item": [
                    {
                        "title": ["Pikachu 25/102"],
                        "listingInfo": [{"endTime": ["2024-02-10T18:22:05.000Z"]}],
                        "sellingStatus": [{
                            "currentPrice": [{"@currencyId": "USD", "__value__": "21.99"}]
                        }]
                    },
                    {
                        "title": ["Pikachu 58/102"],
                        "listingInfo": [{"endTime": ["2024-02-12T08:00:00.000Z"]}],
                        "sellingStatus": [{
                            "currentPrice": [{"@currencyId": "USD", "__value__": "18.00"}]
                        }]
                    }
                ]
            }]
        }]
    })
}

/// eBay Browse API item summaries (live listings).
pub fn browse_items() -> Vec<RawRecord> {
    records(vec![
        serde_json::json!({
            "title": "Charizard Base Set",
            "price": {"value": "250.00", "currency": "GBP"},
            "itemWebUrl": "https://www.ebay.co.uk/itm/1"
        }),
        serde_json::json!({
            "title": "Charizard Base Set PSA 9",
            "price": {"value": "1200.00", "currency": "GBP"},
            "itemAffiliateWebUrl": "https://www.ebay.co.uk/itm/2?aff=1"
        }),
        serde_json::json!({
            "title": "Charizard (price on request)",
            "price": {"currency": "GBP"},
            "itemWebUrl": "https://www.ebay.co.uk/itm/3"
        }),
    ])
}

/// Write `contents` to a temp file with the given suffix.
pub fn write_temp(contents: &[u8], suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}
