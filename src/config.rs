use std::time::Duration;

/// Currency assigned to records that carry no currency field.
pub const DEFAULT_FALLBACK_CURRENCY: &str = "GBP";

/// Default HTTP timeout for record sources.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 10;

/// Upper bound on the histogram bin count.
pub const MAX_BINS: usize = 10_000;

/// Numeric timestamps above this are epoch milliseconds, below it epoch seconds.
pub const EPOCH_MILLIS_THRESHOLD: f64 = 1e11;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Date candidates in priority order (dot-separated nested paths).
pub fn default_date_fields() -> Vec<&'static str> {
    vec![
        // Price-tracker history rows
        "date",
        "sold_at",
        "timestamp",
        // eBay Finding API (completed items)
        "listingInfo.endTime",
        "endTime",
        // eBay Browse API
        "itemEndDate",
    ]
}

/// Price candidates in priority order.
///
/// `price.value` comes before `price` so the Browse API's `{value, currency}`
/// object is read through instead of being rejected as non-numeric.
pub fn default_price_fields() -> Vec<&'static str> {
    vec![
        "price.value",
        "price",
        "sold_price",
        "sellingStatus.currentPrice.__value__",
        "currentPrice.__value__",
    ]
}

/// Currency candidates in priority order.
pub fn default_currency_fields() -> Vec<&'static str> {
    vec![
        "currency",
        "price.currency",
        "sellingStatus.currentPrice.@currencyId",
        "currentPrice.@currencyId",
    ]
}

/// Keys that wrap record arrays in API responses, in lookup order.
pub fn default_envelope_keys() -> Vec<&'static str> {
    vec![
        "history",
        "cards",
        "data",
        "itemSummaries",
        "items",
        "findCompletedItemsResponse.searchResult.item",
    ]
}
