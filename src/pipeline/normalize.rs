//! Raw record normalization into [`PricePoint`]s.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::config;
use crate::fields::{FieldPath, FieldSpec};
use crate::models::{Listing, PricePoint, PriceSeries, RawRecord, RejectReason, Rejection};

/// Date-time layouts carrying an explicit UTC offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
];

/// Date-time layouts without an offset; read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// ---------------------------------------------------------------------------
// Normalized
// ---------------------------------------------------------------------------

/// Output of [`normalize`]: the surviving points in input order and one
/// [`Rejection`] per dropped record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub series: PriceSeries,
    pub rejected: Vec<Rejection>,
}

impl Normalized {
    pub fn dropped(&self) -> usize {
        self.rejected.len()
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Convert raw records into price points, preserving input order.
///
/// Records without a parseable date or a positive finite price are dropped
/// and reported in [`Normalized::rejected`]; nothing here returns an error.
pub fn normalize(records: &[RawRecord], spec: &FieldSpec) -> Normalized {
    let mut out = Normalized::default();
    let mut points = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        match normalize_record(record, spec) {
            Ok(point) => points.push(point),
            Err(reason) => out.rejected.push(Rejection { index, reason }),
        }
    }

    out.series = PriceSeries::new(points);
    log_outcome(records.len(), &out);
    out
}

/// Like [`normalize`], but over arbitrary JSON values; non-objects are
/// rejected with [`RejectReason::NotAnObject`].
pub fn normalize_values(values: &[Value], spec: &FieldSpec) -> Normalized {
    let mut out = Normalized::default();
    let mut points = Vec::with_capacity(values.len());

    for (index, value) in values.iter().enumerate() {
        let result = value
            .as_object()
            .ok_or(RejectReason::NotAnObject)
            .and_then(|record| normalize_record(record, spec));
        match result {
            Ok(point) => points.push(point),
            Err(reason) => out.rejected.push(Rejection { index, reason }),
        }
    }

    out.series = PriceSeries::new(points);
    log_outcome(values.len(), &out);
    out
}

/// Normalize a single record.
pub fn normalize_record(
    record: &RawRecord,
    spec: &FieldSpec,
) -> std::result::Result<PricePoint, RejectReason> {
    let timestamp = spec
        .date_value(record)
        .ok_or(RejectReason::MissingDate)
        .and_then(parse_timestamp)?;
    let price = spec
        .price_value(record)
        .ok_or(RejectReason::MissingPrice)
        .and_then(coerce_price)?;
    let currency = spec.currency_of(record);

    Ok(PricePoint {
        timestamp,
        price,
        currency,
    })
}

fn log_outcome(total: usize, out: &Normalized) {
    if out.dropped() > 0 {
        log::debug!(
            "normalized {} of {} records; {} records dropped",
            out.series.len(),
            total,
            out.dropped()
        );
    }
}

// ---------------------------------------------------------------------------
// Value coercion
// ---------------------------------------------------------------------------

/// Parse a date value: an ISO-8601 string or a numeric Unix timestamp.
///
/// Numbers above [`config::EPOCH_MILLIS_THRESHOLD`] are read as milliseconds.
pub fn parse_timestamp(value: &Value) -> std::result::Result<DateTime<Utc>, RejectReason> {
    match value {
        Value::String(s) => parse_iso(s).ok_or(RejectReason::InvalidDate),
        Value::Number(n) => {
            let raw = n.as_f64().ok_or(RejectReason::InvalidDate)?;
            if !raw.is_finite() || raw < 0.0 {
                return Err(RejectReason::InvalidDate);
            }
            let millis = if raw > config::EPOCH_MILLIS_THRESHOLD {
                raw
            } else {
                raw * 1000.0
            };
            Utc.timestamp_millis_opt(millis.round() as i64)
                .single()
                .ok_or(RejectReason::InvalidDate)
        }
        _ => Err(RejectReason::InvalidDate),
    }
}

/// Parse an ISO-8601 date or date-time into UTC.
///
/// A trailing `Z` is treated as `+00:00`. Values without an offset are taken
/// to be UTC; bare dates map to midnight.
pub fn parse_iso(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let s = match trimmed.strip_suffix('Z').or_else(|| trimmed.strip_suffix('z')) {
        Some(head) => format!("{}+00:00", head),
        None => trimmed.to_string(),
    };

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(&s, fmt) {
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }
    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| Utc.from_utc_datetime(&ndt))
}

/// Coerce a price value to a positive finite `f64`.
///
/// Accepts JSON numbers and numeric strings.
pub fn coerce_price(value: &Value) -> std::result::Result<f64, RejectReason> {
    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or(RejectReason::InvalidPrice)?;

    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(RejectReason::InvalidPrice)
    }
}

// ---------------------------------------------------------------------------
// Live listings
// ---------------------------------------------------------------------------

/// Convert marketplace item summaries into [`Listing`]s.
///
/// Items without a valid price are skipped. The URL comes from
/// `itemWebUrl`, falling back to `itemAffiliateWebUrl`.
pub fn normalize_listings(records: &[RawRecord], fallback_currency: &str) -> Vec<Listing> {
    let price_paths = [FieldPath::parse("price.value"), FieldPath::parse("price")];
    let currency_path = FieldPath::parse("price.currency");
    let string_at = |record: &RawRecord, key: &str| -> Option<String> {
        record
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let mut listings = Vec::with_capacity(records.len());
    for record in records {
        let price = match crate::fields::first_present(&price_paths, record)
            .map(coerce_price)
        {
            Some(Ok(price)) => price,
            _ => continue,
        };
        let currency = currency_path
            .get_scalar(record)
            .and_then(|v| v.as_str())
            .map(|s| s.trim().to_uppercase())
            .unwrap_or_else(|| fallback_currency.to_string());

        listings.push(Listing {
            title: string_at(record, "title").unwrap_or_default(),
            price,
            currency,
            url: string_at(record, "itemWebUrl")
                .or_else(|| string_at(record, "itemAffiliateWebUrl"))
                .unwrap_or_default(),
        });
    }

    let skipped = records.len() - listings.len();
    if skipped > 0 {
        log::debug!("skipped {} listings without a usable price", skipped);
    }
    listings
}
