//! Ordered field lookups for heterogeneous API records.
//!
//! Each logical field (date, price, currency) has a list of candidate paths
//! tried in priority order; the first path that resolves to a non-empty value
//! wins. Builder methods return `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use card_price_sdk::FieldSpec;
//! let mut spec = FieldSpec::empty();
//! spec.date_field("sold_at")
//!     .price_field("sellingStatus.currentPrice.__value__")
//!     .fallback_currency("USD");
//! ```

use serde_json::Value;

use crate::config;
use crate::error::{PriceError, Result};
use crate::models::RawRecord;

// ---------------------------------------------------------------------------
// FieldPath
// ---------------------------------------------------------------------------

/// A dot-separated key path into a record, e.g. `currentPrice.__value__`.
///
/// When an array is met on the way down, its first element is used. This
/// covers the eBay Finding API, which wraps every scalar in a one-element
/// array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Resolve the path, returning the value at its end as-is.
    pub fn get<'r>(&self, record: &'r RawRecord) -> Option<&'r Value> {
        let (first, rest) = self.segments.split_first()?;
        let mut current = record.get(first)?;
        for segment in rest {
            current = first_element(current).as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Resolve the path and unwrap a trailing one-element array.
    ///
    /// Returns `None` when the value is empty (see [`is_empty_value`]).
    pub fn get_scalar<'r>(&self, record: &'r RawRecord) -> Option<&'r Value> {
        let value = first_element(self.get(record)?);
        if is_empty_value(value) {
            None
        } else {
            Some(value)
        }
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Null, blank strings, and empty arrays or objects.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

fn first_element(value: &Value) -> &Value {
    match value {
        Value::Array(items) => items.first().unwrap_or(value),
        _ => value,
    }
}

/// The first candidate that resolves to a non-empty value.
pub fn first_present<'r>(paths: &[FieldPath], record: &'r RawRecord) -> Option<&'r Value> {
    paths.iter().find_map(|p| p.get_scalar(record))
}

// ---------------------------------------------------------------------------
// FieldSpec
// ---------------------------------------------------------------------------

/// Candidate paths for the date, price and currency of a record, plus the
/// currency assumed when none is present.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    date_paths: Vec<FieldPath>,
    price_paths: Vec<FieldPath>,
    currency_paths: Vec<FieldPath>,
    fallback: String,
}

impl Default for FieldSpec {
    /// Candidates covering the price-tracker history and the eBay APIs.
    fn default() -> Self {
        Self {
            date_paths: to_paths(&config::default_date_fields()),
            price_paths: to_paths(&config::default_price_fields()),
            currency_paths: to_paths(&config::default_currency_fields()),
            fallback: config::DEFAULT_FALLBACK_CURRENCY.to_string(),
        }
    }
}

impl FieldSpec {
    /// A spec with no candidates and the default fallback currency.
    pub fn empty() -> Self {
        Self {
            date_paths: Vec::new(),
            price_paths: Vec::new(),
            currency_paths: Vec::new(),
            fallback: config::DEFAULT_FALLBACK_CURRENCY.to_string(),
        }
    }

    /// Append a date candidate (lowest priority so far).
    pub fn date_field(&mut self, path: &str) -> &mut Self {
        self.date_paths.push(FieldPath::parse(path));
        self
    }

    /// Append a price candidate.
    pub fn price_field(&mut self, path: &str) -> &mut Self {
        self.price_paths.push(FieldPath::parse(path));
        self
    }

    /// Append a currency candidate.
    pub fn currency_field(&mut self, path: &str) -> &mut Self {
        self.currency_paths.push(FieldPath::parse(path));
        self
    }

    /// Replace all date candidates.
    pub fn date_fields(&mut self, paths: &[&str]) -> &mut Self {
        self.date_paths = to_paths(paths);
        self
    }

    /// Replace all price candidates.
    pub fn price_fields(&mut self, paths: &[&str]) -> &mut Self {
        self.price_paths = to_paths(paths);
        self
    }

    /// Replace all currency candidates.
    pub fn currency_fields(&mut self, paths: &[&str]) -> &mut Self {
        self.currency_paths = to_paths(paths);
        self
    }

    /// Currency assigned when no currency candidate is present.
    pub fn fallback_currency(&mut self, code: &str) -> &mut Self {
        self.fallback = code.trim().to_uppercase();
        self
    }

    pub fn date_paths(&self) -> &[FieldPath] {
        &self.date_paths
    }

    pub fn price_paths(&self) -> &[FieldPath] {
        &self.price_paths
    }

    pub fn currency_paths(&self) -> &[FieldPath] {
        &self.currency_paths
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn date_value<'r>(&self, record: &'r RawRecord) -> Option<&'r Value> {
        first_present(&self.date_paths, record)
    }

    pub fn price_value<'r>(&self, record: &'r RawRecord) -> Option<&'r Value> {
        first_present(&self.price_paths, record)
    }

    /// The record's currency code, upper-cased, or the fallback.
    ///
    /// Non-string candidates are skipped.
    pub fn currency_of(&self, record: &RawRecord) -> String {
        self.currency_paths
            .iter()
            .filter_map(|p| p.get_scalar(record))
            .find_map(|v| v.as_str())
            .map(|s| s.trim().to_uppercase())
            .unwrap_or_else(|| self.fallback.clone())
    }

    /// Reject specs that could never produce a point.
    pub fn validate(&self) -> Result<()> {
        if self.date_paths.is_empty() {
            return Err(PriceError::InvalidArgument(
                "at least one date field is required".into(),
            ));
        }
        if self.price_paths.is_empty() {
            return Err(PriceError::InvalidArgument(
                "at least one price field is required".into(),
            ));
        }
        if self.fallback.is_empty() {
            return Err(PriceError::InvalidArgument(
                "fallback currency must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn to_paths(paths: &[&str]) -> Vec<FieldPath> {
    paths.iter().map(|p| FieldPath::parse(p)).collect()
}
