use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An unprocessed listing or history entry as returned by a pricing API.
///
/// Field names are not consistent across providers; see
/// [`FieldSpec`](crate::fields::FieldSpec) for how values are located.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// PricePoint: One normalized sale observation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub currency: String,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64, currency: impl Into<String>) -> Self {
        Self {
            timestamp,
            price,
            currency: currency.into(),
        }
    }

    /// Timestamp as fractional seconds since the Unix epoch.
    pub fn epoch_seconds(&self) -> f64 {
        epoch_seconds(self.timestamp)
    }
}

/// Fractional seconds since the Unix epoch, at millisecond resolution.
pub fn epoch_seconds(timestamp: DateTime<Utc>) -> f64 {
    timestamp.timestamp_millis() as f64 / 1000.0
}

// ---------------------------------------------------------------------------
// PriceSeries: Ordered sequence of price points
// ---------------------------------------------------------------------------

/// An ordered sequence of [`PricePoint`]s.
///
/// Order is whatever the producer left it in: input order after
/// normalization, price order after trimming. Call
/// [`sorted_by_time`](Self::sorted_by_time) when chronology matters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<PricePoint> {
        self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    /// Prices in series order.
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Point count per currency, in order of first appearance.
    pub fn currency_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for point in &self.points {
            match counts.iter_mut().find(|(code, _)| *code == point.currency) {
                Some((_, n)) => *n += 1,
                None => counts.push((point.currency.clone(), 1)),
            }
        }
        counts
    }

    /// The currency with the most points. Ties go to the currency seen first.
    ///
    /// Returns `None` for an empty series.
    pub fn dominant_currency(&self) -> Option<String> {
        let mut best: Option<(String, usize)> = None;
        for (code, n) in self.currency_counts() {
            // Strictly greater keeps the earlier currency on ties
            if best.as_ref().map_or(true, |(_, top)| n > *top) {
                best = Some((code, n));
            }
        }
        best.map(|(code, _)| code)
    }

    /// Points quoted in `currency`, order preserved.
    pub fn in_currency(&self, currency: &str) -> PriceSeries {
        self.points
            .iter()
            .filter(|p| p.currency == currency)
            .cloned()
            .collect()
    }

    /// Oldest first. Points sharing a timestamp keep their relative order.
    pub fn sorted_by_time(&self) -> PriceSeries {
        let mut points = self.points.clone();
        points.sort_by_key(|p| p.timestamp);
        PriceSeries::new(points)
    }

    /// The `n` most recent points, kept in input order.
    pub fn newest(&self, n: usize) -> PriceSeries {
        let mut by_time: Vec<usize> = (0..self.points.len()).collect();
        by_time.sort_by_key(|&i| self.points[i].timestamp);

        let mut keep = vec![false; self.points.len()];
        for &i in by_time.iter().rev().take(n) {
            keep[i] = true;
        }
        self.points
            .iter()
            .zip(keep)
            .filter(|(_, kept)| *kept)
            .map(|(p, _)| p.clone())
            .collect()
    }
}

impl FromIterator<PricePoint> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<PricePoint>> for PriceSeries {
    fn from(points: Vec<PricePoint>) -> Self {
        Self::new(points)
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

// ---------------------------------------------------------------------------
// Rejection: Why a raw record did not become a price point
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The array element was not a JSON object.
    NotAnObject,
    MissingDate,
    InvalidDate,
    MissingPrice,
    /// Non-numeric, non-finite, zero or negative.
    InvalidPrice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Position of the record in the input.
    pub index: usize,
    pub reason: RejectReason,
}
