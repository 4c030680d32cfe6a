//! Card price SDK for Rust.
//!
//! Turns raw sold-listing and price-history records from trading-card pricing
//! APIs into a cleaned price series with summary statistics, a linear trend
//! and a histogram, ready to hand to a table or chart renderer.
//!
//! # Quick start
//!
//! ```no_run
//! use card_price_sdk::{JsonFileSource, PriceAnalyzer};
//!
//! let analyzer = PriceAnalyzer::builder()
//!     .fallback_currency("GBP")
//!     .trim_percent(10.0)
//!     .build()
//!     .unwrap();
//!
//! let mut source = JsonFileSource::new("history.json");
//! let report = analyzer.analyze_source(&mut source).unwrap();
//! if let Some(summary) = &report.summary {
//!     println!("{}", summary);
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_source;
pub mod config;
pub mod error;
pub mod fields;
pub mod models;
pub mod pipeline;
pub mod source;

#[cfg(feature = "async")]
pub use async_source::AsyncRecordSource;
pub use error::{PriceError, Result};
pub use fields::{FieldPath, FieldSpec};
pub use models::{
    Bin, CardQuote, Histogram, Listing, PricePoint, PriceReport, PriceSeries, RawRecord,
    RejectReason, Rejection, SoldLogRow, Summary, TrendLine,
};
pub use pipeline::Normalized;
pub use source::{HttpJsonSource, JsonFileSource, RecordSource};

use std::fmt;

// ---------------------------------------------------------------------------
// PriceAnalyzerBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`PriceAnalyzer`].
///
/// Use [`PriceAnalyzer::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](PriceAnalyzerBuilder::build) to validate it.
pub struct PriceAnalyzerBuilder {
    fields: FieldSpec,
    trim_percent: f64,
    bins: usize,
    comps_limit: Option<usize>,
}

impl Default for PriceAnalyzerBuilder {
    fn default() -> Self {
        Self {
            fields: FieldSpec::default(),
            trim_percent: 0.0,
            bins: config::DEFAULT_BINS,
            comps_limit: None,
        }
    }
}

impl PriceAnalyzerBuilder {
    /// Replace the whole field spec.
    pub fn fields(mut self, fields: FieldSpec) -> Self {
        self.fields = fields;
        self
    }

    /// Currency assumed for records without one. Defaults to `GBP`.
    pub fn fallback_currency(mut self, code: &str) -> Self {
        self.fields.fallback_currency(code);
        self
    }

    /// Replace the date candidates (dot-separated paths, highest priority first).
    pub fn date_fields(mut self, paths: &[&str]) -> Self {
        self.fields.date_fields(paths);
        self
    }

    /// Replace the price candidates.
    pub fn price_fields(mut self, paths: &[&str]) -> Self {
        self.fields.price_fields(paths);
        self
    }

    /// Replace the currency candidates.
    pub fn currency_fields(mut self, paths: &[&str]) -> Self {
        self.fields.currency_fields(paths);
        self
    }

    /// Percentage trimmed from each end of the price distribution.
    ///
    /// Must be in `[0, 50)`. Defaults to `0` (no trimming).
    pub fn trim_percent(mut self, percent: f64) -> Self {
        self.trim_percent = percent;
        self
    }

    /// Histogram bin count, at most [`config::MAX_BINS`]. Defaults to 10.
    pub fn bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    /// Only analyze the `n` most recent sales.
    pub fn comps_limit(mut self, n: usize) -> Self {
        self.comps_limit = Some(n);
        self
    }

    /// Validate the configuration and build the analyzer.
    pub fn build(self) -> Result<PriceAnalyzer> {
        self.fields.validate()?;
        if !self.trim_percent.is_finite() || !(0.0..50.0).contains(&self.trim_percent) {
            return Err(PriceError::InvalidArgument(format!(
                "trim percent must be in [0, 50), got {}",
                self.trim_percent
            )));
        }
        pipeline::histogram::check_bins(self.bins)?;
        if self.comps_limit == Some(0) {
            return Err(PriceError::InvalidArgument(
                "comps limit must be at least 1".into(),
            ));
        }

        Ok(self.into_analyzer())
    }

    fn into_analyzer(self) -> PriceAnalyzer {
        PriceAnalyzer {
            fields: self.fields,
            trim_percent: self.trim_percent,
            bins: self.bins,
            comps_limit: self.comps_limit,
        }
    }
}

// ---------------------------------------------------------------------------
// PriceAnalyzer
// ---------------------------------------------------------------------------

/// Runs the full sold-price pipeline with a fixed configuration.
///
/// Stateless between calls: the same records always give the same report.
#[derive(Debug, Clone)]
pub struct PriceAnalyzer {
    fields: FieldSpec,
    trim_percent: f64,
    bins: usize,
    comps_limit: Option<usize>,
}

impl Default for PriceAnalyzer {
    fn default() -> Self {
        PriceAnalyzerBuilder::default().into_analyzer()
    }
}

impl PriceAnalyzer {
    /// Create a new builder for configuring the analyzer.
    pub fn builder() -> PriceAnalyzerBuilder {
        PriceAnalyzerBuilder::default()
    }

    pub fn fields(&self) -> &FieldSpec {
        &self.fields
    }

    pub fn trim_percent(&self) -> f64 {
        self.trim_percent
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn comps_limit(&self) -> Option<usize> {
        self.comps_limit
    }

    /// Normalize records with this analyzer's field spec.
    pub fn normalize(&self, records: &[RawRecord]) -> Normalized {
        pipeline::normalize(records, &self.fields)
    }

    /// Analyze a batch of raw records.
    ///
    /// Steps: normalize, apply the comps limit, keep the dominant currency,
    /// trim outliers, sort by time, then summarize, fit the trend and bin.
    /// Input with no usable records gives an empty report, not an error.
    pub fn analyze(&self, records: &[RawRecord]) -> Result<PriceReport> {
        let normalized = self.normalize(records);
        let mut series = normalized.series;

        let mut beyond_limit = 0;
        if let Some(limit) = self.comps_limit {
            let kept = series.newest(limit);
            beyond_limit = series.len() - kept.len();
            series = kept;
        }

        let Some(currency) = series.dominant_currency() else {
            return Ok(PriceReport {
                rejected: normalized.rejected,
                beyond_limit,
                ..PriceReport::default()
            });
        };

        let dominant = series.in_currency(&currency);
        let excluded = series.len() - dominant.len();

        let kept = if self.trim_percent > 0.0 {
            pipeline::trim_outliers(&dominant, self.trim_percent)?
        } else {
            dominant.clone()
        };
        let trimmed = dominant.len() - kept.len();
        let series = kept.sorted_by_time();

        log::debug!(
            "{}: {} points ({} excluded, {} trimmed, {} beyond limit)",
            currency,
            series.len(),
            excluded,
            trimmed,
            beyond_limit
        );

        Ok(PriceReport {
            summary: pipeline::summarize(&series),
            trend: pipeline::fit_trend(&series),
            histogram: pipeline::histogram(&series.prices(), self.bins)?,
            sold_log: sold_log(&series),
            currency: Some(currency),
            series,
            rejected: normalized.rejected,
            beyond_limit,
            excluded,
            trimmed,
        })
    }

    /// Fetch records from `source` and analyze them.
    pub fn analyze_source<S: RecordSource + ?Sized>(&self, source: &mut S) -> Result<PriceReport> {
        let records = source.fetch()?;
        self.analyze(&records)
    }

    /// Convert live-listing records, using this analyzer's fallback currency.
    pub fn listings(&self, records: &[RawRecord]) -> Vec<Listing> {
        pipeline::normalize_listings(records, self.fields.fallback())
    }
}

/// Sold-data log rows, newest first.
pub fn sold_log(series: &PriceSeries) -> Vec<SoldLogRow> {
    let mut points = series.points().to_vec();
    points.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    points
        .into_iter()
        .map(|p| SoldLogRow {
            date: p.timestamp.format("%Y-%m-%d").to_string(),
            price: p.price,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for PriceAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PriceAnalyzer(fallback={}, trim={}%, bins={}, comps_limit={})",
            self.fields.fallback(),
            self.trim_percent,
            self.bins,
            self.comps_limit
                .map(|n| n.to_string())
                .unwrap_or_else(|| "none".to_string())
        )
    }
}
