//! The sold-price pipeline.
//!
//! Raw records flow through [`normalize`], then optionally [`trim`], and the
//! cleaned series feeds [`aggregate`], [`trend`] and [`histogram`]. Every
//! stage is a pure function over in-memory data.

pub mod aggregate;
pub mod histogram;
pub mod normalize;
pub mod trend;
pub mod trim;

pub use aggregate::summarize;
pub use histogram::histogram;
pub use normalize::{normalize, normalize_listings, normalize_values, Normalized};
pub use trend::fit_trend;
pub use trim::trim_outliers;
