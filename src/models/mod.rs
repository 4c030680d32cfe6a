pub mod listing;
pub mod record;
pub mod report;
pub mod stats;

pub use listing::*;
pub use record::*;
pub use report::*;
pub use stats::*;
