//! Async wrapper around a [`RecordSource`] for use in async runtimes (Tokio, etc.).
//!
//! Runs the blocking fetch on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use card_price_sdk::{AsyncRecordSource, HttpJsonSource, PriceAnalyzer};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let source = AsyncRecordSource::new(HttpJsonSource::new("https://example.com/history"));
//!     let records = source.fetch().await.unwrap();
//!     let report = PriceAnalyzer::default().analyze(&records).unwrap();
//! }
//! ```

use std::sync::{Arc, Mutex};

use crate::error::{PriceError, Result};
use crate::models::RawRecord;
use crate::source::RecordSource;

/// Async wrapper around a blocking [`RecordSource`].
///
/// The source is protected by a [`Mutex`] so one wrapper can be shared and
/// fetched from repeatedly; concurrent fetches are serialized.
pub struct AsyncRecordSource<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for AsyncRecordSource<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: RecordSource + Send + 'static> AsyncRecordSource<S> {
    pub fn new(source: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(source)),
        }
    }

    /// Fetch records on the blocking thread pool.
    pub async fn fetch(&self) -> Result<Vec<RawRecord>> {
        self.run(|s| s.fetch()).await
    }

    /// Run a sync operation against the wrapped source on the blocking pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut S) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let source = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = source
                .lock()
                .map_err(|_| PriceError::InvalidArgument("source lock poisoned".into()))?;
            f(&mut *guard)
        })
        .await
        .map_err(|e| PriceError::InvalidArgument(format!("Task join error: {e}")))?
    }
}
