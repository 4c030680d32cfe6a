//! Record sources: where raw records come from.
//!
//! A source fetches a JSON payload (from disk or over HTTP), then unwraps the
//! response envelope into a list of [`RawRecord`]s. Sources do no
//! normalization and no retrying; they only hand records to the pipeline.

use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use serde_json::Value;

use crate::config;
use crate::error::{PriceError, Result};
use crate::fields::FieldPath;
use crate::models::RawRecord;

/// Anything that can supply a batch of raw records.
pub trait RecordSource {
    fn fetch(&mut self) -> Result<Vec<RawRecord>>;
}

impl RecordSource for Vec<RawRecord> {
    fn fetch(&mut self) -> Result<Vec<RawRecord>> {
        Ok(self.clone())
    }
}

// ---------------------------------------------------------------------------
// Envelope unwrapping
// ---------------------------------------------------------------------------

/// Pull the record list out of an API payload.
///
/// A top-level array is used directly. For an object, the first envelope key
/// holding an array wins. Non-object array elements are skipped.
pub fn extract_records(payload: &Value, envelope_keys: &[FieldPath]) -> Vec<RawRecord> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(map) => {
            let found = envelope_keys
                .iter()
                .find_map(|key| key.get(map).and_then(|v| v.as_array()));
            match found {
                Some(items) => items,
                None => {
                    log::warn!(
                        "payload has none of the envelope keys [{}]",
                        envelope_keys
                            .iter()
                            .map(|k| k.to_string())
                            .collect::<Vec<_>>()
                            .join(", ")
                    );
                    return Vec::new();
                }
            }
        }
        _ => return Vec::new(),
    };

    let records: Vec<RawRecord> = items
        .iter()
        .filter_map(|item| item.as_object().cloned())
        .collect();
    if records.len() < items.len() {
        log::debug!(
            "skipped {} non-object entries in payload",
            items.len() - records.len()
        );
    }
    records
}

fn default_envelope() -> Vec<FieldPath> {
    config::default_envelope_keys()
        .into_iter()
        .map(FieldPath::parse)
        .collect()
}

// ---------------------------------------------------------------------------
// JsonFileSource
// ---------------------------------------------------------------------------

/// Reads records from a JSON file on disk (`.gz` is decompressed
/// transparently).
pub struct JsonFileSource {
    path: PathBuf,
    envelope_keys: Vec<FieldPath>,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            envelope_keys: default_envelope(),
        }
    }

    /// Replace the envelope keys searched in object payloads.
    pub fn envelope_keys(mut self, keys: &[&str]) -> Self {
        self.envelope_keys = keys.iter().map(|k| FieldPath::parse(k)).collect();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and parse the file.
    pub fn load_json(&self) -> Result<Value> {
        if !self.path.exists() {
            return Err(PriceError::NotFound(format!(
                "record file {} does not exist",
                self.path.display()
            )));
        }

        let contents = if self.path.extension().and_then(|e| e.to_str()) == Some("gz") {
            let file = fs::File::open(&self.path)?;
            let decoder = GzDecoder::new(BufReader::new(file));
            let mut buf_reader = BufReader::new(decoder);
            let mut contents = String::new();
            buf_reader.read_to_string(&mut contents)?;
            contents
        } else {
            fs::read_to_string(&self.path)?
        };

        Ok(serde_json::from_str(&contents)?)
    }
}

impl RecordSource for JsonFileSource {
    fn fetch(&mut self) -> Result<Vec<RawRecord>> {
        let payload = self.load_json()?;
        Ok(extract_records(&payload, &self.envelope_keys))
    }
}

// ---------------------------------------------------------------------------
// HttpJsonSource
// ---------------------------------------------------------------------------

/// Fetches records with a single blocking `GET` returning JSON.
///
/// The caller supplies the full URL, query pairs and headers (including any
/// `Authorization` header); no request shaping or retrying happens here.
pub struct HttpJsonSource {
    url: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    timeout: Duration,
    limit: Option<usize>,
    envelope_keys: Vec<FieldPath>,
}

impl HttpJsonSource {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            query: Vec::new(),
            headers: Vec::new(),
            timeout: config::DEFAULT_TIMEOUT,
            limit: None,
            envelope_keys: default_envelope(),
        }
    }

    /// Append a query-string pair.
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a request header.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Set the request timeout. Defaults to 20 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Keep at most `n` records from each response.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Replace the envelope keys searched in object payloads.
    pub fn envelope_keys(mut self, keys: &[&str]) -> Self {
        self.envelope_keys = keys.iter().map(|k| FieldPath::parse(k)).collect();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Build the HTTP client for one fetch.
    ///
    /// Built and dropped inside `fetch` so a blocking client is never dropped
    /// on an async worker thread (see `AsyncRecordSource`).
    fn client(&self) -> Result<Client> {
        Ok(Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?)
    }
}

impl RecordSource for HttpJsonSource {
    fn fetch(&mut self) -> Result<Vec<RawRecord>> {
        let client = self.client()?;
        log::info!("Fetching {}", self.url);

        let mut request = client.get(&self.url).query(&self.query);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let payload: Value = request.send()?.error_for_status()?.json()?;
        let mut records = extract_records(&payload, &self.envelope_keys);
        if let Some(n) = self.limit {
            records.truncate(n);
        }
        Ok(records)
    }
}
