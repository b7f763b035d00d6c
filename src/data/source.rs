use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{FieldValue, Record};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API returned error status {0}")]
    Status(reqwest::StatusCode),

    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response has no result.records array")]
    MissingRecords,
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Anything that can produce the full ridership table in one go.
pub trait DatasetSource: Send {
    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<Vec<Record>, FetchError>;
}

/// The datastore API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    endpoint: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        HttpSource {
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

impl DatasetSource for HttpSource {
    fn describe(&self) -> String {
        self.endpoint.clone()
    }

    fn fetch(&self) -> Result<Vec<Record>, FetchError> {
        let client = blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(FetchError::Client)?;

        let response = client
            .get(&self.endpoint)
            .send()
            .map_err(|source| FetchError::Request {
                url: self.endpoint.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.text().map_err(|source| FetchError::Request {
            url: self.endpoint.clone(),
            source,
        })?;

        parse_response(&body)
    }
}

/// A saved datastore response on disk. Read-only.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<Record>, FetchError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| FetchError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_response(&text)
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Expected JSON schema (CKAN `datastore_search`):
///
/// ```json
/// {
///   "result": {
///     "records": [
///       { "_id": 1, "year": "1995", "type_of_public_transport": "MRT", "average_ridership": "740" },
///       ...
///     ]
///   }
/// }
/// ```
///
/// Only `year`, `type_of_public_transport` and `average_ridership` are kept.
pub fn parse_response(body: &str) -> Result<Vec<Record>, FetchError> {
    let envelope: Envelope = serde_json::from_str(body)?;

    let records = envelope
        .result
        .as_ref()
        .and_then(|r| r.get("records"))
        .and_then(JsonValue::as_array)
        .ok_or(FetchError::MissingRecords)?;

    Ok(records.iter().map(json_to_record).collect())
}

/// The CKAN envelope; `result` stays untyped so a valid body of the wrong
/// shape is a missing-records error rather than a parse error.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    result: Option<JsonValue>,
}

fn json_to_record(val: &JsonValue) -> Record {
    let Some(obj) = val.as_object() else {
        log::debug!("Skipping fields of non-object record {val}");
        return Record::default();
    };
    let field = |key: &str| obj.get(key).and_then(FieldValue::from_json);
    Record::new(
        field("year"),
        field("type_of_public_transport"),
        field("average_ridership"),
    )
}
