use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};

use crate::data::source::{DatasetSource, FileSource, HttpSource};

/// data.gov.sg "Average Daily Public Transport Ridership" resource.
pub const DEFAULT_ENDPOINT: &str =
    "https://data.gov.sg/api/action/datastore_search?resource_id=d_75248cf2fbf340de6a746dc91ec9223c";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_API_URL: &str = "RIDERSHIP_API_URL";
const ENV_TIMEOUT: &str = "RIDERSHIP_TIMEOUT_SECS";
const ENV_FILE: &str = "RIDERSHIP_FILE";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceConfig {
    Http { endpoint: String, timeout: Duration },
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source: SourceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::Http {
                endpoint: DEFAULT_ENDPOINT.to_string(),
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            },
        }
    }
}

impl Config {
    /// Read `RIDERSHIP_API_URL`, `RIDERSHIP_TIMEOUT_SECS` and `RIDERSHIP_FILE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(path) = lookup(ENV_FILE).filter(|p| !p.trim().is_empty()) {
            return Ok(Config {
                source: SourceConfig::File(PathBuf::from(path)),
            });
        }

        let endpoint = match lookup(ENV_API_URL) {
            Some(url) if url.trim().is_empty() => bail!("{ENV_API_URL} is set but empty"),
            Some(url) => url.trim().to_string(),
            None => DEFAULT_ENDPOINT.to_string(),
        };

        let timeout_secs = match lookup(ENV_TIMEOUT) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{ENV_TIMEOUT}={raw:?} is not a whole number of seconds"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("{ENV_TIMEOUT} must be positive");
        }

        Ok(Config {
            source: SourceConfig::Http {
                endpoint,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }

    pub fn into_source(self) -> Box<dyn DatasetSource> {
        match self.source {
            SourceConfig::Http { endpoint, timeout } => Box::new(HttpSource::new(endpoint, timeout)),
            SourceConfig::File(path) => Box::new(FileSource::new(path)),
        }
    }
}
