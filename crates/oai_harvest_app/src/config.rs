use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use harvest_logging::harvest_info;
use oai_harvest_core::{SubjectAllowList, DEFAULT_METADATA_PREFIX, DEFAULT_SUBJECTS};
use oai_harvest_engine::{DriverSettings, FetchSettings, DEFAULT_ENDPOINT};
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_CONFIG_FILENAME: &str = "oai-harvest.ron";

/// Harvest settings read from a RON file. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    pub endpoint: String,
    pub set: String,
    pub metadata_prefix: String,
    pub allow_list: Vec<String>,
    pub pacing_secs: u64,
    pub transport_retries: u32,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub store_path: PathBuf,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            set: "cs".to_string(),
            metadata_prefix: DEFAULT_METADATA_PREFIX.to_string(),
            allow_list: DEFAULT_SUBJECTS.iter().map(|tag| tag.to_string()).collect(),
            pacing_secs: 5,
            transport_retries: 0,
            request_timeout_secs: 120,
            connect_timeout_secs: 10,
            max_response_bytes: 64 * 1024 * 1024,
            store_path: PathBuf::from("papers.redb"),
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl HarvestConfig {
    /// Reads `path`; a missing file yields the defaults, a malformed one is an error.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()));
            }
        };

        let config = ron::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        harvest_info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn fetch_settings(&self) -> anyhow::Result<FetchSettings> {
        let endpoint = Url::parse(&self.endpoint)
            .with_context(|| format!("invalid endpoint {:?}", self.endpoint))?;
        Ok(FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
            ..FetchSettings::new(endpoint)
        })
    }

    pub fn driver_settings(&self) -> DriverSettings {
        DriverSettings {
            metadata_prefix: self.metadata_prefix.clone(),
            allow_list: SubjectAllowList::new(self.allow_list.iter().cloned()),
            pacing: Duration::from_secs(self.pacing_secs),
            transport_retries: self.transport_retries,
            ..DriverSettings::new(self.set.clone())
        }
    }
}
