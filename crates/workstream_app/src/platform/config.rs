//! Application configuration, read from a RON file.
//!
//! The file is looked up at `$WORKSTREAM_CONFIG`, falling back to
//! `./workstream.ron`. A missing file means defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use workstream_engine::StreamerSettings;
use workstream_logging::LogDestination;

pub(crate) const CONFIG_ENV: &str = "WORKSTREAM_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "workstream.ron";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StepConfig {
    pub name: String,
    #[serde(default)]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct WorkflowConfig {
    pub steps: Vec<StepConfig>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        let step = |name: &str| StepConfig {
            name: name.to_string(),
            delay_ms: 800,
        };
        Self {
            steps: vec![step("planner"), step("researcher"), step("writer")],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub title: String,
    pub welcome: String,
    pub poll_interval_ms: u64,
    /// Submitted once at startup when non-empty.
    pub initial_prompt: Option<String>,
    pub log_destination: LogDestination,
    pub log_level: String,
    /// Print the transcript as JSON on exit.
    pub transcript_json: bool,
    pub workflow: WorkflowConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Workstream".to_string(),
            welcome: "Welcome to the workstream workflow".to_string(),
            poll_interval_ms: 1000,
            initial_prompt: None,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
            transcript_json: false,
            workflow: WorkflowConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn streamer_settings(&self) -> StreamerSettings {
        StreamerSettings {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

pub(crate) fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

pub(crate) fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config: AppConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.level_filter()?;
    Ok(config)
}
