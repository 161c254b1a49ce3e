//! Dashboard configuration file
//!
//! Optional TOML file providing defaults for the dashboard parameters.
//! Command-line flags override whatever the file sets.
//!
//! ```toml
//! domain = "chat.example.com"
//! include = ["/org/"]
//! exclude = ["health", "metrics"]
//! unit = "milliseconds"
//! statistic = "p90"
//! title = "Push gateway latency"
//! ```

use crate::dashboard::DashboardParams;
use crate::filter::{DomainSelector, PatternSet, RecordFilter};
use crate::stats::Statistic;
use crate::units::TimeUnit;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Parameter defaults read from a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// `"All"` or one exact domain
    pub domain: DomainSelector,

    /// URL substrings, any of which keeps a record
    pub include: PatternSet,

    /// URL substrings, any of which drops a record
    pub exclude: PatternSet,

    pub unit: TimeUnit,

    pub statistic: Statistic,

    /// Page title for HTML reports
    pub title: String,
}

fn default_title() -> String {
    "Target Processing Time Dashboard".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            domain: DomainSelector::All,
            include: PatternSet::default(),
            exclude: PatternSet::default(),
            unit: TimeUnit::Seconds,
            statistic: Statistic::Average,
            title: default_title(),
        }
    }
}

impl DashboardConfig {
    /// Parse a config from TOML text; `path` is only used in errors
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text, path)?;
        tracing::debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn params(&self) -> DashboardParams {
        DashboardParams::new(
            RecordFilter::new(
                self.domain.clone(),
                self.include.clone(),
                self.exclude.clone(),
            ),
            self.unit,
            self.statistic,
        )
    }
}
