//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use alma_portfolio::PortfolioConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where intervention data lives
    #[serde(default)]
    pub data: DataConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Portfolio engine configuration
    #[serde(default)]
    pub portfolio: PortfolioConfig,
}

/// Data source locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// SQLite database path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    /// JSON snapshot path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<String>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// Resolved data source for a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// SQLite database
    Database(PathBuf),
    /// JSON snapshot file
    Snapshot(PathBuf),
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".alma").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::path()?)
    }

    /// Load configuration from a file, or defaults if it does not exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.portfolio.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Pick the data source: command-line flags first, then the config file.
    pub fn data_source(&self, db: Option<&str>, snapshot: Option<&str>) -> Result<DataSource> {
        if let Some(path) = snapshot {
            return Ok(DataSource::Snapshot(PathBuf::from(path)));
        }
        if let Some(path) = db {
            return Ok(DataSource::Database(PathBuf::from(path)));
        }
        if let Some(path) = &self.data.snapshot {
            return Ok(DataSource::Snapshot(PathBuf::from(path)));
        }
        if let Some(path) = &self.data.database {
            return Ok(DataSource::Database(PathBuf::from(path)));
        }
        Err(CliError::Config(
            "No data source configured. Pass --db or --snapshot, or set [data] in the config file".to_string(),
        ))
    }

    /// Database path for commands that write, from the flag or the config file.
    pub fn database(&self, db: Option<&str>) -> Result<PathBuf> {
        db.map(str::to_string)
            .or_else(|| self.data.database.clone())
            .map(PathBuf::from)
            .ok_or_else(|| {
                CliError::Config("No database configured. Pass --db or set [data] database".to_string())
            })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
