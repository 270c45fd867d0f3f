use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::store::DEFAULT_DB_FILE;

/// Directory name used for project-level and user-level settings
pub const CONFIG_DIR: &str = ".crowdfund";

/// A validation error in the configuration
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]: {}", self.field, self.message)
    }
}

/// Where the data file lives
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Session journal settings
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct JournalConfig {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// How amounts are shown
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DisplayConfig {
    #[serde(default)]
    pub currency: Option<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub journal: JournalConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from default paths
    /// Priority: local (.crowdfund/config.local.toml) > project (.crowdfund/config.toml)
    /// > user (~/.crowdfund/config.toml)
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(CONFIG_DIR).join("config.toml");
            if user_config.exists() {
                config.merge(Self::load_from(&user_config)?);
            }
        }

        let project_config = Path::new(CONFIG_DIR).join("config.toml");
        if project_config.exists() {
            config.merge(Self::load_from(&project_config)?);
        }

        // Should be gitignored
        let local_config = Path::new(CONFIG_DIR).join("config.local.toml");
        if local_config.exists() {
            config.merge(Self::load_from(&local_config)?);
        }

        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes priority for fields it sets)
    pub fn merge(&mut self, other: Config) {
        if other.storage.path.is_some() {
            self.storage.path = other.storage.path;
        }
        if other.journal.enabled.is_some() {
            self.journal.enabled = other.journal.enabled;
        }
        if other.journal.dir.is_some() {
            self.journal.dir = other.journal.dir;
        }
        if other.display.currency.is_some() {
            self.display.currency = other.display.currency;
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.storage
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
    }

    pub fn journal_enabled(&self) -> bool {
        self.journal.enabled.unwrap_or(true)
    }

    pub fn journal_dir(&self) -> PathBuf {
        self.journal
            .dir
            .clone()
            .unwrap_or_else(|| Path::new(CONFIG_DIR).join("sessions"))
    }

    pub fn currency(&self) -> &str {
        self.display.currency.as_deref().unwrap_or("EGP")
    }

    /// Validate configuration and return any errors found
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(path) = &self.storage.path {
            if path.as_os_str().is_empty() {
                errors.push(ValidationError {
                    field: "storage.path".to_string(),
                    message: "Must not be empty".to_string(),
                });
            } else if path.is_dir() {
                errors.push(ValidationError {
                    field: "storage.path".to_string(),
                    message: format!("'{}' is a directory", path.display()),
                });
            }
        }

        if let Some(dir) = &self.journal.dir {
            if dir.as_os_str().is_empty() {
                errors.push(ValidationError {
                    field: "journal.dir".to_string(),
                    message: "Must not be empty".to_string(),
                });
            }
        }

        if let Some(currency) = &self.display.currency {
            if currency.trim().is_empty() {
                errors.push(ValidationError {
                    field: "display.currency".to_string(),
                    message: "Must not be blank".to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
