use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cycle::DEFAULT_WINDOW_DAYS;
use crate::errors::{CardError, Result};

/// days ahead a payment must be to show up as upcoming
pub const DEFAULT_UPCOMING_HORIZON_DAYS: u32 = 5;

/// default location of the json card store
pub const DEFAULT_STORE_PATH: &str = "cards.json";

/// dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub cycle: CycleConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// cycle calculation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleConfig {
    #[serde(default = "default_window_days")]
    pub availability_window_days: u32,
    #[serde(default = "default_horizon_days")]
    pub upcoming_horizon_days: u32,
}

/// card store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

fn default_horizon_days() -> u32 {
    DEFAULT_UPCOMING_HORIZON_DAYS
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            availability_window_days: DEFAULT_WINDOW_DAYS,
            upcoming_horizon_days: DEFAULT_UPCOMING_HORIZON_DAYS,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl CycleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.availability_window_days == 0 {
            return Err(CardError::InvalidConfiguration {
                message: "cycle.availability_window_days must be at least 1".to_string(),
            });
        }
        if self.upcoming_horizon_days > 31 {
            return Err(CardError::InvalidConfiguration {
                message: format!(
                    "cycle.upcoming_horizon_days is {}, cannot exceed 31",
                    self.upcoming_horizon_days
                ),
            });
        }
        Ok(())
    }
}

impl DashboardConfig {
    /// parse and validate a toml document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DashboardConfig =
            toml::from_str(content).map_err(|e| CardError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        self.cycle.validate()?;
        if self.storage.path.as_os_str().is_empty() {
            return Err(CardError::InvalidConfiguration {
                message: "storage.path must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// override the store location, e.g. from a command line flag
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage.path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.cycle.availability_window_days, 10);
        assert_eq!(config.cycle.upcoming_horizon_days, 5);
        assert_eq!(config.storage.path, PathBuf::from("cards.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DashboardConfig::from_toml_str(
            r#"
            [cycle]
            upcoming_horizon_days = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.cycle.upcoming_horizon_days, 7);
        assert_eq!(config.cycle.availability_window_days, 10);
        assert_eq!(config.storage, StorageConfig::default());

        let empty = DashboardConfig::from_toml_str("").unwrap();
        assert_eq!(empty, DashboardConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let zero_window = DashboardConfig::from_toml_str(
            r#"
            [cycle]
            availability_window_days = 0
            "#,
        );
        assert!(matches!(zero_window, Err(CardError::InvalidConfiguration { .. })));

        let wide_horizon = DashboardConfig::from_toml_str(
            r#"
            [cycle]
            upcoming_horizon_days = 40
            "#,
        );
        assert!(wide_horizon.is_err());

        let malformed = DashboardConfig::from_toml_str("[cycle\nbroken");
        assert!(matches!(malformed, Err(CardError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[storage]\npath = \"/tmp/my-cards.json\"").unwrap();

        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.storage.path, PathBuf::from("/tmp/my-cards.json"));

        let overridden = config.with_store_path("other.json");
        assert_eq!(overridden.storage.path, PathBuf::from("other.json"));
    }
}
