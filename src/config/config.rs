use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{TableError, TableResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub pagination: PaginationConfig,
    pub format: FormatConfig,
    pub search: SearchConfig,
    pub identity: IdentityConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Rows per page when a table is first shown
    pub default_page_size: usize,

    /// Sizes offered by the page-size picker
    pub page_size_options: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Prefix for currency cells
    pub currency_symbol: String,

    pub currency_decimals: usize,

    /// chrono format for date-only values
    pub date_format: String,

    /// chrono format for values that carry a time of day
    pub datetime_format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Use fuzzy matching for the global search box instead of substring
    pub fuzzy: bool,

    /// Minimum skim score for a fuzzy hit
    pub fuzzy_threshold: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Field used as the row identity when the caller does not name one
    pub field: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            page_size_options: vec![10, 25, 50, 100],
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            currency_decimals: 2,
            date_format: "%d %b %Y".to_string(),
            datetime_format: "%d %b %Y, %H:%M".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fuzzy: false,
            fuzzy_threshold: 0,
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            field: "id".to_string(),
        }
    }
}

impl GridConfig {
    /// Load config from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load and validate config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: GridConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("paydesk-grid").join("config.toml"))
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> TableResult<()> {
        if self.pagination.default_page_size == 0
            || self.pagination.page_size_options.contains(&0)
        {
            return Err(TableError::InvalidPageSize);
        }
        Ok(())
    }

    /// A default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# paydesk-grid configuration
# Location: ~/.config/paydesk-grid/config.toml (Linux)
#           ~/Library/Application Support/paydesk-grid/config.toml (macOS)

[pagination]
# Rows per page when a table is first shown
default_page_size = 10

# Sizes offered by the page-size picker
page_size_options = [10, 25, 50, 100]

[format]
# Prefix for currency cells
currency_symbol = "₹"
currency_decimals = 2

# chrono format strings
date_format = "%d %b %Y"
datetime_format = "%d %b %Y, %H:%M"

[search]
# Fuzzy matching for the global search box (substring when false)
fuzzy = false
fuzzy_threshold = 0

[identity]
# Field used as the row identity when none is given
field = "id"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GridConfig::default();
        assert_eq!(config.pagination.default_page_size, 10);
        assert_eq!(config.identity.field, "id");
        assert!(!config.search.fuzzy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_commented_default_parses_to_default() {
        let parsed: GridConfig =
            toml::from_str(&GridConfig::create_default_with_comments()).unwrap();
        assert_eq!(parsed, GridConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: GridConfig = toml::from_str("[format]\ncurrency_symbol = \"$\"\n").unwrap();
        assert_eq!(parsed.format.currency_symbol, "$");
        assert_eq!(parsed.format.currency_decimals, 2);
        assert_eq!(parsed.pagination, PaginationConfig::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = GridConfig::default();
        config.pagination.default_page_size = 25;
        config.search.fuzzy = true;
        config.save_to(&path).unwrap();

        let loaded = GridConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[pagination]\ndefault_page_size = 0\n").unwrap();

        let err = GridConfig::load_from(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TableError>(),
            Some(&TableError::InvalidPageSize)
        );
    }
}
