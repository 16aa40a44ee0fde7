//! View configuration stored in ~/.grew/config.json.
//!
//! Every field has a serde default, so an empty object (or a missing file)
//! yields the stock settings.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Label shown when a profile's category cannot be resolved.
pub const DEFAULT_CATEGORY_LABEL: &str = "카테고리 정보 없음";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrewConfig {
    #[serde(default = "default_review_page_size")]
    pub review_page_size: u32,
    #[serde(default = "default_board_page_size")]
    pub board_page_size: u32,
    /// Number of page buttons in one pagination window.
    #[serde(default = "default_pages_to_show")]
    pub pages_to_show: u32,
    /// Where the screen redirects after a fatal load failure.
    #[serde(default = "default_listing_route")]
    pub listing_route: String,
    #[serde(default = "default_category_fallback")]
    pub category_fallback: String,
    #[serde(default = "default_report_page_size")]
    pub report_page_size: u32,
}

fn default_review_page_size() -> u32 {
    5
}

fn default_board_page_size() -> u32 {
    5
}

fn default_pages_to_show() -> u32 {
    crate::pagination::PAGES_TO_SHOW
}

fn default_listing_route() -> String {
    "/mentor-profile".to_string()
}

fn default_category_fallback() -> String {
    DEFAULT_CATEGORY_LABEL.to_string()
}

fn default_report_page_size() -> u32 {
    10
}

impl Default for GrewConfig {
    fn default() -> Self {
        Self {
            review_page_size: default_review_page_size(),
            board_page_size: default_board_page_size(),
            pages_to_show: default_pages_to_show(),
            listing_route: default_listing_route(),
            category_fallback: default_category_fallback(),
            report_page_size: default_report_page_size(),
        }
    }
}

impl GrewConfig {
    /// Zero sizes would make every page empty and the window degenerate.
    fn normalized(mut self) -> Self {
        self.review_page_size = self.review_page_size.max(1);
        self.board_page_size = self.board_page_size.max(1);
        self.pages_to_show = self.pages_to_show.max(1);
        self.report_page_size = self.report_page_size.max(1);
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not find home directory")]
    NoHomeDir,
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".grew").join("config.json"))
}

/// Load the user config, falling back to defaults when the file does not exist.
pub fn load_config() -> Result<GrewConfig, ConfigError> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<GrewConfig, ConfigError> {
    if !path.exists() {
        log::info!("No config at {}, using defaults", path.display());
        return Ok(GrewConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: GrewConfig = serde_json::from_str(&content)?;
    Ok(config.normalized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config_from(&temp.path().join("config.json")).unwrap();
        assert_eq!(config, GrewConfig::default());
        assert_eq!(config.pages_to_show, 10);
        assert_eq!(config.category_fallback, DEFAULT_CATEGORY_LABEL);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{ "reviewPageSize": 3, "listingRoute": "/mentors" }"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.review_page_size, 3);
        assert_eq!(config.listing_route, "/mentors");
        assert_eq!(config.board_page_size, 5);
    }

    #[test]
    fn test_zero_sizes_are_normalized() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{ "reviewPageSize": 0, "pagesToShow": 0 }"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.review_page_size, 1);
        assert_eq!(config.pages_to_show, 1);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
