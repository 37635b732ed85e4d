//! Configuration for the prompt studio

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Studio configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Wildcard directory (`.txt` lists and `.yaml` tag files)
    pub wildcards_dir: Option<PathBuf>,

    /// LoRA model directory
    pub loras_dir: Option<PathBuf>,

    /// Catalog snapshot file (JSON); takes precedence over directories
    pub catalog_snapshot: Option<PathBuf>,

    /// Maximum directory scan depth
    pub scan_depth: usize,

    /// Maximum popup height in rows (entries shown at once)
    pub popup_height: u16,

    /// Popup width in columns
    pub popup_width: u16,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            wildcards_dir: None,
            loras_dir: None,
            catalog_snapshot: None,
            scan_depth: 4,
            popup_height: 12,
            popup_width: 44,
        }
    }
}

impl StudioConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StudioConfig::default();
        assert_eq!(config.scan_depth, 4);
        assert!(config.wildcards_dir.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: StudioConfig =
            toml::from_str("wildcards_dir = \"/data/wildcards\"\npopup_height = 8\n").unwrap();
        assert_eq!(config.wildcards_dir, Some(PathBuf::from("/data/wildcards")));
        assert_eq!(config.popup_height, 8);
        assert_eq!(config.scan_depth, 4);
    }
}
