//! Plugin configuration: the registered-size tables.
//!
//! Two layers feed size resolution, mirroring how the host CMS registers
//! intermediate sizes:
//!
//! - `[sizes.*]` — the global default definition for each stock size name.
//!   Shipped defaults cover the platform's standard intermediate sizes
//!   (`thumbnail`, `medium`, `medium_large`, `large`).
//! - `[theme_sizes.*]` — theme-registered overrides and additions. An entry
//!   here wins over the global default for the same name.
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Widen the medium breakpoint, add a cropped hero size
//! [sizes.medium]
//! width = 400
//! height = 400
//!
//! [theme_sizes.hero]
//! width = 1600
//! height = 900
//! crop = true
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Width/height/crop for one registered size. Zero means unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizeOptions {
    pub width: u32,
    pub height: u32,
    pub crop: bool,
}

impl Default for SizeOptions {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            crop: false,
        }
    }
}

/// Plugin configuration loaded from `mirrorpix.toml`.
///
/// All fields have defaults; user config files need only specify the values
/// they want to override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginConfig {
    /// Global default definition per stock size name.
    pub sizes: BTreeMap<String, SizeOptions>,
    /// Theme-registered overrides; win over `sizes` entries by name.
    pub theme_sizes: BTreeMap<String, SizeOptions>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        let mut sizes = BTreeMap::new();
        sizes.insert(
            "thumbnail".to_string(),
            SizeOptions {
                width: 150,
                height: 150,
                crop: true,
            },
        );
        sizes.insert(
            "medium".to_string(),
            SizeOptions {
                width: 300,
                height: 300,
                crop: false,
            },
        );
        sizes.insert(
            "medium_large".to_string(),
            SizeOptions {
                width: 768,
                height: 0,
                crop: false,
            },
        );
        sizes.insert(
            "large".to_string(),
            SizeOptions {
                width: 1024,
                height: 1024,
                crop: false,
            },
        );
        Self {
            sizes,
            theme_sizes: BTreeMap::new(),
        }
    }
}

impl PluginConfig {
    /// Load configuration from a TOML file, layered over the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let user: PluginConfig = toml::from_str(&content)?;
        Ok(Self::default().merge(user))
    }

    /// Parse configuration from a TOML string without touching the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Merge `other` over `self`: entries in `other` replace same-named
    /// entries here, everything else is kept.
    pub fn merge(mut self, other: PluginConfig) -> Self {
        self.sizes.extend(other.sizes);
        self.theme_sizes.extend(other.theme_sizes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // =========================================================================
    // Defaults
    // =========================================================================

    #[test]
    fn default_carries_stock_sizes() {
        let config = PluginConfig::default();
        assert_eq!(
            config.sizes["thumbnail"],
            SizeOptions {
                width: 150,
                height: 150,
                crop: true
            }
        );
        assert_eq!(config.sizes["medium"].width, 300);
        assert_eq!(config.sizes["medium_large"].height, 0);
        assert_eq!(config.sizes["large"].width, 1024);
        assert!(config.theme_sizes.is_empty());
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    #[test]
    fn parse_sparse_config() {
        let config = PluginConfig::from_toml_str(
            r#"
            [sizes.medium]
            width = 400
            height = 400
            "#,
        )
        .unwrap();

        assert_eq!(config.sizes["medium"].width, 400);
        // Sparse: only the named table is present
        assert!(!config.sizes.contains_key("thumbnail"));
    }

    #[test]
    fn parse_omitted_fields_default_to_zero() {
        let config = PluginConfig::from_toml_str(
            r#"
            [theme_sizes.wide]
            width = 1200
            "#,
        )
        .unwrap();

        let wide = config.theme_sizes["wide"];
        assert_eq!(wide.width, 1200);
        assert_eq!(wide.height, 0);
        assert!(!wide.crop);
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        let result = PluginConfig::from_toml_str(
            r#"
            [sizes.medium]
            widht = 400
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn parse_rejects_unknown_top_level_table() {
        let result = PluginConfig::from_toml_str("[breakpoints]\nmax = 2000\n");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // Merging
    // =========================================================================

    #[test]
    fn merge_replaces_same_named_entries() {
        let user = PluginConfig::from_toml_str(
            r#"
            [sizes.medium]
            width = 500
            height = 0
            "#,
        )
        .unwrap();

        let merged = PluginConfig::default().merge(user);
        assert_eq!(merged.sizes["medium"].width, 500);
        // Untouched defaults survive
        assert_eq!(merged.sizes["thumbnail"].width, 150);
    }

    #[test]
    fn merge_adds_theme_sizes() {
        let user = PluginConfig::from_toml_str(
            r#"
            [theme_sizes.hero]
            width = 1600
            height = 900
            crop = true
            "#,
        )
        .unwrap();

        let merged = PluginConfig::default().merge(user);
        assert!(merged.theme_sizes["hero"].crop);
        assert_eq!(merged.sizes.len(), 4);
    }

    // =========================================================================
    // File loading
    // =========================================================================

    #[test]
    fn load_layers_file_over_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mirrorpix.toml");
        std::fs::write(
            &path,
            r#"
            [sizes.large]
            width = 2048
            height = 2048
            "#,
        )
        .unwrap();

        let config = PluginConfig::load(&path).unwrap();
        assert_eq!(config.sizes["large"].width, 2048);
        assert_eq!(config.sizes["medium"].width, 300);
    }

    #[test]
    fn load_missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let result = PluginConfig::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
