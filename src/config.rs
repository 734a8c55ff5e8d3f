//! Project configuration loaded from TOML.
//!
//! ```toml
//! # koe.toml
//! daily_liquidated_damages = "12500"
//! notice_grace_days = 14
//! ```

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Per-project contract constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Liquidated damages per day of delay (dagmulkt), in NOK.
    #[serde(default)]
    pub daily_liquidated_damages: Decimal,
    /// Days after discovery before a notice is flagged as late.
    #[serde(default = "default_grace_days")]
    pub notice_grace_days: u32,
}

fn default_grace_days() -> u32 {
    14
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            daily_liquidated_damages: Decimal::ZERO,
            notice_grace_days: default_grace_days(),
        }
    }
}

impl ProjectConfig {
    /// Load from a TOML file. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = toml::from_str(&content).map_err(|e: toml::de::Error| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), ?config, "loaded project config");
        Ok(config)
    }

    /// Parse from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_to_empty_file() {
        let config = ProjectConfig::from_toml_str("").unwrap();
        assert_eq!(config, ProjectConfig::default());
        assert_eq!(config.notice_grace_days, 14);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "daily_liquidated_damages = \"12500.50\"").unwrap();
        writeln!(file, "notice_grace_days = 7").unwrap();

        let config = ProjectConfig::load(file.path()).unwrap();
        assert_eq!(config.daily_liquidated_damages, Decimal::new(1_250_050, 2));
        assert_eq!(config.notice_grace_days, 7);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProjectConfig::load(&dir.path().join("koe.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = ProjectConfig::from_toml_str("notice_grace_days = \"fjorten\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
