// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! TOML configuration.
//!
//! Lookup order: an explicit `--config` path (must exist), then `uml-tutor.toml` in the
//! working directory, then built-in defaults. Every field is optional.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::exercise::Rewards;
use crate::layout::GridLayoutOptions;
use crate::store::{WriteDurability, DEFAULT_KEY_PREFIX};

pub const LOCAL_CONFIG_FILE: &str = "uml-tutor.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse configuration {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub storage: StorageConfig,
    pub layout: GridLayoutOptions,
    pub rewards: Rewards,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub dir: PathBuf,
    pub key_prefix: String,
    pub durable_writes: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".uml-tutor"),
            key_prefix: DEFAULT_KEY_PREFIX.to_owned(),
            durable_writes: false,
        }
    }
}

impl StorageConfig {
    pub fn durability(&self) -> WriteDurability {
        WriteDurability::from_durable_flag(self.durable_writes)
    }
}

impl Config {
    pub fn from_toml_str(source: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source, path)
    }

    /// Loads `explicit_path`, or the local config file when present, or the defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit_path {
            info!(target: "uml_tutor::config", path = %path.display(), "loading configuration");
            return Self::load_file(path);
        }

        let local = Path::new(LOCAL_CONFIG_FILE);
        if local.is_file() {
            info!(target: "uml_tutor::config", path = %local.display(), "loading configuration");
            return Self::load_file(local);
        }

        Ok(Self::default())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.columns == 0 {
            return Err(ConfigError::Invalid("layout.columns must be at least 1".to_owned()));
        }
        if self.layout.checked_canvas_size(1).is_none() {
            return Err(ConfigError::Invalid(
                "layout geometry is too large for the canvas".to_owned(),
            ));
        }
        if self.storage.key_prefix.is_empty() || self.storage.key_prefix.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(
                "storage.key_prefix must be non-empty and contain no path separators".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use rstest::rstest;

    use super::{Config, ConfigError};
    use crate::store::WriteDurability;

    fn parse(source: &str) -> Result<Config, ConfigError> {
        Config::from_toml_str(source, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse("").expect("config");
        assert_eq!(config, Config::default());
        assert_eq!(config.storage.dir, PathBuf::from(".uml-tutor"));
        assert_eq!(config.storage.key_prefix, "uml-challenge");
        assert_eq!(config.storage.durability(), WriteDurability::BestEffort);
        assert_eq!(config.layout.columns, 3);
        assert_eq!((config.rewards.clean_points, config.rewards.hinted_points), (150, 100));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = parse(
            r#"
            [storage]
            durable_writes = true

            [layout]
            columns = 4

            [rewards]
            hinted_points = 75
            "#,
        )
        .expect("config");

        assert_eq!(config.storage.durability(), WriteDurability::Durable);
        assert_eq!(config.storage.key_prefix, "uml-challenge");
        assert_eq!(config.layout.columns, 4);
        assert_eq!(config.layout.node_width, 220);
        assert_eq!(config.rewards.clean_points, 150);
        assert_eq!(config.rewards.hinted_points, 75);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(parse("[storage]\npath = \"x\""), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn zero_columns_are_invalid() {
        assert!(matches!(parse("[layout]\ncolumns = 0"), Err(ConfigError::Invalid(_))));
    }

    #[rstest]
    #[case("[layout]\nnode_width = 4000000000")]
    #[case("[layout]\ncolumns = 100000\ngap_x = 100000")]
    #[case("[layout]\nmargin = 3000000000")]
    #[case("[layout]\nnode_height = 4294967295\ngap_y = 1")]
    fn oversized_layout_geometry_is_invalid(#[case] source: &str) {
        assert!(matches!(parse(source), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_explicit_file_is_a_read_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here/uml-tutor.toml")))
            .expect_err("missing file");
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
