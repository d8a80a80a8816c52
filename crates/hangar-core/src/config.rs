// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::sort::SortPreset;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Bump when a field changes meaning; older files are migrated on load.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub top_rated_limit: usize,
    pub most_viewed_limit: usize,
    pub trending_limit: usize,
    /// How far back a view still counts as trending.
    pub trending_window_days: i64,
    pub recent_limit: usize,
    pub default_preset: SortPreset,
    #[serde(default)]
    pub schema_version: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            top_rated_limit: crate::rank::DEFAULT_TOP_RATED_LIMIT,
            most_viewed_limit: 10,
            trending_limit: 10,
            trending_window_days: 7,
            recent_limit: 3,
            default_preset: SortPreset::Rating,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config_path: crate::get_config_root().join("catalog.json"),
        }
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<CatalogConfig> {
        if !self.config_path.exists() {
            log::debug!(
                "[Hangar] No config at {:?}, using defaults",
                self.config_path
            );
            return Ok(CatalogConfig::default());
        }

        let content =
            fs::read_to_string(&self.config_path).context("Failed to read catalog.json")?;
        let mut config = serde_json::from_str::<CatalogConfig>(&content)
            .map_err(|e| {
                log::warn!("[Hangar] JSON parse error for {:?}: {}", self.config_path, e);
                e
            })
            .context("Failed to parse catalog.json")?;

        if config.schema_version < CURRENT_SCHEMA_VERSION {
            log::info!(
                "[Hangar] Migrating catalog.json from schema v{} to v{}",
                config.schema_version,
                CURRENT_SCHEMA_VERSION
            );

            // v1 stored the trending window in hours.
            if config.schema_version <= 1 && config.trending_window_days > 31 {
                config.trending_window_days = (config.trending_window_days + 23) / 24;
                log::info!(
                    "[Hangar] v1→v2: Trending window converted to {} days",
                    config.trending_window_days
                );
            }

            config.schema_version = CURRENT_SCHEMA_VERSION;
            self.save(&config)?;
        }

        log::debug!("[Hangar] Loaded config from {:?}", self.config_path);
        Ok(config)
    }

    pub fn save(&self, config: &CatalogConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }

        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize config")?;
        fs::write(&self.config_path, content).context("Failed to write catalog.json")
    }
}
