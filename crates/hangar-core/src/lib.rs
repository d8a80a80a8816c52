// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod config;
pub mod filter;
pub mod model;
pub mod normalize;
pub mod query;
pub mod rank;
pub mod reviews;
pub mod sort;
pub mod summary;

pub use filter::{filter_records, FilterCriteria, PriceRange};
pub use model::{AircraftRecord, Compatibility, PriceType};
pub use normalize::{normalize_all, NormalizedAircraft};
pub use query::{CatalogQuery, QueryOutcome};
pub use sort::{sort_records, SortDirection, SortKey, SortPreset, SortSpec};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),
    #[error("Unknown sort preset: {0}")]
    UnknownPreset(String),
    #[error("Invalid price range: [{min}, {max}]")]
    InvalidPriceRange { min: f64, max: f64 },
    #[error("Rating for {dimension} must be between 1 and 5, got {value}")]
    RatingOutOfRange { dimension: &'static str, value: u8 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Root folder for Hangar's own settings (`catalog.json`).
pub fn get_config_root() -> PathBuf {
    directories::ProjectDirs::from("org", "hangar", "Hangar")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".hangar"))
}
