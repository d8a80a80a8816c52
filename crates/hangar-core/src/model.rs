// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum PriceType {
    Paid,
    Freeware,
    /// Anything the backend sent that is neither of the above, or nothing at all.
    #[default]
    #[serde(other)]
    Unknown,
}

impl PriceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceType::Paid => "Paid",
            PriceType::Freeware => "Freeware",
            PriceType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PriceType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "paid" => PriceType::Paid,
            "freeware" | "free" => PriceType::Freeware,
            _ => PriceType::Unknown,
        })
    }
}

/// Simulator compatibility as the backend stores it. Older documents carry a
/// single comma separated string, newer ones a proper list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Compatibility {
    List(Vec<String>),
    Delimited(String),
}

impl Default for Compatibility {
    fn default() -> Self {
        Compatibility::List(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AircraftRecord {
    pub id: String,
    pub name: String,
    /// Add-on studio (PMDG, Fenix, FlyByWire...)
    #[serde(default, deserialize_with = "null_as_default")]
    pub developer: String,
    /// Real-world manufacturer (Boeing, Airbus, Cessna...)
    #[serde(default, deserialize_with = "null_as_default")]
    pub aircraft_manufacturer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aircraft_model: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variant: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_type: PriceType,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub compatibility: Compatibility,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_reviews: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub view_count: u64,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_viewed: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_archived: bool,
}

impl AircraftRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_freeware(&self) -> bool {
        self.price_type == PriceType::Freeware
    }

    /// Parses a JSON array of records as served by `/api/aircraft`.
    pub fn from_json_list(json: &str) -> Result<Vec<AircraftRecord>, crate::CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a saved catalog snapshot from disk.
    pub fn from_json_file(path: &Path) -> Result<Vec<AircraftRecord>, crate::CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_list(&content)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Accepts naive ISO timestamps (what the backend emits) as well as RFC 3339
// with an offset. Anything unreadable becomes None instead of failing the record.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| parse_timestamp(&s)))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.naive_utc());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f").ok()
}
