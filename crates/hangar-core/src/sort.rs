// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::model::AircraftRecord;
use crate::normalize::NormalizedAircraft;
use crate::CatalogError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Developer,
    AircraftManufacturer,
    AircraftModel,
    Variant,
    Category,
    PriceType,
    Price,
    AverageRating,
    ViewCount,
    TotalReviews,
    ReleaseDate,
}

impl SortKey {
    pub const ALL: [SortKey; 12] = [
        SortKey::Name,
        SortKey::Developer,
        SortKey::AircraftManufacturer,
        SortKey::AircraftModel,
        SortKey::Variant,
        SortKey::Category,
        SortKey::PriceType,
        SortKey::Price,
        SortKey::AverageRating,
        SortKey::ViewCount,
        SortKey::TotalReviews,
        SortKey::ReleaseDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Developer => "developer",
            SortKey::AircraftManufacturer => "aircraft_manufacturer",
            SortKey::AircraftModel => "aircraft_model",
            SortKey::Variant => "variant",
            SortKey::Category => "category",
            SortKey::PriceType => "price_type",
            SortKey::Price => "price",
            SortKey::AverageRating => "average_rating",
            SortKey::ViewCount => "view_count",
            SortKey::TotalReviews => "total_reviews",
            SortKey::ReleaseDate => "release_date",
        }
    }

    pub fn extract(&self, aircraft: &NormalizedAircraft) -> SortValue {
        let record = aircraft.record;
        match self {
            SortKey::Name => SortValue::text(&record.name),
            SortKey::Developer => SortValue::text(&record.developer),
            SortKey::AircraftManufacturer => SortValue::text(&record.aircraft_manufacturer),
            SortKey::AircraftModel => SortValue::text(&record.aircraft_model),
            SortKey::Variant => SortValue::text(&record.variant),
            SortKey::Category => SortValue::text(&record.category),
            SortKey::PriceType => SortValue::text(record.price_type.as_str()),
            SortKey::Price => SortValue::Number(aircraft.sort_price()),
            SortKey::AverageRating => SortValue::Number(record.average_rating),
            SortKey::ViewCount => SortValue::Number(record.view_count as f64),
            SortKey::TotalReviews => SortValue::Number(f64::from(record.total_reviews)),
            SortKey::ReleaseDate => {
                SortValue::text(record.release_date.as_deref().unwrap_or_default())
            }
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SortKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| CatalogError::UnknownSortKey(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Total order over floats. NaN ranks as 0 and both zeros are equal.
pub(crate) fn compare_numbers(a: f64, b: f64) -> Ordering {
    fn canonical(v: f64) -> f64 {
        if v.is_nan() || v == 0.0 {
            0.0
        } else {
            v
        }
    }
    canonical(a).total_cmp(&canonical(b))
}

/// Extracted comparison key. Strings are already lowercased.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(f64),
}

impl SortValue {
    fn text(raw: &str) -> Self {
        SortValue::Text(raw.to_lowercase())
    }

    fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => compare_numbers(*a, *b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            // A key never mixes kinds; numbers first keeps the order total anyway.
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }

    /// Column-header behaviour: clicking the active ascending column flips it,
    /// anything else starts ascending.
    pub fn toggle(current: Option<SortSpec>, key: SortKey) -> SortSpec {
        match current {
            Some(spec) if spec.key == key && spec.direction == SortDirection::Ascending => {
                SortSpec::descending(key)
            }
            _ => SortSpec::ascending(key),
        }
    }

    /// Descending inverts the comparison, so ties still compare Equal.
    pub fn compare(&self, a: &NormalizedAircraft, b: &NormalizedAircraft) -> Ordering {
        self.direction
            .apply(self.key.extract(a).compare(&self.key.extract(b)))
    }
}

/// Returns a new, stably ordered vector. The input is left as it was.
pub fn sort_records<'a>(
    records: &[&'a AircraftRecord],
    spec: &SortSpec,
) -> Vec<&'a AircraftRecord> {
    let mut keyed: Vec<(SortValue, &'a AircraftRecord)> = records
        .iter()
        .map(|r| (spec.key.extract(&NormalizedAircraft::new(r)), *r))
        .collect();

    // sort_by is stable: equal keys keep their input order in both directions.
    keyed.sort_by(|(ka, _), (kb, _)| spec.direction.apply(ka.compare(kb)));

    log::trace!(
        "[Hangar] Sorted {} records by {} {:?}",
        keyed.len(),
        spec.key,
        spec.direction
    );
    keyed.into_iter().map(|(_, r)| r).collect()
}

/// Named shortcuts offered on the category browsing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPreset {
    #[default]
    Rating,
    PriceLow,
    PriceHigh,
    Reviews,
    Newest,
}

impl SortPreset {
    pub fn spec(&self) -> SortSpec {
        match self {
            SortPreset::Rating => SortSpec::descending(SortKey::AverageRating),
            SortPreset::PriceLow => SortSpec::ascending(SortKey::Price),
            SortPreset::PriceHigh => SortSpec::descending(SortKey::Price),
            SortPreset::Reviews => SortSpec::descending(SortKey::TotalReviews),
            SortPreset::Newest => SortSpec::descending(SortKey::ReleaseDate),
        }
    }
}

impl FromStr for SortPreset {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rating" => Ok(SortPreset::Rating),
            "price_low" => Ok(SortPreset::PriceLow),
            "price_high" => Ok(SortPreset::PriceHigh),
            "reviews" => Ok(SortPreset::Reviews),
            "newest" => Ok(SortPreset::Newest),
            _ => Err(CatalogError::UnknownPreset(s.to_string())),
        }
    }
}
