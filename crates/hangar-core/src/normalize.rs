// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Canonical, typed views over raw catalog records.
//!
//! The backend is inconsistent about a few fields: prices are free-form
//! strings, compatibility is either a list or a comma separated string and
//! ratings are plain floats. Everything that filters, sorts or ranks goes
//! through [`NormalizedAircraft`] so the rest of the crate only ever sees one
//! shape. Malformed values fall back to permissive defaults here and never
//! produce an error.

use crate::model::{AircraftRecord, Compatibility, PriceType};
use regex::Regex;
use std::sync::OnceLock;

pub const MAX_RATING_BUCKET: u8 = 5;

/// Borrowed view of a record plus its derived semantic fields.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAircraft<'a> {
    pub record: &'a AircraftRecord,
    /// `Some(0.0)` for freeware, `None` when the price string has no number.
    pub numeric_price: Option<f64>,
    pub compatibility_tags: Vec<String>,
    pub rating_bucket: u8,
}

impl<'a> NormalizedAircraft<'a> {
    pub fn new(record: &'a AircraftRecord) -> Self {
        Self {
            record,
            numeric_price: parse_price(record.price_type, record.price.as_deref()),
            compatibility_tags: compatibility_tags(&record.compatibility),
            rating_bucket: rating_bucket(record.average_rating),
        }
    }

    /// Price used for ordering. Unparsable prices sort as free.
    pub fn sort_price(&self) -> f64 {
        self.numeric_price.unwrap_or(0.0)
    }
}

impl AircraftRecord {
    /// Returns a canonical copy: compatibility bridged to a trimmed list.
    /// Applying it twice yields the same value.
    pub fn normalized(&self) -> AircraftRecord {
        AircraftRecord {
            compatibility: Compatibility::List(compatibility_tags(&self.compatibility)),
            ..self.clone()
        }
    }

    pub fn view(&self) -> NormalizedAircraft<'_> {
        NormalizedAircraft::new(self)
    }
}

pub fn normalize_all(records: &[AircraftRecord]) -> Vec<NormalizedAircraft<'_>> {
    records.iter().map(NormalizedAircraft::new).collect()
}

/// Extracts the first decimal number from a price string ("$59.99" -> 59.99).
pub fn parse_price(price_type: PriceType, price: Option<&str>) -> Option<f64> {
    if price_type == PriceType::Freeware {
        return Some(0.0);
    }

    static RE_PRICE: OnceLock<Regex> = OnceLock::new();
    let re = RE_PRICE.get_or_init(|| {
        Regex::new(r"\d+(?:\.\d+)?|\.\d+").expect("price pattern is valid")
    });

    let raw = price?.trim();
    re.find(raw).and_then(|m| m.as_str().parse::<f64>().ok())
}

pub fn compatibility_tags(compatibility: &Compatibility) -> Vec<String> {
    match compatibility {
        Compatibility::List(tags) => tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        Compatibility::Delimited(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Integer star bucket used by the "N stars" filter.
pub fn rating_bucket(average_rating: f64) -> u8 {
    if !average_rating.is_finite() || average_rating <= 0.0 {
        return 0;
    }
    (average_rating.floor() as u8).min(MAX_RATING_BUCKET)
}
