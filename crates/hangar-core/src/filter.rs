// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::model::{AircraftRecord, PriceType};
use crate::normalize::NormalizedAircraft;
use crate::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive price bounds. `max: None` leaves the range open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceRange")]
pub struct PriceRange {
    pub min: f64,
    pub max: Option<f64>,
}

#[derive(Deserialize)]
struct RawPriceRange {
    #[serde(default)]
    min: f64,
    #[serde(default)]
    max: Option<f64>,
}

impl TryFrom<RawPriceRange> for PriceRange {
    type Error = CatalogError;

    fn try_from(raw: RawPriceRange) -> Result<Self, Self::Error> {
        PriceRange::new(raw.min, raw.max)
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self { min: 0.0, max: None }
    }
}

impl PriceRange {
    pub fn new(min: f64, max: Option<f64>) -> Result<Self, CatalogError> {
        let upper = max.unwrap_or(f64::INFINITY);
        if !min.is_finite() || min < 0.0 || upper.is_nan() || min > upper {
            return Err(CatalogError::InvalidPriceRange { min, max: upper });
        }
        Ok(Self { min, max })
    }

    pub fn is_unbounded(&self) -> bool {
        self.min == 0.0 && self.max.is_none()
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.max.map_or(true, |max| price <= max)
    }

    /// Freeware only survives a range that starts at zero.
    fn admits(&self, aircraft: &NormalizedAircraft) -> bool {
        if aircraft.record.price_type == PriceType::Freeware {
            return self.min == 0.0;
        }
        match aircraft.numeric_price {
            Some(price) => self.contains(price),
            // Unparsable prices are never narrowed away.
            None => true,
        }
    }
}

/// Active browse selections. Empty sets mean "no constraint".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub search_text: String,
    pub price_range: PriceRange,
    pub price_types: BTreeSet<PriceType>,
    pub developers: BTreeSet<String>,
    pub manufacturers: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    /// Star buckets (floor of the average rating).
    pub ratings: BTreeSet<u8>,
    pub compatibility: Vec<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.search_text.trim().is_empty()
            && self.price_range.is_unbounded()
            && self.price_types.is_empty()
            && self.developers.is_empty()
            && self.manufacturers.is_empty()
            && self.categories.is_empty()
            && self.ratings.is_empty()
            && self.compatibility.iter().all(|c| c.trim().is_empty())
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    pub fn with_price_type(mut self, price_type: PriceType) -> Self {
        self.price_types.insert(price_type);
        self
    }

    pub fn with_developer(mut self, developer: impl Into<String>) -> Self {
        self.developers.insert(developer.into());
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturers.insert(manufacturer.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    pub fn with_rating(mut self, bucket: u8) -> Self {
        self.ratings.insert(bucket);
        self
    }

    pub fn with_compatibility(mut self, tag: impl Into<String>) -> Self {
        self.compatibility.push(tag.into());
        self
    }

    /// AND across criteria, OR inside a multi-select. Cheap checks run first
    /// and the first failing predicate short-circuits.
    pub fn matches(&self, aircraft: &NormalizedAircraft) -> bool {
        let record = aircraft.record;

        let term = self.search_text.trim();
        if !term.is_empty() && !matches_search(record, &term.to_lowercase()) {
            return false;
        }

        if !self.developers.is_empty() && !self.developers.contains(&record.developer) {
            return false;
        }
        if !self.manufacturers.is_empty()
            && !self.manufacturers.contains(&record.aircraft_manufacturer)
        {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&record.category) {
            return false;
        }

        if !self.price_types.is_empty() && !self.price_types.contains(&record.price_type) {
            return false;
        }

        let requested: Vec<&str> = self
            .compatibility
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect();
        if !requested.is_empty()
            && !aircraft
                .compatibility_tags
                .iter()
                .any(|tag| requested.iter().any(|want| tags_match(tag, want)))
        {
            return false;
        }

        if !self.ratings.is_empty() && !self.ratings.contains(&aircraft.rating_bucket) {
            return false;
        }

        self.price_range.admits(aircraft)
    }

    pub fn count_matches(&self, records: &[AircraftRecord]) -> usize {
        records
            .iter()
            .filter(|r| self.matches(&NormalizedAircraft::new(r)))
            .count()
    }
}

/// Applies the criteria, keeping input order. The input slice is only borrowed.
pub fn filter_records<'a>(
    records: &'a [AircraftRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a AircraftRecord> {
    if criteria.is_empty() {
        return records.iter().collect();
    }

    let filtered: Vec<&AircraftRecord> = records
        .iter()
        .filter(|r| criteria.matches(&NormalizedAircraft::new(r)))
        .collect();

    log::debug!(
        "[Hangar] Filter kept {} of {} records",
        filtered.len(),
        records.len()
    );
    filtered
}

fn matches_search(record: &AircraftRecord, term_lower: &str) -> bool {
    [
        &record.name,
        &record.developer,
        &record.aircraft_manufacturer,
        &record.description,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(term_lower))
}

/// Loose platform match: either tag contains the other, case-insensitively.
/// Tags are also compared as folded platform keys so "MS2024" and
/// "MSFS 2024" meet.
pub fn tags_match(a: &str, b: &str) -> bool {
    let (la, lb) = (a.trim().to_lowercase(), b.trim().to_lowercase());
    if contains_either(&la, &lb) {
        return true;
    }
    contains_either(&platform_key(a), &platform_key(b))
}

fn contains_either(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}

const PLATFORM_ALIASES: &[(&str, &str)] = &[
    ("microsoftflightsimulator", "ms"),
    ("msfs", "ms"),
];

fn platform_key(tag: &str) -> String {
    let mut key: String = tag
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    for (alias, canonical) in PLATFORM_ALIASES {
        key = key.replace(alias, canonical);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Compatibility;

    fn paid(name: &str, price: &str) -> AircraftRecord {
        AircraftRecord {
            price_type: PriceType::Paid,
            price: Some(price.to_string()),
            ..AircraftRecord::new(name, name)
        }
    }

    fn freeware(name: &str) -> AircraftRecord {
        AircraftRecord {
            price_type: PriceType::Freeware,
            ..AircraftRecord::new(name, name)
        }
    }

    #[test]
    fn test_platform_key_folding() {
        assert_eq!(platform_key("MSFS 2024"), "ms2024");
        assert_eq!(platform_key("Microsoft Flight Simulator 2020"), "ms2020");
        assert_eq!(platform_key("X-Plane 12"), "xplane12");
    }

    #[test]
    fn test_tags_match_both_directions() {
        assert!(tags_match("MS2024", "MSFS 2024"));
        assert!(tags_match("MSFS 2024", "MS2024"));
        assert!(tags_match("msfs 2024", "FS 2024"));
        assert!(tags_match("X-Plane 12", "x-plane"));
        assert!(!tags_match("MS2020", "MS2024"));
        assert!(!tags_match("", "MS2024"));
        assert!(!tags_match("X-Plane 12", "  "));
    }

    #[test]
    fn test_price_range_validation() {
        assert!(PriceRange::new(0.0, Some(50.0)).is_ok());
        assert!(PriceRange::new(10.0, None).is_ok());
        assert!(PriceRange::new(60.0, Some(50.0)).is_err());
        assert!(PriceRange::new(-1.0, Some(50.0)).is_err());
        assert!(PriceRange::new(f64::NAN, None).is_err());
    }

    #[test]
    fn test_freeware_needs_zero_lower_bound() {
        let record = freeware("C172");
        let view = NormalizedAircraft::new(&record);

        for max in [0.0, 5.0, 200.0] {
            let range = PriceRange::new(0.0, Some(max)).unwrap();
            assert!(range.admits(&view), "freeware should pass [0, {}]", max);
        }
        let range = PriceRange::new(1.0, Some(200.0)).unwrap();
        assert!(!range.admits(&view));
    }

    #[test]
    fn test_price_range_deserialize_is_validated() {
        let range: PriceRange = serde_json::from_str(r#"{"max": 40}"#).unwrap();
        assert_eq!(range, PriceRange::new(0.0, Some(40.0)).unwrap());

        assert!(serde_json::from_str::<PriceRange>(r#"{"min": -1, "max": null}"#).is_err());
        assert!(serde_json::from_str::<PriceRange>(r#"{"min": 50, "max": 10}"#).is_err());
        assert!(serde_json::from_str::<FilterCriteria>(
            r#"{"price_range": {"min": -1, "max": null}}"#
        )
        .is_err());
    }

    #[test]
    fn test_negative_lower_bound_is_not_unbounded() {
        // Public fields bypass `new`; the fast path must still agree with `matches`.
        let criteria = FilterCriteria::new().with_price_range(PriceRange {
            min: -1.0,
            max: None,
        });
        assert!(!criteria.is_empty());

        let records = vec![freeware("C172"), paid("A320", "$59.99")];
        let kept = filter_records(&records, &criteria);
        assert_eq!(kept.len(), criteria.count_matches(&records));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "A320");
    }

    #[test]
    fn test_paid_price_bounds_are_inclusive() {
        let record = paid("A320", "$59.99");
        let view = NormalizedAircraft::new(&record);
        assert!(PriceRange::new(59.99, Some(59.99)).unwrap().admits(&view));
        assert!(!PriceRange::new(0.0, Some(59.98)).unwrap().admits(&view));
        assert!(!PriceRange::new(60.0, None).unwrap().admits(&view));
    }

    #[test]
    fn test_missing_compatibility_fails_active_filter_only() {
        let record = paid("Bare", "$10");
        let view = NormalizedAircraft::new(&record);
        assert!(FilterCriteria::new().matches(&view));
        assert!(!FilterCriteria::new().with_compatibility("MS2024").matches(&view));
    }

    #[test]
    fn test_blank_criteria_are_inactive() {
        let criteria = FilterCriteria::new()
            .with_search("   ")
            .with_compatibility(" ");
        assert!(criteria.is_empty());

        let mut record = paid("Any", "$10");
        record.compatibility = Compatibility::default();
        assert!(criteria.matches(&NormalizedAircraft::new(&record)));
    }

    #[test]
    fn test_criteria_deserialize_with_defaults() {
        let json = r#"{"search_text": "boeing", "ratings": [4, 5], "price_types": ["Paid"]}"#;
        let criteria: FilterCriteria = serde_json::from_str(json).unwrap();
        assert_eq!(criteria.search_text, "boeing");
        assert!(criteria.ratings.contains(&4));
        assert!(criteria.price_types.contains(&PriceType::Paid));
        assert!(criteria.price_range.is_unbounded());
        assert!(criteria.developers.is_empty());
    }
}
