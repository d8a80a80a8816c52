// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Catalog-wide aggregates for the landing and category pages.
//! Archived records never count towards these numbers.

use crate::model::{AircraftRecord, PriceType};
use crate::normalize::compatibility_tags;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub count: usize,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManufacturerSummary {
    pub manufacturer: String,
    pub count: usize,
    pub models: BTreeSet<String>,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryViews {
    pub category: String,
    pub total_views: u64,
    pub aircraft_count: usize,
    pub avg_views: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub paid: usize,
    pub freeware: usize,
}

/// Distinct values used to populate the browse filter choices.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Facets {
    pub developers: Vec<String>,
    pub manufacturers: Vec<String>,
    pub categories: Vec<String>,
    pub compatibility: Vec<String>,
}

pub fn active_records(records: &[AircraftRecord]) -> Vec<&AircraftRecord> {
    records.iter().filter(|r| !r.is_archived).collect()
}

pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// One row per category, alphabetical.
pub fn category_summaries(records: &[AircraftRecord]) -> Vec<CategorySummary> {
    let mut groups: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for record in active_records(records) {
        let entry = groups.entry(record.category.as_str()).or_default();
        entry.0 += 1;
        entry.1 += record.average_rating;
    }

    groups
        .into_iter()
        .map(|(category, (count, rating_sum))| CategorySummary {
            category: category.to_string(),
            count,
            avg_rating: round_tenth(mean(rating_sum, count)),
        })
        .collect()
}

/// Manufacturers present in one category, alphabetical, with their models.
pub fn manufacturer_summaries(
    records: &[AircraftRecord],
    category: &str,
) -> Vec<ManufacturerSummary> {
    let mut groups: BTreeMap<&str, ManufacturerSummary> = BTreeMap::new();
    for record in active_records(records)
        .into_iter()
        .filter(|r| r.category == category)
    {
        let summary = groups
            .entry(record.aircraft_manufacturer.as_str())
            .or_insert_with(|| ManufacturerSummary {
                manufacturer: record.aircraft_manufacturer.clone(),
                count: 0,
                models: BTreeSet::new(),
                avg_rating: 0.0,
            });
        summary.count += 1;
        summary.avg_rating += record.average_rating;
        if !record.aircraft_model.is_empty() {
            summary.models.insert(record.aircraft_model.clone());
        }
    }

    groups
        .into_values()
        .map(|mut summary| {
            summary.avg_rating = round_tenth(mean(summary.avg_rating, summary.count));
            summary
        })
        .collect()
}

/// View totals per category, busiest first. Equal totals stay alphabetical.
pub fn category_view_stats(records: &[AircraftRecord]) -> Vec<CategoryViews> {
    let mut groups: BTreeMap<&str, (u64, usize)> = BTreeMap::new();
    for record in active_records(records) {
        let entry = groups.entry(record.category.as_str()).or_default();
        entry.0 += record.view_count;
        entry.1 += 1;
    }

    let mut stats: Vec<CategoryViews> = groups
        .into_iter()
        .map(|(category, (total_views, aircraft_count))| CategoryViews {
            category: category.to_string(),
            total_views,
            aircraft_count,
            avg_views: mean(total_views as f64, aircraft_count),
        })
        .collect();
    stats.sort_by(|a, b| b.total_views.cmp(&a.total_views));
    stats
}

pub fn catalog_stats(records: &[AircraftRecord]) -> CatalogStats {
    active_records(records)
        .into_iter()
        .fold(CatalogStats::default(), |mut stats, record| {
            stats.total += 1;
            match record.price_type {
                PriceType::Paid => stats.paid += 1,
                PriceType::Freeware => stats.freeware += 1,
                PriceType::Unknown => {}
            }
            stats
        })
}

impl Facets {
    pub fn collect(records: &[AircraftRecord]) -> Self {
        let mut developers = BTreeSet::new();
        let mut manufacturers = BTreeSet::new();
        let mut categories = BTreeSet::new();
        let mut compatibility = BTreeSet::new();

        for record in records {
            insert_non_empty(&mut developers, &record.developer);
            insert_non_empty(&mut manufacturers, &record.aircraft_manufacturer);
            insert_non_empty(&mut categories, &record.category);
            compatibility.extend(compatibility_tags(&record.compatibility));
        }

        Self {
            developers: developers.into_iter().collect(),
            manufacturers: manufacturers.into_iter().collect(),
            categories: categories.into_iter().collect(),
            compatibility: compatibility.into_iter().collect(),
        }
    }
}

fn insert_non_empty(set: &mut BTreeSet<String>, value: &str) {
    let trimmed = value.trim();
    if !trimmed.is_empty() {
        set.insert(trimmed.to_string());
    }
}
