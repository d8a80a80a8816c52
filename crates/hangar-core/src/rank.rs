// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::model::AircraftRecord;
use crate::sort::compare_numbers;
use chrono::{Duration, NaiveDateTime};
use std::cmp::Ordering;

pub const DEFAULT_TOP_RATED_LIMIT: usize = 10;

// Archived records never rank.
fn rankable<'a>(records: &'a [AircraftRecord]) -> impl Iterator<Item = &'a AircraftRecord> + 'a {
    records.iter().filter(|r| !r.is_archived)
}

/// Rated records only, best first. Ties keep catalog order.
pub fn top_rated(records: &[AircraftRecord], limit: usize) -> Vec<&AircraftRecord> {
    let mut rated: Vec<&AircraftRecord> = rankable(records)
        .filter(|r| r.average_rating > 0.0)
        .collect();
    rated.sort_by(|a, b| descending(a.average_rating, b.average_rating));
    rated.truncate(limit);
    rated
}

pub fn most_viewed(records: &[AircraftRecord], limit: usize) -> Vec<&AircraftRecord> {
    let mut viewed: Vec<&AircraftRecord> = rankable(records).collect();
    viewed.sort_by(|a, b| b.view_count.cmp(&a.view_count));
    viewed.truncate(limit);
    viewed
}

/// Newest additions first; records without a creation date go last.
pub fn recently_added(records: &[AircraftRecord], limit: usize) -> Vec<&AircraftRecord> {
    let mut recent: Vec<&AircraftRecord> = rankable(records).collect();
    recent.sort_by(|a, b| match (a.created_at, b.created_at) {
        (Some(ta), Some(tb)) => tb.cmp(&ta),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    recent.truncate(limit);
    recent
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendingEntry<'a> {
    pub record: &'a AircraftRecord,
    pub score: Option<f64>,
}

impl<'a> TrendingEntry<'a> {
    pub fn new(record: &'a AircraftRecord) -> Self {
        Self { record, score: None }
    }

    pub fn scored(record: &'a AircraftRecord, score: f64) -> Self {
        Self {
            record,
            score: Some(score),
        }
    }
}

/// "Nothing is trending" and "we never got trending data" are different states.
#[derive(Debug, Clone, PartialEq)]
pub enum TrendingView<'a> {
    Unavailable,
    Ranked(Vec<TrendingEntry<'a>>),
}

impl<'a> TrendingView<'a> {
    pub fn is_available(&self) -> bool {
        matches!(self, TrendingView::Ranked(_))
    }

    pub fn records(&self) -> Vec<&'a AircraftRecord> {
        match self {
            TrendingView::Unavailable => Vec::new(),
            TrendingView::Ranked(entries) => entries.iter().map(|e| e.record).collect(),
        }
    }
}

/// Orders an externally supplied trending subset. When any entry carries a
/// score the list is ranked by it (unscored entries trail); otherwise the
/// supplied order is kept.
pub fn rank_trending<'a>(
    supplied: Option<Vec<TrendingEntry<'a>>>,
    limit: usize,
) -> TrendingView<'a> {
    let Some(mut entries) = supplied else {
        log::debug!("[Hangar] No trending data supplied");
        return TrendingView::Unavailable;
    };

    if entries.iter().any(|e| e.score.is_some()) {
        entries.sort_by(|a, b| match (a.score, b.score) {
            (Some(sa), Some(sb)) => descending(sa, sb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }
    entries.truncate(limit);
    TrendingView::Ranked(entries)
}

/// Builds the trending subset the backend serves: active records viewed
/// within the window, scored by their view count.
pub fn trending_window(
    records: &[AircraftRecord],
    now: NaiveDateTime,
    window_days: i64,
) -> Vec<TrendingEntry<'_>> {
    let cutoff = now - Duration::days(window_days.max(0));
    rankable(records)
        .filter(|r| r.last_viewed.is_some_and(|seen| seen >= cutoff))
        .map(|r| TrendingEntry::scored(r, r.view_count as f64))
        .collect()
}

fn descending(a: f64, b: f64) -> Ordering {
    compare_numbers(b, a)
}
