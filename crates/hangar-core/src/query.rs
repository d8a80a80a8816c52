// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::config::CatalogConfig;
use crate::filter::{filter_records, FilterCriteria};
use crate::model::AircraftRecord;
use crate::rank::{self, TrendingEntry, TrendingView};
use crate::sort::{sort_records, SortSpec};
use serde::{Deserialize, Serialize};

/// Filter and optional ordering for the browse view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    pub criteria: FilterCriteria,
    /// `None` keeps catalog order.
    pub sort: Option<SortSpec>,
}

/// Result of running a query against whatever snapshot the caller holds.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome<'a> {
    /// Nothing has been fetched yet.
    NotLoaded,
    /// Possibly empty; an empty list means nothing matched.
    Results(Vec<&'a AircraftRecord>),
}

impl<'a> QueryOutcome<'a> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, QueryOutcome::Results(_))
    }

    pub fn is_empty_result(&self) -> bool {
        matches!(self, QueryOutcome::Results(r) if r.is_empty())
    }

    pub fn records(&self) -> &[&'a AircraftRecord] {
        match self {
            QueryOutcome::NotLoaded => &[],
            QueryOutcome::Results(records) => records,
        }
    }
}

impl CatalogQuery {
    pub fn new(criteria: FilterCriteria, sort: Option<SortSpec>) -> Self {
        Self { criteria, sort }
    }

    pub fn run<'a>(&self, records: &'a [AircraftRecord]) -> Vec<&'a AircraftRecord> {
        let filtered = filter_records(records, &self.criteria);
        match &self.sort {
            Some(spec) => sort_records(&filtered, spec),
            None => filtered,
        }
    }

    pub fn run_snapshot<'a>(&self, snapshot: Option<&'a [AircraftRecord]>) -> QueryOutcome<'a> {
        match snapshot {
            Some(records) => QueryOutcome::Results(self.run(records)),
            None => QueryOutcome::NotLoaded,
        }
    }
}

/// Landing page rankings. Computed over the whole active catalog, never the
/// current browse filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlights<'a> {
    pub top_rated: Vec<&'a AircraftRecord>,
    pub most_viewed: Vec<&'a AircraftRecord>,
    pub trending: TrendingView<'a>,
    pub recent: Vec<&'a AircraftRecord>,
}

impl<'a> Highlights<'a> {
    pub fn compute(
        records: &'a [AircraftRecord],
        config: &CatalogConfig,
        trending: Option<Vec<TrendingEntry<'a>>>,
    ) -> Self {
        let highlights = Self {
            top_rated: rank::top_rated(records, config.top_rated_limit),
            most_viewed: rank::most_viewed(records, config.most_viewed_limit),
            trending: rank::rank_trending(trending, config.trending_limit),
            recent: rank::recently_added(records, config.recent_limit),
        };
        log::debug!(
            "[Hangar] Highlights: {} top rated, {} most viewed, trending available: {}",
            highlights.top_rated.len(),
            highlights.most_viewed.len(),
            highlights.trending.is_available()
        );
        highlights
    }
}
