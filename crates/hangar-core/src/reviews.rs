// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::model::AircraftRecord;
use crate::summary::round_tenth;
use crate::CatalogError;
use serde::{Deserialize, Serialize};

/// Star scores a reviewer gives one aircraft, each 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRatings {
    pub overall: u8,
    pub performance: u8,
    pub visual_quality: u8,
    pub flight_model: u8,
    pub systems_accuracy: u8,
}

impl ReviewRatings {
    pub fn new(
        overall: u8,
        performance: u8,
        visual_quality: u8,
        flight_model: u8,
        systems_accuracy: u8,
    ) -> Result<Self, CatalogError> {
        let ratings = Self {
            overall,
            performance,
            visual_quality,
            flight_model,
            systems_accuracy,
        };
        ratings.validate()?;
        Ok(ratings)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        for (dimension, value) in self.dimensions() {
            if !(1..=5).contains(&value) {
                return Err(CatalogError::RatingOutOfRange { dimension, value });
            }
        }
        Ok(())
    }

    fn dimensions(&self) -> [(&'static str, u8); 5] {
        [
            ("overall", self.overall),
            ("performance", self.performance),
            ("visual_quality", self.visual_quality),
            ("flight_model", self.flight_model),
            ("systems_accuracy", self.systems_accuracy),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RatingSummary {
    pub total_reviews: u32,
    /// Mean of the overall scores, rounded to one decimal. 0.0 means unrated.
    pub average_rating: f64,
    pub performance: f64,
    pub visual_quality: f64,
    pub flight_model: f64,
    pub systems_accuracy: f64,
}

impl RatingSummary {
    pub fn from_reviews(reviews: &[ReviewRatings]) -> Self {
        if reviews.is_empty() {
            return Self::default();
        }

        let n = reviews.len() as f64;
        let avg = |pick: fn(&ReviewRatings) -> u8| {
            round_tenth(reviews.iter().map(|r| f64::from(pick(r))).sum::<f64>() / n)
        };

        Self {
            total_reviews: reviews.len() as u32,
            average_rating: avg(|r| r.overall),
            performance: avg(|r| r.performance),
            visual_quality: avg(|r| r.visual_quality),
            flight_model: avg(|r| r.flight_model),
            systems_accuracy: avg(|r| r.systems_accuracy),
        }
    }

    /// Writes the aggregate onto a caller-owned record.
    pub fn apply_to(&self, record: &mut AircraftRecord) {
        record.average_rating = self.average_rating;
        record.total_reviews = self.total_reviews;
    }
}
