//! View Models for the dashboard
//!
//! Structured data handed to the rendering layer. Regenerated in full for
//! every prediction.

use serde::Serialize;

use super::advice::RecommendationSet;
use super::readings::{CanonicalReadings, ReadingField};
use super::risk::RiskSummary;
use super::utils::classify::StatusTier;

/// One reading tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingCard {
    pub field: ReadingField,
    pub label: &'static str,
    pub value: f64,
    pub value_display: String, // e.g. "40.0" or "30.0°C"
    /// None for temperature and humidity, which are never tiered.
    pub status: Option<StatusTier>,
    pub status_label: &'static str,
    pub css_class: &'static str,
    /// Sub-index reported by the service for this pollutant, if any.
    pub sub_aqi: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskPanel {
    pub summary: RiskSummary,
    pub css_class: &'static str,
    pub confidence_display: String,
    pub aqi_display: String,
    pub aqi_category_display: String,
    pub main_pollutant_display: String,
}

/// Everything the view needs for one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionViewModel {
    pub city: Option<String>,
    pub readings: CanonicalReadings,
    pub cards: Vec<ReadingCard>,
    pub risk: RiskPanel,
    pub recommendations: RecommendationSet,
    pub chart_values: [f64; 8],
}

impl PredictionViewModel {
    pub fn card(&self, field: ReadingField) -> Option<&ReadingCard> {
        self.cards.iter().find(|c| c.field == field)
    }

    pub fn status_of(&self, field: ReadingField) -> Option<StatusTier> {
        self.card(field).and_then(|c| c.status)
    }
}

/// City selector contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CityOptions {
    Available(Vec<String>),
    Unavailable,
}

impl CityOptions {
    pub const UNAVAILABLE_TEXT: &'static str = "Could not load cities";

    pub fn cities(&self) -> &[String] {
        match self {
            CityOptions::Available(c) => c,
            CityOptions::Unavailable => &[],
        }
    }
}

/// Error toast for the alerting layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
