//! Final itinerary report

use super::{CostBreakdown, ForecastSummary, RecommendedSpot};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Suitability score for one spot
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SpotScore {
    pub name: String,
    pub score: u32,
}

/// Which recommendation strategy produced the spots
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    Generative,
    Heuristic,
}

/// Terminal output of a planning run
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Itinerary {
    pub destination: String,
    pub date: NaiveDate,
    pub weather: ForecastSummary,
    pub recommended_places: Vec<RecommendedSpot>,
    pub recommendation_source: RecommendationSource,
    pub costs: CostBreakdown,
    pub session_id: String,
    pub evaluation: Vec<SpotScore>,
}
