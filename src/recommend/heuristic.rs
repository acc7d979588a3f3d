//! Deterministic, credential-free spot recommendations

use super::RecommendationStrategy;
use crate::Result;
use crate::models::{
    ForecastSummary, RecommendationSource, RecommendedSpot, SpotKind, UmbrellaRecommendation,
};
use async_trait::async_trait;

/// At or above this max temperature a dry day counts as hot
const HOT_DAY_CELSIUS: f64 = 28.0;

/// Rule-based recommender keyed on the umbrella tier and max temperature
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicStrategy;

impl HeuristicStrategy {
    /// Pick the fixed spot list for the forecast
    #[must_use]
    pub fn spots_for(forecast: &ForecastSummary) -> Vec<RecommendedSpot> {
        match forecast.umbrella_recommendation {
            UmbrellaRecommendation::High => vec![
                RecommendedSpot::new(
                    "City Museum",
                    SpotKind::Museum,
                    "Indoor exhibits to avoid rain",
                    "morning",
                ),
                RecommendedSpot::new(
                    "Indoor Food Market",
                    SpotKind::Market,
                    "Local food and shelter from rain",
                    "afternoon",
                ),
                RecommendedSpot::new(
                    "Mall & Cultural Center",
                    SpotKind::Mall,
                    "Shopping and local shows",
                    "evening",
                ),
            ],
            UmbrellaRecommendation::Low if forecast.temp_max_or_default() >= HOT_DAY_CELSIUS => {
                vec![
                    RecommendedSpot::new(
                        "Seaside Promenade",
                        SpotKind::Beach,
                        "Great sunny day for walking",
                        "morning",
                    ),
                    RecommendedSpot::new(
                        "City Park",
                        SpotKind::Park,
                        "Picnic and outdoor activities",
                        "afternoon",
                    ),
                    RecommendedSpot::new(
                        "Rooftop Cafe",
                        SpotKind::Cafe,
                        "Views and refreshments",
                        "evening",
                    ),
                ]
            }
            UmbrellaRecommendation::Low => vec![
                RecommendedSpot::new(
                    "Historic Old Town",
                    SpotKind::Walking,
                    "Pleasant temps for strolling",
                    "morning",
                ),
                RecommendedSpot::new(
                    "Botanical Garden",
                    SpotKind::Garden,
                    "Relaxed outdoor visit",
                    "afternoon",
                ),
                RecommendedSpot::new(
                    "Local Brewery",
                    SpotKind::Brewery,
                    "Indoor tasting with local food",
                    "evening",
                ),
            ],
            UmbrellaRecommendation::Possible | UmbrellaRecommendation::Unknown => vec![
                RecommendedSpot::new(
                    "City Highlights Tour",
                    SpotKind::Tour,
                    "Balanced mix of indoor/outdoor",
                    "morning",
                ),
                RecommendedSpot::new("Local Market", SpotKind::Market, "See local life", "afternoon"),
                RecommendedSpot::new(
                    "Popular Cafe",
                    SpotKind::Cafe,
                    "Rest and sample local cuisine",
                    "evening",
                ),
            ],
        }
    }
}

#[async_trait]
impl RecommendationStrategy for HeuristicStrategy {
    fn source(&self) -> RecommendationSource {
        RecommendationSource::Heuristic
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn recommend(
        &self,
        forecast: &ForecastSummary,
        _destination: &str,
    ) -> Result<Vec<RecommendedSpot>> {
        Ok(Self::spots_for(forecast))
    }
}
