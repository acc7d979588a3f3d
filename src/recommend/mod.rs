//! Place recommendation stage
//!
//! Strategies are tried in order and the first non-empty result wins. The
//! heuristic strategy always runs last, so [`PlaceRecommender::run`] never
//! fails and never returns an empty list.

pub mod generative;
pub mod heuristic;

pub use generative::GenerativeStrategy;
pub use heuristic::HeuristicStrategy;

use crate::Result;
use crate::config::GenerativeConfig;
use crate::models::{ForecastSummary, RecommendationSource, RecommendedSpot};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// A way of producing spot recommendations for a forecast
#[async_trait]
pub trait RecommendationStrategy: Send + Sync {
    /// Label recorded on the itinerary when this strategy wins
    fn source(&self) -> RecommendationSource;

    /// Whether the strategy can be attempted at all (client and credential present)
    fn is_available(&self) -> bool;

    /// Produce spots; an empty list means "no result"
    async fn recommend(
        &self,
        forecast: &ForecastSummary,
        destination: &str,
    ) -> Result<Vec<RecommendedSpot>>;
}

/// Spots plus the strategy that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub spots: Vec<RecommendedSpot>,
    pub source: RecommendationSource,
}

/// Runs the preferred strategies, then the heuristic fallback
pub struct PlaceRecommender {
    preferred: Vec<Box<dyn RecommendationStrategy>>,
    fallback: HeuristicStrategy,
}

impl PlaceRecommender {
    pub fn new(preferred: Vec<Box<dyn RecommendationStrategy>>) -> Self {
        Self {
            preferred,
            fallback: HeuristicStrategy,
        }
    }

    /// Heuristic-only recommender
    #[must_use]
    pub fn heuristic_only() -> Self {
        Self::new(Vec::new())
    }

    /// Generative strategy first (when configured), heuristic fallback
    pub fn from_config(config: &GenerativeConfig) -> Result<Self> {
        let generative = GenerativeStrategy::from_config(config)?;
        Ok(Self::new(vec![Box::new(generative)]))
    }

    pub async fn run(&self, forecast: &ForecastSummary, destination: &str) -> Recommendation {
        for strategy in &self.preferred {
            let source = strategy.source();
            if !strategy.is_available() {
                debug!("{:?} strategy unavailable, skipping", source);
                continue;
            }

            match strategy.recommend(forecast, destination).await {
                Ok(spots) if !spots.is_empty() => {
                    info!("{} spots from {:?} strategy", spots.len(), source);
                    return Recommendation { spots, source };
                }
                Ok(_) => warn!("{:?} strategy returned no spots, falling back", source),
                Err(e) => warn!("{:?} strategy failed, falling back: {}", source, e),
            }
        }

        let spots = match self.fallback.recommend(forecast, destination).await {
            Ok(spots) => spots,
            Err(e) => {
                warn!("Heuristic strategy failed, using its fixed table: {}", e);
                HeuristicStrategy::spots_for(forecast)
            }
        };
        info!("{} spots from heuristic strategy", spots.len());
        Recommendation {
            spots,
            source: self.fallback.source(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlannerError;
    use crate::models::SpotKind;
    use heuristic::tests::forecast;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted strategy for exercising the fallback order
    struct ScriptedStrategy {
        available: bool,
        outcome: fn() -> Result<Vec<RecommendedSpot>>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RecommendationStrategy for ScriptedStrategy {
        fn source(&self) -> RecommendationSource {
            RecommendationSource::Generative
        }

        fn is_available(&self) -> bool {
            self.available
        }

        async fn recommend(
            &self,
            _forecast: &ForecastSummary,
            _destination: &str,
        ) -> Result<Vec<RecommendedSpot>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }
    }

    fn scripted(
        available: bool,
        outcome: fn() -> Result<Vec<RecommendedSpot>>,
    ) -> (PlaceRecommender, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let strategy = ScriptedStrategy {
            available,
            outcome,
            calls: Arc::clone(&calls),
        };
        (PlaceRecommender::new(vec![Box::new(strategy)]), calls)
    }

    #[tokio::test]
    async fn test_preferred_strategy_wins_when_it_answers() {
        let (recommender, calls) = scripted(true, || {
            Ok(vec![RecommendedSpot::new(
                "Ubud Monkey Forest",
                SpotKind::Park,
                "Shade",
                "morning",
            )])
        });

        let result = recommender.run(&forecast(Some(0.0), Some(30.0)), "Bali").await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.source, RecommendationSource::Generative);
        assert_eq!(result.spots[0].name, "Ubud Monkey Forest");
    }

    #[tokio::test]
    async fn test_error_falls_back_to_heuristic() {
        let (recommender, calls) =
            scripted(true, || Err(PlannerError::transport("connection reset")));

        let result = recommender.run(&forecast(Some(8.0), None), "Bali").await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.source, RecommendationSource::Heuristic);
        assert_eq!(result.spots[0].kind, SpotKind::Museum);
    }

    #[tokio::test]
    async fn test_empty_result_falls_back_to_heuristic() {
        let (recommender, _) = scripted(true, || Ok(Vec::new()));

        let result = recommender.run(&forecast(None, None), "Bali").await;
        assert_eq!(result.source, RecommendationSource::Heuristic);
        assert_eq!(result.spots.len(), 3);
    }

    #[tokio::test]
    async fn test_unavailable_strategy_is_not_called() {
        let (recommender, calls) = scripted(false, || Ok(Vec::new()));

        let result = recommender.run(&forecast(Some(0.0), Some(20.0)), "Bali").await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(result.spots[1].kind, SpotKind::Garden);
    }

    #[tokio::test]
    async fn test_never_empty_for_any_tier() {
        let recommender = PlaceRecommender::heuristic_only();
        for precipitation in [None, Some(0.0), Some(3.0), Some(12.0)] {
            for temp in [None, Some(10.0), Some(33.0)] {
                let result = recommender.run(&forecast(precipitation, temp), "Bali").await;
                assert!(!result.spots.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_fallback_answers_through_heuristic_strategy() {
        let forecast = forecast(Some(0.0), Some(31.0));
        let expected = HeuristicStrategy.recommend(&forecast, "Bali").await.unwrap();

        let result = PlaceRecommender::heuristic_only().run(&forecast, "Bali").await;
        assert_eq!(result.source, HeuristicStrategy.source());
        assert_eq!(result.spots, expected);
    }
}
