//! Trip planning pipeline
//!
//! Runs the stages in order: destination forecast (concurrently with origin
//! geocoding), spot recommendation, then costing and scoring. Each run is
//! tagged with a session whose state tracks the current [`PlanStage`].

use crate::api::OpenMeteoClient;
use crate::config::PlannerConfig;
use crate::cost::CostEstimator;
use crate::evaluator;
use crate::location_resolver::GeoResolver;
use crate::models::{Coordinates, HotelTier, Itinerary};
use crate::recommend::PlaceRecommender;
use crate::session::SessionStore;
use crate::weather::WeatherEstimator;
use crate::{PlannerError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Pipeline stage, recorded in the session state under `stage`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStage {
    Init,
    ResolvingWeatherAndOrigin,
    WeatherReady,
    Recommending,
    CostingAndEvaluating,
    Done,
    Failed,
}

impl PlanStage {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStage::Init => "init",
            PlanStage::ResolvingWeatherAndOrigin => "resolving_weather_and_origin",
            PlanStage::WeatherReady => "weather_ready",
            PlanStage::Recommending => "recommending",
            PlanStage::CostingAndEvaluating => "costing_and_evaluating",
            PlanStage::Done => "done",
            PlanStage::Failed => "failed",
        }
    }
}

/// Parameters of one planning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub destination: String,
    pub date: NaiveDate,
    pub origin: Option<String>,
    pub nights: u32,
    pub hotel_tier: HotelTier,
}

impl TripRequest {
    #[must_use]
    pub fn new(destination: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            destination: destination.into(),
            date,
            origin: None,
            nights: 1,
            hotel_tier: HotelTier::Mid,
        }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    #[must_use]
    pub fn with_nights(mut self, nights: u32) -> Self {
        self.nights = nights;
        self
    }

    #[must_use]
    pub fn with_hotel_tier(mut self, hotel_tier: HotelTier) -> Self {
        self.hotel_tier = hotel_tier;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.destination.trim().is_empty() {
            return Err(PlannerError::validation("Destination cannot be empty"));
        }
        if self.nights == 0 {
            return Err(PlannerError::validation("nights must be at least 1"));
        }
        Ok(())
    }

    fn initial_state(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(state)) => state,
            _ => Map::new(),
        }
    }
}

/// Orchestrates the stages of a planning run
pub struct TripPlanner {
    resolver: GeoResolver,
    weather: WeatherEstimator,
    recommender: PlaceRecommender,
    sessions: Arc<SessionStore>,
}

impl TripPlanner {
    pub fn new(
        resolver: GeoResolver,
        weather: WeatherEstimator,
        recommender: PlaceRecommender,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            resolver,
            weather,
            recommender,
            sessions,
        }
    }

    /// Wire the stages up from configuration
    pub fn from_config(config: &PlannerConfig, sessions: Arc<SessionStore>) -> Result<Self> {
        let client = OpenMeteoClient::new(&config.weather)?;
        let resolver = GeoResolver::new(client.clone());
        let weather = WeatherEstimator::new(client, resolver.clone());
        let recommender = PlaceRecommender::from_config(&config.generative)?;
        Ok(Self::new(resolver, weather, recommender, sessions))
    }

    #[must_use]
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Run the whole pipeline. No partial itinerary is produced on failure.
    #[instrument(skip(self), fields(destination = %request.destination, date = %request.date))]
    pub async fn plan(&self, request: &TripRequest) -> Result<Itinerary> {
        request.validate()?;

        let session_id = self.sessions.create_session(request.initial_state());
        self.enter(&session_id, PlanStage::Init);
        info!("Planning session {}", session_id);

        match self.run_stages(&session_id, request).await {
            Ok(itinerary) => {
                self.enter(&session_id, PlanStage::Done);
                Ok(itinerary)
            }
            Err(e) => {
                error!("Planning failed: {}", e);
                self.enter(&session_id, PlanStage::Failed);
                self.sessions
                    .set_state_value(&session_id, "error", e.to_string());
                Err(e)
            }
        }
    }

    async fn run_stages(&self, session_id: &str, request: &TripRequest) -> Result<Itinerary> {
        self.enter(session_id, PlanStage::ResolvingWeatherAndOrigin);
        let weather_task = self.weather.run(&request.destination, request.date);
        let origin_task = self.resolve_origin(request.origin.as_deref());
        let (forecast, origin) = tokio::try_join!(weather_task, origin_task)?;

        // Without an explicit origin the trip starts at the destination.
        let destination_coords = forecast.coordinates;
        let origin_coords = origin.unwrap_or(destination_coords);

        self.enter(session_id, PlanStage::WeatherReady);
        self.journal(session_id, PlanStage::WeatherReady, json!(forecast));

        self.enter(session_id, PlanStage::Recommending);
        let recommendation = self.recommender.run(&forecast, &request.destination).await;
        self.journal(session_id, PlanStage::Recommending, json!(recommendation.spots));

        self.enter(session_id, PlanStage::CostingAndEvaluating);
        let costs = CostEstimator::run(
            &recommendation.spots,
            &origin_coords,
            &destination_coords,
            request.nights,
            request.hotel_tier,
        )?;
        let evaluation = evaluator::evaluate(&recommendation.spots, &forecast);
        self.journal(
            session_id,
            PlanStage::CostingAndEvaluating,
            json!({ "costs": costs, "evaluation": evaluation }),
        );

        info!(
            "Itinerary ready: {} spots, grand total ${:.2}",
            recommendation.spots.len(),
            costs.grand_total_usd
        );

        Ok(Itinerary {
            destination: request.destination.clone(),
            date: request.date,
            weather: forecast,
            recommended_places: recommendation.spots,
            recommendation_source: recommendation.source,
            costs,
            session_id: session_id.to_string(),
            evaluation,
        })
    }

    async fn resolve_origin(&self, origin: Option<&str>) -> Result<Option<Coordinates>> {
        match origin {
            Some(place) => self.resolver.resolve(place).await.map(Some),
            None => Ok(None),
        }
    }

    fn enter(&self, session_id: &str, stage: PlanStage) {
        self.sessions
            .set_state_value(session_id, "stage", stage.as_str());
    }

    fn journal(&self, session_id: &str, stage: PlanStage, output: Value) {
        self.sessions.append_memory(
            session_id,
            json!({ "stage": stage.as_str(), "output": output }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names_match_serde() {
        for stage in [
            PlanStage::Init,
            PlanStage::ResolvingWeatherAndOrigin,
            PlanStage::WeatherReady,
            PlanStage::Recommending,
            PlanStage::CostingAndEvaluating,
            PlanStage::Done,
            PlanStage::Failed,
        ] {
            assert_eq!(serde_json::to_value(stage).unwrap(), stage.as_str());
        }
    }

    #[test]
    fn test_request_initial_state() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
        let request = TripRequest::new("Bali, Indonesia", date)
            .with_origin("Jakarta, Indonesia")
            .with_nights(3)
            .with_hotel_tier(HotelTier::Premium);

        let state = request.initial_state();
        assert_eq!(state["destination"], "Bali, Indonesia");
        assert_eq!(state["date"], "2025-12-20");
        assert_eq!(state["origin"], "Jakarta, Indonesia");
        assert_eq!(state["nights"], 3);
        assert_eq!(state["hotel_tier"], "premium");
    }

    #[test]
    fn test_request_validation() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
        assert!(TripRequest::new("Bali", date).validate().is_ok());
        assert!(TripRequest::new(" ", date).validate().is_err());
        assert!(TripRequest::new("Bali", date).with_nights(0).validate().is_err());
    }
}
