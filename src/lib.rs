//! `tripplanner` - weather-aware short trip planning
//!
//! This library chains a destination forecast, spot recommendations and a
//! cost estimate into a single itinerary, degrading to deterministic
//! heuristics when the generative service is unavailable.

pub mod api;
pub mod config;
pub mod cost;
pub mod error;
pub mod evaluator;
pub mod location_resolver;
pub mod models;
pub mod planner;
pub mod recommend;
pub mod session;
pub mod weather;

// Re-export core types for public API
pub use api::OpenMeteoClient;
pub use self::config::PlannerConfig;
pub use cost::CostEstimator;
pub use error::PlannerError;
pub use location_resolver::GeoResolver;
pub use models::{
    Coordinates, CostBreakdown, ForecastSummary, HotelTier, Itinerary, RecommendedSpot, SpotKind,
    SpotScore, UmbrellaRecommendation,
};
pub use planner::{PlanStage, TripPlanner, TripRequest};
pub use recommend::{PlaceRecommender, RecommendationStrategy};
pub use session::{SessionRecord, SessionStore};
pub use weather::WeatherEstimator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlannerError>;
