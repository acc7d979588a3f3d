//! Data models for the trip planner
//!
//! This module contains the core domain models organized by concern:
//! - Location: resolved coordinates
//! - Forecast: single-day forecast summary and umbrella tier
//! - Spot: recommended places and their category tags
//! - Cost: transport, hotel and ticket estimates
//! - Itinerary: the final report and spot scores

pub mod cost;
pub mod forecast;
pub mod itinerary;
pub mod location;
pub mod spot;

// Re-export all public types for convenient access
pub use cost::{
    CostBreakdown, HotelEstimate, HotelTier, TicketEstimate, TicketItem, TransportEstimate,
    TransportMode,
};
pub use forecast::{ForecastSummary, UmbrellaRecommendation, weather_code_to_description};
pub use itinerary::{Itinerary, RecommendationSource, SpotScore};
pub use location::Coordinates;
pub use spot::{RecommendedSpot, SpotKind};
