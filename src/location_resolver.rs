//! Location Resolution Module
//!
//! Resolves place names into coordinates using the first geocoding match.

use crate::api::OpenMeteoClient;
use crate::models::Coordinates;
use crate::{PlannerError, Result};
use tracing::{debug, instrument, warn};

/// Service for resolving place names
#[derive(Debug, Clone)]
pub struct GeoResolver {
    client: OpenMeteoClient,
}

impl GeoResolver {
    pub fn new(client: OpenMeteoClient) -> Self {
        Self { client }
    }

    /// Resolve a place name to the coordinates of its best match
    #[instrument(skip(self))]
    pub async fn resolve(&self, place_name: &str) -> Result<Coordinates> {
        let place_name = place_name.trim();
        if place_name.is_empty() {
            return Err(PlannerError::validation("Place name cannot be empty"));
        }

        debug!("Geocoding place name: {}", place_name);

        let geocoding = self
            .client
            .geocode(place_name)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                warn!("No geocoding results for '{}'", place_name);
                PlannerError::not_found(place_name)
            })?;

        let coordinates = Coordinates::new(geocoding.latitude, geocoding.longitude)?;
        debug!(
            "Found location: {} ({})",
            geocoding.name.as_deref().unwrap_or(place_name),
            coordinates.format_coordinates()
        );

        Ok(coordinates)
    }
}
