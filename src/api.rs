//! HTTP client for the Open-Meteo geocoding and forecast APIs
//!
//! Every request carries the configured timeout. Nothing here retries:
//! transport failures surface as [`PlannerError::Transport`] and forecast
//! rejections are handed back to the caller untouched, which owns the
//! range-clamp policy.

use crate::config::WeatherConfig;
use crate::models::Coordinates;
use crate::weather::open_meteo::{ForecastResponse, GeocodingResponse, GeocodingResult};
use crate::{PlannerError, Result};
use chrono::NaiveDate;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode";

/// Outcome of a single forecast request
#[derive(Debug)]
pub enum ForecastReply {
    /// The service accepted the request
    Data(ForecastResponse),
    /// The service answered with a non-success status
    Rejected { status: u16, body: String },
}

/// Async client shared by the geocoding and forecast stages
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteoClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| PlannerError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            geocoding_url: config.geocoding_url.trim_end_matches('/').to_string(),
            forecast_url: config.forecast_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up candidate matches for a place name, best match first
    #[instrument(skip(self), fields(location = place_name))]
    pub async fn geocode(&self, place_name: &str) -> Result<Vec<GeocodingResult>> {
        let url = format!(
            "{}/search?name={}&count=1&language=en&format=json",
            self.geocoding_url,
            urlencoding::encode(place_name)
        );
        debug!("Geocoding request URL: {}", url);

        let start_time = Instant::now();
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Geocoding request failed with status {}", status);
            return Err(PlannerError::transport(format!(
                "Geocoding request for '{place_name}' failed with status: {status}"
            )));
        }

        let body = response.text().await?;
        let parsed: GeocodingResponse = serde_json::from_str(&body).map_err(|e| {
            PlannerError::upstream(format!("Invalid geocoding data received: {e}"), body.clone())
        })?;

        let results = parsed.results.unwrap_or_default();
        info!(
            "Found {} geocoding results for '{}' in {:.3}s",
            results.len(),
            place_name,
            start_time.elapsed().as_secs_f64()
        );

        Ok(results)
    }

    /// Request a single-day forecast for `date` at `coordinates`
    #[instrument(skip(self), fields(lat = coordinates.latitude, lon = coordinates.longitude))]
    pub async fn daily_forecast(
        &self,
        coordinates: Coordinates,
        date: NaiveDate,
    ) -> Result<ForecastReply> {
        let day = date.format("%Y-%m-%d");
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&daily={}&timezone=UTC&start_date={}&end_date={}",
            self.forecast_url,
            coordinates.latitude,
            coordinates.longitude,
            DAILY_FIELDS,
            day,
            day
        );
        debug!("Forecast request URL: {}", url);

        let start_time = Instant::now();
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        let total_duration = start_time.elapsed();

        if total_duration.as_secs() > 5 {
            warn!(
                "Slow forecast API response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        if !status.is_success() {
            debug!("Forecast request rejected with status {}", status);
            return Ok(ForecastReply::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ForecastResponse = serde_json::from_str(&body).map_err(|e| {
            PlannerError::upstream(format!("Invalid forecast data received: {e}"), body.clone())
        })?;

        info!(
            "Retrieved forecast for {} in {:.3}s",
            day,
            total_duration.as_secs_f64()
        );

        Ok(ForecastReply::Data(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> OpenMeteoClient {
        let config = WeatherConfig {
            geocoding_url: server.url("/v1"),
            forecast_url: server.url("/v1"),
            ..WeatherConfig::default()
        };
        OpenMeteoClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_geocode_encodes_place_name() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/search")
                    .query_param("name", "Bali, Indonesia");
                then.status(200).json_body(json!({
                    "results": [{"name": "Bali", "latitude": -8.4095, "longitude": 115.1889}]
                }));
            })
            .await;

        let results = client_for(&server).geocode("Bali, Indonesia").await.unwrap();
        mock.assert_async().await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].latitude, -8.4095);
    }

    #[tokio::test]
    async fn test_geocode_server_error_is_transport() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/search");
                then.status(503);
            })
            .await;

        let err = client_for(&server).geocode("Bali").await.unwrap_err();
        assert!(matches!(err, PlannerError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_forecast_rejection_is_returned_not_raised() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/forecast");
                then.status(400)
                    .json_body(json!({"error": true, "reason": "Invalid date"}));
            })
            .await;

        let coords = Coordinates::new(1.0, 2.0).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
        let reply = client_for(&server).daily_forecast(coords, date).await.unwrap();
        match reply {
            ForecastReply::Rejected { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("Invalid date"));
            }
            ForecastReply::Data(_) => panic!("expected a rejection"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport() {
        let config = WeatherConfig {
            geocoding_url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 1,
            ..WeatherConfig::default()
        };
        let client = OpenMeteoClient::new(&config).unwrap();
        let err = client.geocode("Bali").await.unwrap_err();
        assert!(matches!(err, PlannerError::Transport { .. }));
    }
}
