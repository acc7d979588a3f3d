//! Weather stage: destination forecast for a single day
//!
//! Resolves the destination, fetches one day of daily aggregates and reduces
//! them to a [`ForecastSummary`]. When the forecast service rejects a date as
//! outside its horizon, the request is resubmitted once for the last date the
//! service reports as allowed.

use crate::api::{ForecastReply, OpenMeteoClient};
use crate::location_resolver::GeoResolver;
use crate::models::{
    Coordinates, ForecastSummary, UmbrellaRecommendation, weather_code_to_description,
};
use crate::{PlannerError, Result};
use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

pub mod open_meteo;

use open_meteo::{DailyData, ForecastResponse, parse_allowed_range, rejection_reason};

/// The first request plus at most one range-clamped resubmission
const MAX_FORECAST_ATTEMPTS: u32 = 2;

/// Produces the forecast summary for a destination and date
#[derive(Debug, Clone)]
pub struct WeatherEstimator {
    client: OpenMeteoClient,
    resolver: GeoResolver,
}

impl WeatherEstimator {
    pub fn new(client: OpenMeteoClient, resolver: GeoResolver) -> Self {
        Self { client, resolver }
    }

    /// Resolve `destination` and summarize its forecast for `date`
    #[instrument(skip(self))]
    pub async fn run(&self, destination: &str, date: NaiveDate) -> Result<ForecastSummary> {
        let coordinates = self.resolver.resolve(destination).await?;
        let (forecast_date, response) = self.fetch_with_clamp(coordinates, date).await?;

        let daily = response
            .daily
            .filter(|daily| !daily.is_empty())
            .ok_or_else(|| PlannerError::data_unavailable("No weather data returned"))?;

        let summary = summarize(destination, date, forecast_date, coordinates, &daily);
        info!(
            "Forecast for {} on {}: max {:?}, precipitation {:?}mm, umbrella {}",
            destination,
            forecast_date,
            summary.temp_max,
            summary.precipitation_mm,
            summary.umbrella_recommendation.as_str()
        );
        Ok(summary)
    }

    /// Fetch the forecast, clamping to the allowed window on the first
    /// out-of-range rejection. Returns the date actually served.
    async fn fetch_with_clamp(
        &self,
        coordinates: Coordinates,
        date: NaiveDate,
    ) -> Result<(NaiveDate, ForecastResponse)> {
        let mut requested = date;

        for attempt in 1..=MAX_FORECAST_ATTEMPTS {
            debug!("Forecast attempt {}/{} for {}", attempt, MAX_FORECAST_ATTEMPTS, requested);

            match self.client.daily_forecast(coordinates, requested).await? {
                ForecastReply::Data(response) => return Ok((requested, response)),
                ForecastReply::Rejected { status, body } => {
                    let reason = rejection_reason(&body);
                    match clamp_date(attempt, &reason) {
                        Some(allowed_end) => {
                            warn!(
                                "Date {} outside forecast range, retrying with {}",
                                requested, allowed_end
                            );
                            requested = allowed_end;
                        }
                        None => {
                            return Err(PlannerError::upstream(
                                format!("Forecast request failed with status {status}: {reason}"),
                                body,
                            ));
                        }
                    }
                }
            }
        }

        Err(PlannerError::upstream(
            "Forecast request attempts exhausted",
            String::new(),
        ))
    }
}

/// Retry date for a rejection: the allowed window's end, on the first attempt only
fn clamp_date(attempt: u32, reason: &str) -> Option<NaiveDate> {
    if attempt > 1 {
        return None;
    }
    parse_allowed_range(reason).map(|(_, allowed_end)| allowed_end)
}

/// Reduce the first day of a daily block to a summary
#[must_use]
pub fn summarize(
    destination: &str,
    date: NaiveDate,
    forecast_date: NaiveDate,
    coordinates: Coordinates,
    daily: &DailyData,
) -> ForecastSummary {
    let precipitation_mm = daily.first_precipitation();
    let weather_code = daily.first_weather_code();

    ForecastSummary {
        destination: destination.to_string(),
        date,
        forecast_date,
        coordinates,
        temp_max: daily.first_temperature_max(),
        temp_min: daily.first_temperature_min(),
        precipitation_mm,
        weather_code,
        description: weather_code.map(|code| weather_code_to_description(code).to_string()),
        umbrella_recommendation: UmbrellaRecommendation::from_precipitation(precipitation_mm),
    }
}
