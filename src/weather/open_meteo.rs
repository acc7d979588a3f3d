//! `OpenMeteo` API response structures and rejection parsing

use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// Marker the forecast service puts in `reason` when the date is past its horizon
const OUT_OF_RANGE_MARKER: &str = "out of allowed range";

static ALLOWED_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"from (\d{4}-\d{2}-\d{2}) to (\d{4}-\d{2}-\d{2})")
        .expect("allowed range pattern is valid")
});

/// Forecast response from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub daily: Option<DailyData>,
}

/// Daily weather data from `OpenMeteo`
#[derive(Debug, Deserialize, Default)]
pub struct DailyData {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Option<Vec<Option<f64>>>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Option<Vec<Option<f64>>>,
    #[serde(rename = "precipitation_sum")]
    pub precipitation: Option<Vec<Option<f64>>>,
    /// Kept as raw numbers; see [`DailyData::first_weather_code`]
    #[serde(rename = "weathercode", alias = "weather_code")]
    pub weather_code: Option<Vec<Option<f64>>>,
}

impl DailyData {
    /// True when the block carries no series at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
            && self.temperature_max.is_none()
            && self.temperature_min.is_none()
            && self.precipitation.is_none()
            && self.weather_code.is_none()
    }

    #[must_use]
    pub fn first_temperature_max(&self) -> Option<f64> {
        first_value(self.temperature_max.as_ref())
    }

    #[must_use]
    pub fn first_temperature_min(&self) -> Option<f64> {
        first_value(self.temperature_min.as_ref())
    }

    #[must_use]
    pub fn first_precipitation(&self) -> Option<f64> {
        first_value(self.precipitation.as_ref())
    }

    /// First WMO code; values that are not a whole number in `0..=255` read as missing
    #[must_use]
    pub fn first_weather_code(&self) -> Option<u8> {
        first_value(self.weather_code.as_ref())
            .filter(|code| code.fract() == 0.0 && (0.0..=255.0).contains(code))
            .map(|code| code as u8)
    }
}

fn first_value<T: Copy>(series: Option<&Vec<Option<T>>>) -> Option<T> {
    series.and_then(|values| values.first().copied().flatten())
}

/// Error payload returned with a non-success status
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub reason: String,
}

/// Geocoding response from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingResult {
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
}

/// Extract the human-readable reason from a rejection body.
/// Falls back to the raw body when it is not the JSON error payload.
#[must_use]
pub fn rejection_reason(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(payload) if !payload.reason.is_empty() => payload.reason,
        _ => body.to_string(),
    }
}

/// The allowed date window of an out-of-range rejection, if `reason` is one
#[must_use]
pub fn parse_allowed_range(reason: &str) -> Option<(NaiveDate, NaiveDate)> {
    if !reason.contains(OUT_OF_RANGE_MARKER) {
        return None;
    }

    let captures = ALLOWED_RANGE.captures(reason)?;
    let start = NaiveDate::parse_from_str(captures.get(1)?.as_str(), "%Y-%m-%d").ok()?;
    let end = NaiveDate::parse_from_str(captures.get(2)?.as_str(), "%Y-%m-%d").ok()?;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REASON: &str = "Parameter 'start_date' is out of allowed range from 2025-01-01 to 2025-11-30";

    #[test]
    fn test_parse_allowed_range() {
        let (start, end) = parse_allowed_range(REASON).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 11, 30).unwrap());
    }

    #[test]
    fn test_parse_allowed_range_requires_marker() {
        assert!(parse_allowed_range("Valid from 2025-01-01 to 2025-11-30").is_none());
    }

    #[test]
    fn test_parse_allowed_range_without_window() {
        assert!(parse_allowed_range("Parameter 'start_date' is out of allowed range").is_none());
        assert!(
            parse_allowed_range("out of allowed range from 2025-13-01 to 2025-13-30").is_none()
        );
    }

    #[test]
    fn test_rejection_reason_prefers_json_reason() {
        let body = format!(r#"{{"error":true,"reason":"{REASON}"}}"#);
        assert_eq!(rejection_reason(&body), REASON);
        assert_eq!(rejection_reason("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_weather_code_tolerates_odd_numbers() {
        let daily: DailyData =
            serde_json::from_str(r#"{"time":["2025-12-20"],"weathercode":[3.0]}"#).unwrap();
        assert_eq!(daily.first_weather_code(), Some(3));

        for raw in ["300", "2.5", "-1"] {
            let daily: DailyData =
                serde_json::from_str(&format!(r#"{{"weathercode":[{raw}]}}"#)).unwrap();
            assert_eq!(daily.first_weather_code(), None, "weathercode {raw}");
        }
    }

    #[test]
    fn test_daily_first_values_tolerate_gaps() {
        let daily: DailyData = serde_json::from_str(
            r#"{"time":["2025-12-20"],"temperature_2m_max":[30.5],"precipitation_sum":[null]}"#,
        )
        .unwrap();
        assert!(!daily.is_empty());
        assert_eq!(daily.first_temperature_max(), Some(30.5));
        assert_eq!(daily.first_temperature_min(), None);
        assert_eq!(daily.first_precipitation(), None);
        assert_eq!(daily.first_weather_code(), None);
    }
}
