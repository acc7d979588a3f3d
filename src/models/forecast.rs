//! Single-day forecast summary and the umbrella tier derived from it

use super::Coordinates;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Qualitative precipitation tier
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UmbrellaRecommendation {
    Low,
    Possible,
    High,
    Unknown,
}

impl UmbrellaRecommendation {
    /// Derive the tier from the day's precipitation sum in mm.
    ///
    /// `> 5` is high, `> 0` is possible, anything else is low; no data is unknown.
    #[must_use]
    pub fn from_precipitation(precipitation_mm: Option<f64>) -> Self {
        match precipitation_mm {
            None => Self::Unknown,
            Some(mm) if mm.is_nan() => Self::Unknown,
            Some(mm) if mm > 5.0 => Self::High,
            Some(mm) if mm > 0.0 => Self::Possible,
            Some(_) => Self::Low,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Possible => "possible",
            Self::High => "high",
            Self::Unknown => "unknown",
        }
    }
}

/// Simplified forecast for the destination on the requested day.
///
/// Missing upstream fields stay `None` and serialize as `null`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastSummary {
    pub destination: String,
    /// Date the caller asked for
    pub date: NaiveDate,
    /// Date the forecast service actually answered for (differs after a range clamp)
    pub forecast_date: NaiveDate,
    pub coordinates: Coordinates,
    /// Daily maximum temperature in Celsius
    pub temp_max: Option<f64>,
    /// Daily minimum temperature in Celsius
    pub temp_min: Option<f64>,
    /// Daily precipitation sum in mm
    pub precipitation_mm: Option<f64>,
    /// WMO weather code
    pub weather_code: Option<u8>,
    /// Human-readable description of the weather code
    pub description: Option<String>,
    pub umbrella_recommendation: UmbrellaRecommendation,
}

impl ForecastSummary {
    /// Max temperature with the neutral default used by the scoring heuristics
    #[must_use]
    pub fn temp_max_or_default(&self) -> f64 {
        self.temp_max.unwrap_or(25.0)
    }
}

/// Convert a WMO weather code to human-readable description
#[must_use]
pub fn weather_code_to_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}
