//! Error types and handling for the trip planner

use thiserror::Error;

/// Main error type for a planning run
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Geocoding returned no match for a place name
    #[error("Location not found: {place}")]
    NotFound { place: String },

    /// Network failure or timeout talking to an external service
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The forecast service answered with something we cannot use
    #[error("Upstream error: {message}\nResponse body: {body}")]
    Upstream { message: String, body: String },

    /// The forecast response carried no daily data block
    #[error("Data unavailable: {message}")]
    DataUnavailable { message: String },

    /// A recommendation strategy produced nothing usable.
    /// Only ever observed inside the recommender, which falls back on it.
    #[error("Recommendation unavailable: {reason}")]
    RecommendationUnavailable { reason: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl PlannerError {
    pub fn not_found<S: Into<String>>(place: S) -> Self {
        Self::NotFound {
            place: place.into(),
        }
    }

    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn upstream<S: Into<String>, B: Into<String>>(message: S, body: B) -> Self {
        Self::Upstream {
            message: message.into(),
            body: body.into(),
        }
    }

    pub fn data_unavailable<S: Into<String>>(message: S) -> Self {
        Self::DataUnavailable {
            message: message.into(),
        }
    }

    pub fn recommendation_unavailable<S: Into<String>>(reason: S) -> Self {
        Self::RecommendationUnavailable {
            reason: reason.into(),
        }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PlannerError::NotFound { place } => {
                format!("Could not find '{place}'. Please check the place name.")
            }
            PlannerError::Transport { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            PlannerError::Upstream { message, .. } => {
                format!("The weather service rejected the request: {message}")
            }
            PlannerError::DataUnavailable { .. } => {
                "No forecast data is available for that place and date.".to_string()
            }
            PlannerError::RecommendationUnavailable { reason } => reason.clone(),
            PlannerError::Validation { message } => format!("Invalid input: {message}"),
            PlannerError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PlannerError::transport(format!("request timed out: {err}"))
        } else {
            PlannerError::transport(err.to_string())
        }
    }
}
