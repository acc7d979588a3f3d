//! Spot recommendations from a generative text service
//!
//! Talks to an OpenAI-compatible chat completions endpoint (Gemini by
//! default). Available only when an API key is configured.

use super::RecommendationStrategy;
use crate::config::GenerativeConfig;
use crate::models::{ForecastSummary, RecommendationSource, RecommendedSpot};
use crate::{PlannerError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Generative recommender backed by a chat completions API
#[derive(Debug, Clone)]
pub struct GenerativeStrategy {
    http: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GenerativeStrategy {
    pub fn from_config(config: &GenerativeConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PlannerError::config(format!("Failed to create HTTP client: {e}")))?;

        let api_key = if config.enabled {
            config.resolved_api_key()
        } else {
            None
        };

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Compose the natural-language prompt for a forecast
    #[must_use]
    pub fn prompt_for_spots(forecast: &ForecastSummary, destination: &str) -> String {
        let temp_max = forecast
            .temp_max
            .map_or_else(|| "unknown".to_string(), |t| format!("{t:.1}°C"));

        format!(
            "You are a travel assistant. For {destination} on {date}, the forecast: \
             max temp {temp_max}, umbrella {umbrella}. \
             Return 3 recommended places to visit, each with name, type, a one-line reason, \
             and best time to visit. \
             Output as JSON list of objects with keys: name, type, reason, best_time.",
            date = forecast.date,
            umbrella = forecast.umbrella_recommendation.as_str(),
        )
    }

    async fn complete(&self, api_key: &str, prompt: String) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlannerError::recommendation_unavailable(format!(
                "generative service returned status {status}"
            )));
        }

        let chat: ChatResponse = response.json().await?;
        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| PlannerError::recommendation_unavailable("empty completion"))
    }
}

#[async_trait]
impl RecommendationStrategy for GenerativeStrategy {
    fn source(&self) -> RecommendationSource {
        RecommendationSource::Generative
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    #[instrument(skip(self, forecast))]
    async fn recommend(
        &self,
        forecast: &ForecastSummary,
        destination: &str,
    ) -> Result<Vec<RecommendedSpot>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            PlannerError::recommendation_unavailable("generative API key missing")
        })?;

        let prompt = Self::prompt_for_spots(forecast, destination);
        debug!("Requesting spots from {}", self.model);
        let text = self.complete(api_key, prompt).await?;

        let spots = parse_spots(&text);
        if spots.is_empty() {
            warn!("Generative response was not a usable JSON list");
        }
        Ok(spots)
    }
}

/// Parse a JSON list of spots out of model output.
///
/// Accepts a bare list, a fenced code block, or a list embedded in prose.
/// Anything else yields an empty list.
#[must_use]
pub fn parse_spots(text: &str) -> Vec<RecommendedSpot> {
    let trimmed = strip_code_fence(text.trim());

    let parsed = serde_json::from_str::<Vec<RecommendedSpot>>(trimmed)
        .ok()
        .or_else(|| {
            let start = trimmed.find('[')?;
            let end = trimmed.rfind(']')?;
            if start >= end {
                return None;
            }
            serde_json::from_str::<Vec<RecommendedSpot>>(&trimmed[start..=end]).ok()
        });

    parsed
        .unwrap_or_default()
        .into_iter()
        .filter(|spot| !spot.name.trim().is_empty())
        .collect()
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening fence line
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
