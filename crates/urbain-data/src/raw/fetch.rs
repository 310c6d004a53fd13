use std::time::Duration;

use reqwest::Client;
use serde_json::json;
use tracing::{info, instrument, warn};

use super::{GroundedResponse, RawHit};
use crate::{
    DataError, Result,
    place::{Coordinates, Place},
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_SEARCH_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_INSIGHT_MODEL: &str = "gemini-3-flash-preview";

/// Returned when the insight request fails for any reason.
pub const INSIGHT_FALLBACK_TEXT: &str =
    "AI insights are currently unavailable. Please check your connection.";
/// Returned when the model answers with no text.
pub const INSIGHT_EMPTY_TEXT: &str = "Information unavailable at the moment.";

/// Connection settings for the grounded generative search API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub search_model: String,
    pub insight_model: String,
    pub timeout: Duration,
    /// Upper bound on locations requested per search
    pub max_results: usize,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            search_model: DEFAULT_SEARCH_MODEL.to_string(),
            insight_model: DEFAULT_INSIGHT_MODEL.to_string(),
            timeout: Duration::from_secs(30),
            max_results: 20,
        }
    }
}

impl GeminiConfig {
    /// Read the API key from `GEMINI_API_KEY` (or `API_KEY`) and an optional
    /// `URBAIN_GEMINI_MODEL` override.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .map_err(|_| DataError::MissingApiKey)?;
        let mut config = Self {
            api_key,
            ..Self::default()
        };
        if let Ok(model) = std::env::var("URBAIN_GEMINI_MODEL") {
            config.search_model = model;
        }
        Ok(config)
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent",
            self.base_url.trim_end_matches('/')
        )
    }
}

/// HTTP client for place search and place insights.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    #[must_use]
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Ask the provider for real locations matching `query` around `center`.
    #[instrument(name = "Grounded place search", skip(self), level = "info")]
    pub async fn search_places(&self, query: &str, center: Coordinates) -> Result<Vec<RawHit>> {
        let prompt = format!(
            "Find up to {} distinct locations matching \"{query}\" near latitude {}, longitude {}. \
             Prioritize high-rated and popular places. \
             Ensure the list contains real, physical locations available on Google Maps.",
            self.config.max_results, center.lat, center.lng
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "tools": [{ "googleMaps": {} }],
            "toolConfig": {
                "retrievalConfig": {
                    "latLng": { "latitude": center.lat, "longitude": center.lng }
                }
            }
        });

        let response = self.generate(&self.config.search_model, &body).await?;
        let hits = response.into_hits();
        info!(hits = hits.len(), "Place search complete");
        Ok(hits)
    }

    /// A short practical tip about a place. Never fails: errors map to fixed texts.
    #[instrument(name = "Place insight", skip_all, fields(place = %place.id), level = "info")]
    pub async fn place_insight(&self, place: &Place) -> String {
        let prompt = format!(
            "You are an expert urban guide. Provide a short, engaging, and practical insight \
             (max 80 words) about this specific place or this type of service in this location.\n\n\
             Place Name: {}\nCategory: {}\nDescription: {}\n\n\
             Focus on what makes it unique or a useful tip for a visitor. Keep it plain text.",
            place.name, place.category, place.description
        );
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });

        match self.generate(&self.config.insight_model, &body).await {
            Ok(response) => response
                .text()
                .unwrap_or_else(|| INSIGHT_EMPTY_TEXT.to_string()),
            Err(e) => {
                warn!(error = %e, "Insight request failed");
                INSIGHT_FALLBACK_TEXT.to_string()
            }
        }
    }

    async fn generate(&self, model: &str, body: &serde_json::Value) -> Result<GroundedResponse> {
        if self.config.api_key.is_empty() {
            return Err(DataError::MissingApiKey);
        }
        let response = self
            .client
            .post(self.config.endpoint(model))
            .query(&[("key", self.config.api_key.as_str())])
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<GroundedResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_uses_model_and_trims_slash() {
        let config = GeminiConfig {
            base_url: "http://localhost:8080/v1beta/".to_string(),
            ..GeminiConfig::default()
        };
        assert_eq!(
            config.endpoint("gemini-2.5-flash"),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_key_is_reported_before_any_request() {
        let client = GeminiClient::new(GeminiConfig::default()).unwrap();
        let result = client
            .search_places("boulangerie", Coordinates { lat: 48.85, lng: 2.35 })
            .await;
        assert!(matches!(result, Err(DataError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_insight_falls_back_on_failure() {
        let client = GeminiClient::new(GeminiConfig::default()).unwrap();
        let place = crate::seed::seed_places().remove(0);
        assert_eq!(client.place_insight(&place).await, INSIGHT_FALLBACK_TEXT);
    }
}
