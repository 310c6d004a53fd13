//! Raw search hits as returned by a place-search provider.
//!
//! A hit is deliberately loose: providers may omit a title or a position, and it is the
//! engine's job to drop those before they reach the working set.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::place::Coordinates;

#[cfg(feature = "remote_search")]
mod fetch;
#[cfg(feature = "remote_search")]
pub use fetch::{GeminiClient, GeminiConfig, INSIGHT_EMPTY_TEXT, INSIGHT_FALLBACK_TEXT};

/// An unclassified place returned by a search provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHit {
    pub title: Option<String>,
    pub position: Option<Coordinates>,
    /// Provider-assigned identifier, reused as the place id when present
    pub provider_id: Option<String>,
}

impl RawHit {
    pub fn new(title: impl Into<String>, position: Coordinates) -> Self {
        Self {
            title: Some(title.into()),
            position: Some(position),
            provider_id: None,
        }
    }

    #[must_use]
    pub fn with_provider_id(mut self, id: impl Into<String>) -> Self {
        self.provider_id = Some(id.into());
        self
    }
}

/// Body of a grounded `generateContent` response, reduced to the fields we read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundedResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroundingChunk {
    pub maps: Option<MapsChunk>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsChunk {
    pub title: Option<String>,
    pub place_id: Option<String>,
    pub uri: Option<String>,
    pub center: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl GroundedResponse {
    /// Extract the map hits of the first candidate.
    ///
    /// Chunks without a maps payload are skipped. Positions that are not finite are
    /// turned into `None` so the hit is later dropped as malformed.
    #[must_use]
    pub fn into_hits(self) -> Vec<RawHit> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Vec::new();
        };
        let chunks = candidate
            .grounding_metadata
            .map(|m| m.grounding_chunks)
            .unwrap_or_default();

        let total = chunks.len();
        let hits: Vec<RawHit> = chunks
            .into_iter()
            .filter_map(|chunk| chunk.maps)
            .map(|maps| RawHit {
                title: maps.title,
                position: maps
                    .center
                    .and_then(|c| Coordinates::new(c.latitude, c.longitude).ok()),
                provider_id: maps.place_id.filter(|id| !id.is_empty()),
            })
            .collect();
        debug!(chunks = total, hits = hits.len(), "Extracted map hits");
        hits
    }

    /// Concatenated text of the first candidate, if any.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}
