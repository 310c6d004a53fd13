//! Search provider boundary and request sequencing.
//!
//! The engine does not care how hits are produced. Anything implementing
//! [`PlaceSearchProvider`] can feed it; the Gemini client from `urbain-data` is the
//! production implementation. Classification and de-duplication happen after the provider
//! returns, in [`crate::PlaceExplorer`].

use std::future::Future;

pub use error::SearchError;
use serde::{Deserialize, Serialize};
use urbain_data::{Category, Coordinates, RawHit};

/// Query text used when browsing everything.
pub const BROAD_QUERY: &str =
    "popular places, restaurants, hotels, bakeries, parks, pharmacies, supermarkets, monuments";

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchQuery {
    All,
    Category(Category),
    Text(String),
}

impl SearchQuery {
    /// Interpret free text. Only an exact category label or the `ALL` keyword is special;
    /// anything else, including "bus" or "hotel", stays free text without a hint.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == "ALL" {
            return Self::All;
        }
        Category::ALL
            .into_iter()
            .find(|c| c.label() == trimmed)
            .map_or_else(|| Self::Text(trimmed.to_string()), Self::Category)
    }

    /// Text sent to the provider.
    #[must_use]
    pub fn query_text(&self) -> &str {
        match self {
            Self::All => BROAD_QUERY,
            Self::Category(category) => category.label(),
            Self::Text(text) => text,
        }
    }

    /// Category trusted for results the keyword rules cannot place.
    #[must_use]
    pub fn category_hint(&self) -> Option<Category> {
        match self {
            Self::Category(category) => Some(*category),
            Self::All | Self::Text(_) => None,
        }
    }
}

/// A fully specified provider request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: SearchQuery,
    pub center: Coordinates,
}

impl SearchRequest {
    #[must_use]
    pub fn new(query: SearchQuery, center: Coordinates) -> Self {
        Self { query, center }
    }
}

/// What a provider hands back for one request.
pub type RawHitBatch = Result<Vec<RawHit>, SearchError>;

/// Source of raw place hits.
pub trait PlaceSearchProvider {
    fn search(&self, request: &SearchRequest) -> impl Future<Output = RawHitBatch> + Send;
}

#[cfg(feature = "remote_search")]
impl PlaceSearchProvider for urbain_data::GeminiClient {
    async fn search(&self, request: &SearchRequest) -> RawHitBatch {
        Ok(self
            .search_places(request.query.query_text(), request.center)
            .await?)
    }
}

/// Handle for one in-flight search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    pub(crate) seq: u64,
    pub(crate) request: SearchRequest,
}

impl SearchTicket {
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    #[must_use]
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }
}

/// Monotonic search counter. Only the newest ticket is current.
#[derive(Debug, Clone, Default)]
pub struct SearchSequence {
    latest: u64,
}

impl SearchSequence {
    pub fn issue(&mut self, request: SearchRequest) -> SearchTicket {
        self.latest += 1;
        SearchTicket {
            seq: self.latest,
            request,
        }
    }

    #[must_use]
    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        ticket.seq == self.latest
    }

    #[must_use]
    pub fn latest(&self) -> u64 {
        self.latest
    }
}

/// How a completed search affected the working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The batch was merged; `added` places were new
    Merged { added: usize },
    /// The provider failed; the working set is unchanged
    Failed,
    /// A newer search was started before this one finished
    Stale,
}

impl SearchOutcome {
    #[must_use]
    pub fn added(self) -> usize {
        match self {
            Self::Merged { added } => added,
            Self::Failed | Self::Stale => 0,
        }
    }
}

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum SearchError {
        #[error("Provider error: {0}")]
        Provider(#[from] urbain_data::DataError),
        #[error(transparent)]
        Other(#[from] anyhow::Error),
    }
}
