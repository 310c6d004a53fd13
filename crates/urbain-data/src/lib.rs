//! Place model, curated seed data and search-provider access for Urbain.
//!
//! This crate owns the data side of the engine: the closed [`Category`] enumeration and its
//! rendering descriptors, the [`Place`] record, the seed working set, and the raw hits a
//! search provider hands back. Classification, de-duplication and filtering live in the
//! `urbain` crate.

pub mod category;
pub mod place;
pub mod raw;
pub mod seed;
pub mod test_data;

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum DataError {
        #[error("Coordinates must be finite, got ({lat}, {lng})")]
        InvalidCoordinates { lat: f64, lng: f64 },
        #[error("Unknown category: {0}")]
        UnknownCategory(String),
        #[error("Serialization error: {0}")]
        Serde(#[from] serde_json::Error),
        #[cfg(feature = "remote_search")]
        #[error("HTTP error: {0}")]
        Http(#[from] reqwest::Error),
        #[error("No API key configured for the search provider (set GEMINI_API_KEY)")]
        MissingApiKey,
    }

    pub type Result<T> = std::result::Result<T, DataError>;
}

pub use error::{DataError, Result};

// Re-export main types
pub use category::{Category, CategoryDescriptor, SponsorTier};
pub use place::{Coordinates, Place, PlaceStats, PublicationStatus};
pub use raw::RawHit;
#[cfg(feature = "remote_search")]
pub use raw::{GeminiClient, GeminiConfig};
pub use seed::seed_places;
