//! Urbain Connect - Local Place Discovery Engine
//!
//! Urbain turns loosely structured place hits from a map-grounded search service into a
//! categorized, de-duplicated set of places that a map view can filter, favorite and route
//! to. Everything a front-end renders lives in one [`PlaceExplorer`]; the classification,
//! merging, filtering and geometry underneath are plain functions you can call directly.
//!
//! # Quick Start
//!
//! ```rust
//! use urbain::{MemoryStore, PlaceExplorer, PlaceFilter, SearchQuery};
//! use urbain::data::{Category, Coordinates, RawHit};
//!
//! let mut explorer = PlaceExplorer::with_seed_places(Default::default(), MemoryStore::new())?;
//!
//! // Results normally come from a `PlaceSearchProvider`; here we hand them over directly.
//! let center = explorer.search_center();
//! let ticket = explorer.begin_search(SearchQuery::All, center);
//! let hits = vec![RawHit::new("Boulangerie Royale", Coordinates::new(48.86, 2.34)?)];
//! explorer.complete_search(ticket, Ok(hits));
//!
//! explorer.set_filter(PlaceFilter::Category(Category::Bakery));
//! assert!(explorer.displayed().iter().any(|p| p.name == "Boulangerie Royale"));
//! # Ok::<(), urbain::error::UrbainError>(())
//! ```
//!
//! # Features
//!
//! - **Keyword classification**: French and English keyword rules with diacritic folding
//! - **Idempotent merging**: re-running a search never duplicates a place
//! - **Stale search guard**: responses of superseded searches are dropped
//! - **Persistent preferences**: favorites and the geolocation flag survive restarts
//! - **Cancellable geolocation**: location updates arrive through a watch channel

use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod classify;
mod config;
mod core;
mod dashboard;
pub mod error;
mod filter;
mod geo;
mod location;
mod merge;
mod search;
mod store;

pub use core::{NewPlace, PlaceExplorer, PlaceFormError, SUBMITTED_ADDRESS};

pub use classify::{
    CATEGORY_RULES, CategoryRule, classify, matching_category, normalize_title,
};
pub use config::{
    DEFAULT_CENTER, DEFAULT_RATING, DEFAULT_ZOOM, ExplorerConfig, ExplorerConfigBuilder,
};
pub use dashboard::{OwnerDashboard, boost_offers, boosted_places};
pub use filter::{Favorites, PlaceFilter, filter_places};
pub use geo::{EARTH_RADIUS_M, Route, directions_url, distance_meters, format_distance};
pub use location::{
    GeoError, LocationEvent, LocationPublisher, LocationStatus, LocationWatch, location_channel,
};
pub use merge::{
    DedupKey, SEARCH_ADDRESS, SEARCH_DESCRIPTION, merge_places, new_unique_places,
    place_from_hit, places_from_hits,
};
pub use search::{
    BROAD_QUERY, PlaceSearchProvider, RawHitBatch, SearchError, SearchOutcome, SearchQuery,
    SearchRequest, SearchSequence, SearchTicket,
};
pub use store::{
    DATA_DIR, FAVORITES_KEY, FileStore, GEO_ENABLED_KEY, KeyValueStore, MemoryStore,
    Preferences, StoreError,
};
pub use urbain_data as data;

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Urbain engine.
///
/// `RUST_LOG` takes precedence over `level` when set. Calling this more than once is a
/// no-op.
///
/// # Examples
///
/// ```rust
/// use urbain::init_logging;
/// use tracing::Level;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), urbain::error::UrbainError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), error::UrbainError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?
            .add_directive("reqwest=warn".parse()?)
            .add_directive("hyper_util=warn".parse()?);

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .init();
        Ok(())
    })
}
