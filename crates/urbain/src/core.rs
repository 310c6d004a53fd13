//! The session state container.
//!
//! [`PlaceExplorer`] owns everything the map view renders from: the working set (seed
//! places followed by fetched ones), favorites, the active filter, the selection and the
//! device location. Front-ends call its methods from their event handlers and re-render
//! from [`PlaceExplorer::displayed`]; the pure engine functions never see this state
//! directly.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use urbain::{MemoryStore, PlaceExplorer, PlaceFilter, SearchQuery};
//! use urbain::data::{Category, GeminiClient};
//!
//! # async fn run() -> Result<(), urbain::error::UrbainError> {
//! let provider = GeminiClient::from_env()?;
//! let mut explorer = PlaceExplorer::with_seed_places(Default::default(), MemoryStore::new())?;
//!
//! let center = explorer.config().default_center;
//! let outcome = explorer
//!     .search(&provider, SearchQuery::Category(Category::Bakery), center)
//!     .await;
//! println!("{} new places", outcome.added());
//!
//! explorer.set_filter(PlaceFilter::Category(Category::Bakery));
//! for place in explorer.displayed() {
//!     println!("{place}");
//! }
//! # Ok(())
//! # }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;
use urbain_data::{Category, Coordinates, Place, PublicationStatus, seed_places};

use crate::{
    config::ExplorerConfig,
    dashboard::{OwnerDashboard, boosted_places},
    error::Result,
    filter::{Favorites, PlaceFilter, filter_places},
    geo::{Route, directions_url, distance_meters, format_distance},
    location::{LocationEvent, LocationStatus, LocationWatch},
    merge::{new_unique_places, places_from_hits},
    search::{
        PlaceSearchProvider, RawHitBatch, SearchOutcome, SearchQuery, SearchRequest,
        SearchSequence, SearchTicket,
    },
    store::{KeyValueStore, Preferences, save_favorites, save_geo_enabled},
};

pub const SUBMITTED_ADDRESS: &str = "Adresse ajoutée par la communauté";

/// A place proposed through the creation form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlace {
    pub name: String,
    pub category: Category,
    pub description: String,
    pub position: Coordinates,
    pub image: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaceFormError {
    #[error("name is required")]
    MissingName,
    #[error("description is required")]
    MissingDescription,
    #[error("position must be finite, got {0}")]
    InvalidPosition(Coordinates),
}

impl NewPlace {
    fn validate(&self) -> std::result::Result<(), PlaceFormError> {
        if self.name.trim().is_empty() {
            return Err(PlaceFormError::MissingName);
        }
        if self.description.trim().is_empty() {
            return Err(PlaceFormError::MissingDescription);
        }
        if !self.position.is_finite() {
            return Err(PlaceFormError::InvalidPosition(self.position));
        }
        Ok(())
    }
}

/// Session state for one map view.
#[derive(Debug)]
pub struct PlaceExplorer<S: KeyValueStore> {
    config: ExplorerConfig,
    /// Seed places followed by fetched places
    places: Vec<Place>,
    seed_len: usize,
    favorites: Favorites,
    filter: PlaceFilter,
    selected: Option<String>,
    location: LocationStatus,
    last_fix: Option<Coordinates>,
    geo_enabled: bool,
    watch: Option<LocationWatch>,
    sequence: SearchSequence,
    store: S,
}

impl<S: KeyValueStore> PlaceExplorer<S> {
    /// Start a session over `seed`, restoring preferences from `store`.
    #[instrument(name = "Create PlaceExplorer", skip_all, fields(seed = seed.len()), level = "info")]
    pub fn new(config: ExplorerConfig, seed: Vec<Place>, store: S) -> Result<Self> {
        let prefs = Preferences::load(&store)?;
        info!(
            favorites = prefs.favorites.len(),
            geo_enabled = prefs.geo_enabled,
            "Restored preferences"
        );
        Ok(Self {
            config,
            seed_len: seed.len(),
            places: seed,
            favorites: prefs.favorites,
            filter: PlaceFilter::All,
            selected: None,
            location: LocationStatus::Idle,
            last_fix: None,
            geo_enabled: prefs.geo_enabled,
            watch: None,
            sequence: SearchSequence::default(),
            store,
        })
    }

    /// Start a session over the curated seed places.
    pub fn with_seed_places(config: ExplorerConfig, store: S) -> Result<Self> {
        Self::new(config, seed_places(), store)
    }

    #[must_use]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Seed places followed by fetched places.
    #[must_use]
    pub fn working_set(&self) -> &[Place] {
        &self.places
    }

    #[must_use]
    pub fn seed_places(&self) -> &[Place] {
        &self.places[..self.seed_len]
    }

    #[must_use]
    pub fn fetched_places(&self) -> &[Place] {
        &self.places[self.seed_len..]
    }

    #[must_use]
    pub fn place(&self, id: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    // ---- Filtering -------------------------------------------------------

    #[must_use]
    pub fn filter(&self) -> PlaceFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: PlaceFilter) {
        debug!(%filter, "Filter changed");
        self.filter = filter;
    }

    /// The places the map should show right now.
    #[must_use]
    pub fn displayed(&self) -> Vec<&Place> {
        filter_places(&self.places, self.filter, &self.favorites)
    }

    /// Sponsored places among the displayed ones.
    #[must_use]
    pub fn boosted(&self) -> Vec<&Place> {
        boosted_places(&self.displayed())
    }

    // ---- Selection & favorites -----------------------------------------

    /// Select a place by id; unknown ids clear the selection.
    pub fn select(&mut self, id: &str) -> Option<&Place> {
        self.selected = self.place(id).map(|p| p.id.clone());
        self.selected()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Place> {
        self.selected.as_deref().and_then(|id| self.place(id))
    }

    #[must_use]
    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Flip and persist the favorite state of `id`; returns the new state.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        let now_favorite = self.favorites.toggle(id);
        save_favorites(&mut self.store, &self.favorites)?;
        debug!(id, now_favorite, "Favorite toggled");
        Ok(now_favorite)
    }

    // ---- Search ----------------------------------------------------------

    /// Register a new search; any earlier ticket becomes stale.
    pub fn begin_search(&mut self, query: SearchQuery, center: Coordinates) -> SearchTicket {
        let ticket = self.sequence.issue(SearchRequest::new(query, center));
        info!(seq = ticket.seq(), query = ticket.request().query.query_text(), "Search started");
        ticket
    }

    /// Fold a provider response into the working set.
    ///
    /// Failures leave the working set untouched. With stale-search discarding enabled, a
    /// response for a superseded ticket is ignored.
    #[instrument(name = "Complete search", skip_all, fields(seq = ticket.seq()), level = "info")]
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        result: RawHitBatch,
    ) -> SearchOutcome {
        if self.config.discard_stale_searches && !self.sequence.is_current(&ticket) {
            info!(latest = self.sequence.latest(), "Discarding stale search response");
            return SearchOutcome::Stale;
        }

        let mut hits = match result {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "Search failed, no new places");
                return SearchOutcome::Failed;
            }
        };
        hits.truncate(self.config.max_search_results);

        let batch = places_from_hits(
            hits,
            ticket.request.query.category_hint(),
            self.config.default_rating,
        );
        let fresh = new_unique_places(&self.places, &batch);
        let added = fresh.len();
        self.places.extend(fresh);

        info!(
            candidates = batch.len(),
            added,
            working_set = self.places.len(),
            "Search merged"
        );
        SearchOutcome::Merged { added }
    }

    /// Run a search against `provider` and merge its results.
    pub async fn search<P: PlaceSearchProvider>(
        &mut self,
        provider: &P,
        query: SearchQuery,
        center: Coordinates,
    ) -> SearchOutcome {
        let ticket = self.begin_search(query, center);
        let result = provider.search(ticket.request()).await;
        self.complete_search(ticket, result)
    }

    /// Where searches should be centred: the device position if known, else the default.
    #[must_use]
    pub fn search_center(&self) -> Coordinates {
        self.last_fix.unwrap_or(self.config.default_center)
    }

    // ---- User-submitted places ------------------------------------------

    /// Add a place from the creation form at the front of the fetched places.
    #[instrument(name = "Submit place", skip_all, level = "info")]
    pub fn submit_place(&mut self, new_place: NewPlace) -> Result<&Place> {
        new_place.validate()?;

        let mut stamp = Utc::now().timestamp_millis();
        while self.place(&stamp.to_string()).is_some() {
            stamp += 1;
        }

        let mut place = Place::new(
            stamp.to_string(),
            new_place.name.trim(),
            new_place.category,
            new_place.position,
        )
        .with_description(new_place.description.trim())
        .with_address(SUBMITTED_ADDRESS)
        .with_rating(self.config.default_rating)
        .with_status(PublicationStatus::Pending);
        place.image = new_place.image;
        place.review_count = Some(0);
        place.owner_id.clone_from(&self.config.owner_id);

        info!(id = %place.id, name = %place.name, "Place submitted");
        self.places.insert(self.seed_len, place);
        Ok(&self.places[self.seed_len])
    }

    // ---- Geolocation -----------------------------------------------------

    #[must_use]
    pub fn geo_enabled(&self) -> bool {
        self.geo_enabled
    }

    #[must_use]
    pub fn location_status(&self) -> LocationStatus {
        self.location
    }

    /// Last known device position.
    #[must_use]
    pub fn user_location(&self) -> Option<Coordinates> {
        self.last_fix
    }

    /// Subscribe to device location updates and persist the preference.
    pub fn enable_geolocation(&mut self, watch: LocationWatch) -> Result<()> {
        self.watch = Some(watch);
        self.location = LocationStatus::Locating;
        self.geo_enabled = true;
        save_geo_enabled(&mut self.store, true)?;
        info!("Geolocation enabled");
        Ok(())
    }

    /// Tear down the location subscription and forget the position.
    pub fn disable_geolocation(&mut self) -> Result<()> {
        if let Some(watch) = self.watch.take() {
            watch.cancel();
        }
        self.location = LocationStatus::Idle;
        self.last_fix = None;
        self.geo_enabled = false;
        save_geo_enabled(&mut self.store, false)?;
        info!("Geolocation disabled");
        Ok(())
    }

    /// Record a fix or an error. An error keeps the last good position.
    pub fn apply_location_event(&mut self, event: LocationEvent) -> LocationStatus {
        match event {
            Ok(coords) => self.last_fix = Some(coords),
            Err(error) => warn!(%error, "Location unavailable"),
        }
        self.location = LocationStatus::from(event);
        self.location
    }

    /// Wait for the next update from the active subscription and apply it.
    ///
    /// Returns `None` when no subscription is active or the publisher has gone away.
    pub async fn next_location_event(&mut self) -> Option<LocationStatus> {
        let event = self.watch.as_mut()?.next().await;
        match event {
            Some(event) => Some(self.apply_location_event(event)),
            None => {
                debug!("Location publisher closed");
                self.watch = None;
                None
            }
        }
    }

    // ---- Distance & directions -------------------------------------------

    /// Distance in meters from the device to place `id`.
    #[must_use]
    pub fn distance_meters_to(&self, id: &str) -> Option<f64> {
        let from = self.last_fix?;
        let place = self.place(id)?;
        Some(distance_meters(from, place.position))
    }

    /// Display label for the distance to place `id`.
    #[must_use]
    pub fn distance_to(&self, id: &str) -> Option<String> {
        self.distance_meters_to(id).map(format_distance)
    }

    /// Route from the device to place `id`; unavailable without a position.
    #[must_use]
    pub fn route_to(&self, id: &str) -> Option<Route> {
        Some(Route {
            start: self.last_fix?,
            end: self.place(id)?.position,
        })
    }

    /// External maps deep link to place `id`.
    #[must_use]
    pub fn directions_url(&self, id: &str) -> Option<Url> {
        self.place(id).map(|p| directions_url(p.position))
    }

    // ---- Owner -----------------------------------------------------------

    /// Dashboard for the configured owner, if any.
    #[must_use]
    pub fn dashboard(&self) -> Option<OwnerDashboard<'_>> {
        self.config
            .owner_id
            .as_deref()
            .map(|owner| OwnerDashboard::for_owner(&self.places, owner))
    }
}
