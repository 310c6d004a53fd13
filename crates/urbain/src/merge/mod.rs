//! Folding search results into the working set.
//!
//! Raw hits are first turned into classified [`Place`]s, then de-duplicated against the
//! places already known. Two records denote the same physical place when they share a
//! [`DedupKey`]: normalized name plus exact position. Known places always win; a later
//! search never overwrites their attributes.

use std::fmt;

use ahash::AHashSet;
use itertools::Itertools;
use tracing::{debug, instrument};
use urbain_data::{Category, Place, RawHit};
use uuid::Uuid;

use crate::classify::classify;

pub const SEARCH_DESCRIPTION: &str =
    "Lieu identifié via Google Maps. Cliquez pour voir les détails.";
pub const SEARCH_ADDRESS: &str = "Adresse Google Maps";

/// Identity of a physical place for de-duplication purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey(String);

impl DedupKey {
    #[must_use]
    pub fn for_place(place: &Place) -> Self {
        // `+ 0.0` folds -0.0 into 0.0 so both print the same
        let lat = place.position.lat + 0.0;
        let lng = place.position.lng + 0.0;
        Self(format!(
            "{}|{lat}|{lng}",
            place.name.split_whitespace().join(" ").to_lowercase()
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn short_random_id() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// Build a classified place from a provider hit.
///
/// Returns `None` for malformed hits: a blank title, or a missing or non-finite position.
#[must_use]
pub fn place_from_hit(hit: RawHit, hint: Option<Category>, default_rating: f32) -> Option<Place> {
    let title = hit.title.as_deref().map(str::trim).unwrap_or_default();
    let Some(position) = hit.position else {
        debug!(title, "Dropping hit without a position");
        return None;
    };
    if !position.is_finite() {
        debug!(title, ?position, "Dropping hit with a non-finite position");
        return None;
    }
    if title.is_empty() {
        debug!(?position, "Dropping hit without a title");
        return None;
    }

    let category = classify(title, hint);
    let id = hit.provider_id.unwrap_or_else(short_random_id);
    let image = format!("https://picsum.photos/seed/{id}/400/200");

    Some(
        Place::new(id, title, category, position)
            .with_description(SEARCH_DESCRIPTION)
            .with_address(SEARCH_ADDRESS)
            .with_rating(default_rating)
            .with_image(image),
    )
}

/// Convert a provider batch, dropping malformed hits.
#[must_use]
pub fn places_from_hits(
    hits: Vec<RawHit>,
    hint: Option<Category>,
    default_rating: f32,
) -> Vec<Place> {
    let total = hits.len();
    let places: Vec<Place> = hits
        .into_iter()
        .filter_map(|hit| place_from_hit(hit, hint, default_rating))
        .collect();
    if places.len() < total {
        debug!(
            dropped = total - places.len(),
            kept = places.len(),
            "Dropped malformed hits"
        );
    }
    places
}

/// The entries of `batch` that are genuinely new with respect to `existing`.
///
/// A candidate is dropped when its key or its id is already known, or when an earlier
/// candidate of the same batch had the same key or id. Batch order is preserved.
#[must_use]
pub fn new_unique_places(existing: &[Place], batch: &[Place]) -> Vec<Place> {
    let mut seen_keys: AHashSet<DedupKey> = existing.iter().map(DedupKey::for_place).collect();
    let mut seen_ids: AHashSet<&str> = existing.iter().map(|p| p.id.as_str()).collect();

    let mut fresh = Vec::new();
    for candidate in batch {
        let key = DedupKey::for_place(candidate);
        if seen_keys.contains(&key) || seen_ids.contains(candidate.id.as_str()) {
            debug!(%key, id = %candidate.id, "Skipping already known place");
            continue;
        }
        seen_keys.insert(key);
        seen_ids.insert(candidate.id.as_str());
        fresh.push(candidate.clone());
    }
    fresh
}

/// `existing` followed by the new entries of `batch`. Inputs are left untouched.
#[instrument(name = "Merge places", skip_all, fields(existing = existing.len(), batch = batch.len()), level = "debug")]
#[must_use]
pub fn merge_places(existing: &[Place], batch: &[Place]) -> Vec<Place> {
    let fresh = new_unique_places(existing, batch);
    debug!(added = fresh.len(), "Merged batch");
    existing.iter().cloned().chain(fresh).collect()
}
