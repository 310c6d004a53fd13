//! Deterministic fixtures for tests across the workspace.

use crate::{
    category::{Category, SponsorTier},
    place::{Coordinates, Place, PlaceStats, PublicationStatus},
    raw::RawHit,
};

/// Owner id used by the owned-listing fixtures.
pub const TEST_OWNER_ID: &str = "user-123";

#[must_use]
pub fn coords(lat: f64, lng: f64) -> Coordinates {
    Coordinates { lat, lng }
}

/// A minimal place with the given identity.
#[must_use]
pub fn place(id: &str, name: &str, category: Category, lat: f64, lng: f64) -> Place {
    Place::new(id, name, category, coords(lat, lng))
        .with_description(format!("{name} (fixture)"))
        .with_address("Paris")
        .with_rating(4.0)
}

/// A raw hit with a title and position, without a provider id.
#[must_use]
pub fn hit(title: &str, lat: f64, lng: f64) -> RawHit {
    RawHit::new(title, coords(lat, lng))
}

/// Three listings owned by [`TEST_OWNER_ID`] plus one owned by somebody else.
#[must_use]
pub fn owned_places() -> Vec<Place> {
    vec![
        place("o1", "Boulangerie du Coin", Category::Bakery, 48.861, 2.341)
            .with_owner(TEST_OWNER_ID)
            .with_status(PublicationStatus::Active)
            .with_stats(PlaceStats {
                views: 1200,
                clicks: 210,
                directions: 64,
            })
            .boosted(SponsorTier::Premium),
        place("o2", "Pressing Saint-Michel", Category::DryCleaning, 48.853, 2.344)
            .with_owner(TEST_OWNER_ID)
            .with_status(PublicationStatus::Active)
            .with_stats(PlaceStats {
                views: 300,
                clicks: 40,
                directions: 12,
            }),
        place("o3", "Atelier Couture Lina", Category::Sewing, 48.872, 2.365)
            .with_owner(TEST_OWNER_ID)
            .with_status(PublicationStatus::Pending),
        place("x1", "Garage Voltaire", Category::Repair, 48.858, 2.380)
            .with_owner("someone-else")
            .with_status(PublicationStatus::Active)
            .boosted(SponsorTier::Basic),
    ]
}
