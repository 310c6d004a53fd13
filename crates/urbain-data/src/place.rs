use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    DataError, Result,
    category::{Category, SponsorTier},
};

/// A WGS84 position in decimal degrees.
///
/// Only finiteness is checked; range checking is left to the map layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create coordinates, rejecting NaN and infinite values.
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if lat.is_finite() && lng.is_finite() {
            Ok(Self { lat, lng })
        } else {
            Err(DataError::InvalidCoordinates { lat, lng })
        }
    }

    /// Both components are finite. Fields are public, so values built by hand may not be.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Usage counters shown on the owner dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceStats {
    pub views: u64,
    pub clicks: u64,
    pub directions: u64,
}

/// Moderation state of an owner-managed listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    Active,
    Pending,
}

/// A point of interest in the working set.
///
/// `id` is unique within a working set and `position` is never rewritten once the place
/// exists. Favorite status is tracked outside the place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub address: String,
    pub position: Coordinates,
    pub rating: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,

    // Owner-side listing metadata
    #[serde(default)]
    pub is_boosted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsor_tier: Option<SponsorTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<PlaceStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PublicationStatus>,
}

impl Place {
    /// Create a place with the required attributes; optional metadata starts empty.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        position: Coordinates,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            description: String::new(),
            address: String::new(),
            position,
            rating: 0.0,
            image: None,
            review_count: None,
            phone: None,
            hours: None,
            is_boosted: false,
            sponsor_tier: None,
            owner_id: None,
            stats: None,
            status: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    #[must_use]
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = rating;
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    #[must_use]
    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: PublicationStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_stats(mut self, stats: PlaceStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Mark the listing as boosted at the given tier.
    #[must_use]
    pub fn boosted(mut self, tier: SponsorTier) -> Self {
        self.is_boosted = true;
        self.sponsor_tier = Some(tier);
        self
    }

    #[must_use]
    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id.as_deref() == Some(owner_id)
    }

    /// Usage counters, zeroed when the listing has none yet.
    #[must_use]
    pub fn stats_or_default(&self) -> PlaceStats {
        self.stats.unwrap_or_default()
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Place {{ id: {}, name: \"{}\", category: {} }}",
            self.id, self.name, self.category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_reject_non_finite() {
        assert!(Coordinates::new(48.85, 2.35).is_ok());
        assert!(Coordinates::new(f64::NAN, 2.35).is_err());
        assert!(Coordinates::new(48.85, f64::INFINITY).is_err());
    }

    #[test]
    fn test_place_serializes_with_camel_case_metadata() {
        let place = Place::new(
            "p1",
            "Boulangerie Royale",
            Category::Bakery,
            Coordinates { lat: 48.86, lng: 2.34 },
        )
        .boosted(SponsorTier::Premium)
        .with_status(PublicationStatus::Pending);

        let value = serde_json::to_value(&place).unwrap();
        assert_eq!(value["isBoosted"], true);
        assert_eq!(value["sponsorTier"], "PREMIUM");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["category"], "Boulangeries & Pâtisseries");
        assert!(value.get("phone").is_none());

        let back: Place = serde_json::from_value(value).unwrap();
        assert_eq!(back, place);
    }
}
