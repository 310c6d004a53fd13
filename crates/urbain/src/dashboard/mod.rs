//! Owner-side view: owned listings, their usage totals and the sponsored sidebar.

use urbain_data::{Place, PlaceStats, PublicationStatus, SponsorTier};

/// Summary of the listings belonging to one owner.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerDashboard<'a> {
    pub owner_id: String,
    pub places: Vec<&'a Place>,
    pub totals: PlaceStats,
    pub active: usize,
    pub pending: usize,
    pub boosted: usize,
}

impl<'a> OwnerDashboard<'a> {
    /// Collect the listings of `owner_id` from `places`, keeping their order.
    #[must_use]
    pub fn for_owner(places: &'a [Place], owner_id: &str) -> Self {
        let owned: Vec<&Place> = places.iter().filter(|p| p.is_owned_by(owner_id)).collect();

        let totals = owned
            .iter()
            .map(|p| p.stats_or_default())
            .fold(PlaceStats::default(), |acc, s| PlaceStats {
                views: acc.views + s.views,
                clicks: acc.clicks + s.clicks,
                directions: acc.directions + s.directions,
            });
        let active = owned
            .iter()
            .filter(|p| p.status == Some(PublicationStatus::Active))
            .count();
        // Listings without a status have not been reviewed yet
        let pending = owned.len() - active;
        let boosted = owned.iter().filter(|p| p.is_boosted).count();

        Self {
            owner_id: owner_id.to_string(),
            places: owned,
            totals,
            active,
            pending,
            boosted,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

/// Boost offers in ascending price order.
#[must_use]
pub fn boost_offers() -> [SponsorTier; 3] {
    SponsorTier::ALL
}

/// The sponsored subset of the displayed places, order preserved.
#[must_use]
pub fn boosted_places<'a>(displayed: &[&'a Place]) -> Vec<&'a Place> {
    displayed.iter().copied().filter(|p| p.is_boosted).collect()
}

#[cfg(test)]
mod tests {
    use urbain_data::test_data::{TEST_OWNER_ID, owned_places};

    use super::*;

    #[test]
    fn test_dashboard_totals_only_count_owned_places() {
        let places = owned_places();
        let dashboard = OwnerDashboard::for_owner(&places, TEST_OWNER_ID);

        assert_eq!(dashboard.places.len(), 3);
        assert_eq!(
            dashboard.totals,
            PlaceStats {
                views: 1500,
                clicks: 250,
                directions: 76,
            }
        );
        assert_eq!(dashboard.active, 2);
        assert_eq!(dashboard.pending, 1);
        assert_eq!(dashboard.boosted, 1);
    }

    #[test]
    fn test_unknown_owner_has_empty_dashboard() {
        let places = owned_places();
        let dashboard = OwnerDashboard::for_owner(&places, "nobody");
        assert!(dashboard.is_empty());
        assert_eq!(dashboard.totals, PlaceStats::default());
    }

    #[test]
    fn test_boosted_places_keep_display_order() {
        let places = owned_places();
        let displayed: Vec<&Place> = places.iter().collect();
        let boosted = boosted_places(&displayed);
        let ids: Vec<&str> = boosted.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["o1", "x1"]);
    }

    #[test]
    fn test_boost_offers_are_sorted_by_price() {
        let offers = boost_offers();
        assert!(offers.windows(2).all(|w| w[0].price_eur() < w[1].price_eur()));
    }
}
