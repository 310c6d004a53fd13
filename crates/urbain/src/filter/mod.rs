//! Deriving the displayed subset of the working set.

use std::{fmt, str::FromStr};

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use urbain_data::{Category, Place};

/// The active map filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceFilter {
    #[default]
    All,
    Favorites,
    Category(Category),
}

impl PlaceFilter {
    /// The category to trust for ambiguous search results, if this filter names one.
    #[must_use]
    pub fn category_hint(self) -> Option<Category> {
        match self {
            Self::Category(category) => Some(category),
            Self::All | Self::Favorites => None,
        }
    }

    #[must_use]
    pub fn matches(self, place: &Place, favorites: &Favorites) -> bool {
        match self {
            Self::All => true,
            Self::Favorites => favorites.contains(&place.id),
            Self::Category(category) => place.category == category,
        }
    }
}

impl fmt::Display for PlaceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Favorites => f.write_str("FAVORITES"),
            Self::Category(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for PlaceFilter {
    type Err = urbain_data::DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALL" => Ok(Self::All),
            "FAVORITES" => Ok(Self::Favorites),
            _ => s.parse().map(Self::Category),
        }
    }
}

/// Favorite place ids, kept in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    order: Vec<String>,
    lookup: AHashSet<String>,
}

impl Favorites {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.lookup.contains(id)
    }

    /// Returns `false` when the id was already a favorite.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.lookup.insert(id.clone()) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        if self.lookup.remove(id) {
            self.order.retain(|existing| existing != id);
            true
        } else {
            false
        }
    }

    /// Flip the favorite state of `id`; returns the new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.remove(id) {
            false
        } else {
            self.insert(id);
            true
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Favorites {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut favorites = Self::new();
        for id in iter {
            favorites.insert(id);
        }
        favorites
    }
}

/// Project `places` through `filter`, keeping working-set order.
#[must_use]
pub fn filter_places<'a>(
    places: &'a [Place],
    filter: PlaceFilter,
    favorites: &Favorites,
) -> Vec<&'a Place> {
    places
        .iter()
        .filter(|place| filter.matches(place, favorites))
        .collect()
}

#[cfg(test)]
mod tests {
    use urbain_data::test_data::place;

    use super::*;

    fn working_set() -> Vec<Place> {
        vec![
            place("1", "Le Gourmet", Category::Restaurant, 48.85, 2.35),
            place("2", "Boulangerie Royale", Category::Bakery, 48.86, 2.34),
            place("3", "Bistrot Paul", Category::Restaurant, 48.87, 2.33),
            place("4", "Tour Eiffel", Category::Leisure, 48.8584, 2.2945),
        ]
    }

    #[test]
    fn test_all_returns_everything_in_order() {
        let places = working_set();
        let shown = filter_places(&places, PlaceFilter::All, &Favorites::new());
        assert_eq!(shown.len(), places.len());
        assert!(shown.iter().zip(&places).all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn test_favorites_follow_list_order_not_addition_order() {
        let places = working_set();
        let favorites: Favorites = ["4", "1", "missing"].into_iter().collect();
        let shown = filter_places(&places, PlaceFilter::Favorites, &favorites);

        let ids: Vec<&str> = shown.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert!(ids.iter().all(|id| favorites.contains(id)));
    }

    #[test]
    fn test_category_filter_is_exact() {
        let places = working_set();
        let shown = filter_places(
            &places,
            PlaceFilter::Category(Category::Restaurant),
            &Favorites::new(),
        );
        assert_eq!(shown.len(), 2);
        assert!(shown.iter().all(|p| p.category == Category::Restaurant));

        let none = filter_places(
            &places,
            PlaceFilter::Category(Category::Sewing),
            &Favorites::new(),
        );
        assert!(none.is_empty());
    }

    #[test]
    fn test_toggle_and_insertion_order() {
        let mut favorites = Favorites::new();
        assert!(favorites.toggle("b"));
        assert!(favorites.toggle("a"));
        assert!(!favorites.toggle("b"));
        assert!(favorites.toggle("b"));
        assert_eq!(favorites.iter().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(!favorites.insert("a"));
        assert_eq!(favorites.len(), 2);
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("all".parse::<PlaceFilter>().unwrap(), PlaceFilter::All);
        assert_eq!("FAVORITES".parse::<PlaceFilter>().unwrap(), PlaceFilter::Favorites);
        assert_eq!(
            "Hôtels".parse::<PlaceFilter>().unwrap(),
            PlaceFilter::Category(Category::Hotel)
        );
        assert!("nowhere".parse::<PlaceFilter>().is_err());
        assert_eq!(PlaceFilter::Category(Category::Bus).category_hint(), Some(Category::Bus));
        assert_eq!(PlaceFilter::Favorites.category_hint(), None);
    }
}
