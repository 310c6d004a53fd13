//! The closed set of place categories and their display descriptors.
//!
//! Categories double as map filter keys and as classification targets, so the set is
//! fixed at compile time. The wire value of each category is its French display label,
//! which is what the map front-end shows in filter chips.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::DataError;

/// Fixed place category.
///
/// Variants are declared in the order the category bar lists them: daily high-traffic
/// needs first, then tourism, utilities and niche services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Restaurants")]
    Restaurant,
    #[serde(rename = "Boulangeries & Pâtisseries")]
    Bakery,
    #[serde(rename = "Bus")]
    Bus,
    #[serde(rename = "Marchés")]
    Market,
    #[serde(rename = "Loisirs & Tourisme")]
    Leisure,
    #[serde(rename = "Hôtels")]
    Hotel,
    #[serde(rename = "Santé & Urgences")]
    Health,
    #[serde(rename = "Stations-Service")]
    Gas,
    #[serde(rename = "Opérateurs")]
    Mobile,
    #[serde(rename = "Cybercafés & Impression")]
    Cybercafe,
    #[serde(rename = "Lieux de Culte")]
    Worship,
    #[serde(rename = "Coiffure")]
    Hair,
    #[serde(rename = "Pressing")]
    DryCleaning,
    #[serde(rename = "Réparation")]
    Repair,
    #[serde(rename = "Couture")]
    Sewing,
}

impl Category {
    /// Every category, in category-bar order.
    pub const ALL: [Self; 15] = [
        Self::Restaurant,
        Self::Bakery,
        Self::Bus,
        Self::Market,
        Self::Leisure,
        Self::Hotel,
        Self::Health,
        Self::Gas,
        Self::Mobile,
        Self::Cybercafe,
        Self::Worship,
        Self::Hair,
        Self::DryCleaning,
        Self::Repair,
        Self::Sewing,
    ];

    /// Category used when nothing else can be inferred.
    pub const FALLBACK: Self = Self::Leisure;

    /// Full display label, also used as the serialized value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Restaurant => "Restaurants",
            Self::Bakery => "Boulangeries & Pâtisseries",
            Self::Bus => "Bus",
            Self::Market => "Marchés",
            Self::Leisure => "Loisirs & Tourisme",
            Self::Hotel => "Hôtels",
            Self::Health => "Santé & Urgences",
            Self::Gas => "Stations-Service",
            Self::Mobile => "Opérateurs",
            Self::Cybercafe => "Cybercafés & Impression",
            Self::Worship => "Lieux de Culte",
            Self::Hair => "Coiffure",
            Self::DryCleaning => "Pressing",
            Self::Repair => "Réparation",
            Self::Sewing => "Couture",
        }
    }

    /// Stable ASCII identifier, handy for config files and query strings.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Bakery => "bakery",
            Self::Bus => "bus",
            Self::Market => "market",
            Self::Leisure => "leisure",
            Self::Hotel => "hotel",
            Self::Health => "health",
            Self::Gas => "gas",
            Self::Mobile => "mobile",
            Self::Cybercafe => "cybercafe",
            Self::Worship => "worship",
            Self::Hair => "hair",
            Self::DryCleaning => "dry_cleaning",
            Self::Repair => "repair",
            Self::Sewing => "sewing",
        }
    }

    /// Rendering descriptor for this category.
    #[must_use]
    pub fn descriptor(self) -> &'static CategoryDescriptor {
        &CATEGORY_DESCRIPTORS[self as usize]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = DataError;

    /// Accepts either the display label or the slug, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.label().to_lowercase() == needle || c.slug() == needle)
            .ok_or_else(|| DataError::UnknownCategory(s.to_string()))
    }
}

/// Plain rendering data for a category: what the map layer needs to draw a marker or chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDescriptor {
    pub category: Category,
    /// Short label for chips and markers
    pub label: &'static str,
    /// Colour token understood by the front-end stylesheet
    pub color: &'static str,
    /// Icon identifier in the front-end icon set
    pub icon: &'static str,
}

// Indexed by `Category as usize`; keep in declaration order.
static CATEGORY_DESCRIPTORS: [CategoryDescriptor; 15] = [
    CategoryDescriptor {
        category: Category::Restaurant,
        label: "Restaurants",
        color: "bg-red-500",
        icon: "utensils",
    },
    CategoryDescriptor {
        category: Category::Bakery,
        label: "Boulangeries",
        color: "bg-amber-500",
        icon: "croissant",
    },
    CategoryDescriptor {
        category: Category::Bus,
        label: "Bus",
        color: "bg-blue-500",
        icon: "bus",
    },
    CategoryDescriptor {
        category: Category::Market,
        label: "Marchés",
        color: "bg-emerald-500",
        icon: "shopping-basket",
    },
    CategoryDescriptor {
        category: Category::Leisure,
        label: "Loisirs & Tourisme",
        color: "bg-purple-500",
        icon: "ticket",
    },
    CategoryDescriptor {
        category: Category::Hotel,
        label: "Hôtels",
        color: "bg-indigo-500",
        icon: "bed",
    },
    CategoryDescriptor {
        category: Category::Health,
        label: "Santé",
        color: "bg-rose-600",
        icon: "heart-pulse",
    },
    CategoryDescriptor {
        category: Category::Gas,
        label: "Stations",
        color: "bg-gray-600",
        icon: "fuel",
    },
    CategoryDescriptor {
        category: Category::Mobile,
        label: "Opérateurs",
        color: "bg-violet-600",
        icon: "smartphone",
    },
    CategoryDescriptor {
        category: Category::Cybercafe,
        label: "Cybercafés",
        color: "bg-cyan-600",
        icon: "printer",
    },
    CategoryDescriptor {
        category: Category::Worship,
        label: "Lieux de Culte",
        color: "bg-slate-500",
        icon: "landmark",
    },
    CategoryDescriptor {
        category: Category::Hair,
        label: "Coiffure",
        color: "bg-yellow-500",
        icon: "user-check",
    },
    CategoryDescriptor {
        category: Category::DryCleaning,
        label: "Pressing",
        color: "bg-teal-500",
        icon: "shirt",
    },
    CategoryDescriptor {
        category: Category::Repair,
        label: "Réparation",
        color: "bg-stone-500",
        icon: "wrench",
    },
    CategoryDescriptor {
        category: Category::Sewing,
        label: "Couture",
        color: "bg-pink-500",
        icon: "scissors",
    },
];

/// Promotion level of a boosted listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SponsorTier {
    Basic,
    Premium,
    Vip,
}

impl SponsorTier {
    pub const ALL: [Self; 3] = [Self::Basic, Self::Premium, Self::Vip];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Premium => "Premium",
            Self::Vip => "VIP",
        }
    }

    /// Offer price in whole euros.
    #[must_use]
    pub const fn price_eur(self) -> u32 {
        match self {
            Self::Basic => 5,
            Self::Premium => 15,
            Self::Vip => 40,
        }
    }
}

impl fmt::Display for SponsorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}€)", self.label(), self.price_eur())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_table_matches_declaration_order() {
        for category in Category::ALL {
            assert_eq!(category.descriptor().category, category);
        }
    }

    #[test]
    fn test_label_round_trips_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
            assert_eq!(category.slug().parse::<Category>().unwrap(), category);
        }
        assert!("Laundromat".parse::<Category>().is_err());
    }

    #[test]
    fn test_serialized_value_is_display_label() {
        let json = serde_json::to_string(&Category::Bakery).unwrap();
        assert_eq!(json, "\"Boulangeries & Pâtisseries\"");

        let parsed: Category = serde_json::from_str("\"Hôtels\"").unwrap();
        assert_eq!(parsed, Category::Hotel);
    }

    #[test]
    fn test_sponsor_tier_pricing() {
        let prices: Vec<u32> = SponsorTier::ALL.iter().map(|t| t.price_eur()).collect();
        assert_eq!(prices, vec![5, 15, 40]);
        assert_eq!(SponsorTier::Vip.to_string(), "VIP (40€)");
    }
}
