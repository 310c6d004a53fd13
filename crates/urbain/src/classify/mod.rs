//! Category inference from free-text place titles.
//!
//! Search providers return titles like "Boulangerie Royale" or "Pharmacie de la Gare" with
//! no usable type information. The classifier maps such a title onto one [`Category`] by
//! walking an ordered list of keyword groups; the first group with a keyword contained in
//! the normalized title wins.
//!
//! Group order is significant. Food and grocery come first, then daily services, then
//! transport and automotive, then tourism and lodging, then telecom. A title such as
//! "Cyber Café" therefore lands in [`Category::Restaurant`] rather than
//! [`Category::Cybercafe`].

use itertools::Itertools;
use tracing::trace;
use urbain_data::Category;

/// One keyword group. Keywords are lowercase and accent-free.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: &'static [&'static str],
}

impl CategoryRule {
    fn first_match(&self, normalized_title: &str) -> Option<&'static str> {
        self.keywords
            .iter()
            .copied()
            .find(|keyword| normalized_title.contains(keyword))
    }
}

/// Keyword groups in priority order.
pub static CATEGORY_RULES: &[CategoryRule] = &[
    // Food & grocery
    CategoryRule {
        category: Category::Bakery,
        keywords: &["boulangerie", "patisserie", "bakery", "pain", "brioche"],
    },
    CategoryRule {
        category: Category::Restaurant,
        keywords: &[
            "restaurant",
            "bistrot",
            "brasserie",
            "cafe",
            "pizza",
            "burger",
            "sushi",
            "wok",
            "tacos",
            "mcdo",
            "kfc",
        ],
    },
    CategoryRule {
        category: Category::Market,
        keywords: &[
            "marche",
            "market",
            "supermarche",
            "carrefour",
            "leclerc",
            "monoprix",
            "lidl",
            "auchan",
            "epicerie",
        ],
    },
    // Daily services
    CategoryRule {
        category: Category::Health,
        keywords: &[
            "pharmacie",
            "hopital",
            "clinique",
            "medecin",
            "docteur",
            "dentiste",
            "laboratoire",
        ],
    },
    CategoryRule {
        category: Category::Hair,
        keywords: &["coiffure", "coiffeur", "barber", "hair", "salon", "beaute"],
    },
    CategoryRule {
        category: Category::DryCleaning,
        keywords: &["pressing", "sec", "laverie", "blanchisserie"],
    },
    CategoryRule {
        category: Category::Sewing,
        keywords: &["couture", "retouche", "fil", "tailleur"],
    },
    CategoryRule {
        category: Category::Cybercafe,
        keywords: &["cyber", "imprimerie", "copy", "informatique", "internet"],
    },
    // Transport & automotive
    CategoryRule {
        category: Category::Gas,
        keywords: &[
            "station", "total", "bp", "shell", "esso", "essence", "service",
        ],
    },
    CategoryRule {
        category: Category::Repair,
        keywords: &["garage", "auto", "reparation", "pneu", "mecanique"],
    },
    CategoryRule {
        category: Category::Bus,
        keywords: &["bus", "gare", "ratp", "sncf", "metro", "tram", "arret"],
    },
    // Tourism & lodging
    CategoryRule {
        category: Category::Hotel,
        keywords: &[
            "hotel",
            "ibis",
            "novotel",
            "mercure",
            "residence",
            "bnb",
        ],
    },
    CategoryRule {
        category: Category::Worship,
        keywords: &[
            "eglise",
            "cathedrale",
            "mosquee",
            "synagogue",
            "temple",
            "basilique",
        ],
    },
    CategoryRule {
        category: Category::Leisure,
        keywords: &[
            "musee", "parc", "jardin", "cinema", "theatre", "stade", "piscine", "monument",
            "tour",
        ],
    },
    // Telecom
    CategoryRule {
        category: Category::Mobile,
        keywords: &[
            "orange",
            "sfr",
            "bouygues",
            "free",
            "mobile",
            "phone",
            "telephonie",
        ],
    },
];

/// Lowercase, fold French diacritics and collapse whitespace.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    let folded: String = title
        .to_lowercase()
        .chars()
        .flat_map(fold_char)
        .collect();
    folded.split_whitespace().join(" ")
}

fn fold_char(c: char) -> impl Iterator<Item = char> {
    let (first, second) = match c {
        'à' | 'â' | 'ä' | 'á' => ('a', None),
        'é' | 'è' | 'ê' | 'ë' => ('e', None),
        'î' | 'ï' | 'í' => ('i', None),
        'ô' | 'ö' | 'ó' => ('o', None),
        'ù' | 'û' | 'ü' | 'ú' => ('u', None),
        'ç' => ('c', None),
        'ÿ' => ('y', None),
        'œ' => ('o', Some('e')),
        'æ' => ('a', Some('e')),
        other => (other, None),
    };
    std::iter::once(first).chain(second)
}

/// The category of the first keyword group matching `title`, if any.
#[must_use]
pub fn matching_category(title: &str) -> Option<Category> {
    let normalized = normalize_title(title);
    if normalized.is_empty() {
        return None;
    }
    CATEGORY_RULES.iter().find_map(|rule| {
        rule.first_match(&normalized).map(|keyword| {
            trace!(title, keyword, category = ?rule.category, "Keyword match");
            rule.category
        })
    })
}

/// Classify a place title into exactly one category.
///
/// When no keyword group matches, the `hint` (the category the user was filtering on when
/// the search ran) is trusted; without a hint the result is [`Category::FALLBACK`].
#[must_use]
pub fn classify(title: &str, hint: Option<Category>) -> Category {
    matching_category(title)
        .or(hint)
        .unwrap_or(Category::FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bakery_wins_regardless_of_hint() {
        for hint in [None, Some(Category::Hotel), Some(Category::Restaurant)] {
            assert_eq!(classify("Boulangerie Royale", hint), Category::Bakery);
            assert_eq!(classify("Pâtisserie Stohrer", hint), Category::Bakery);
        }
    }

    #[test]
    fn test_unmatched_title_uses_hint_then_fallback() {
        assert_eq!(classify("Le Gourmet", Some(Category::Hotel)), Category::Hotel);
        assert_eq!(classify("Le Gourmet", None), Category::Leisure);
    }

    #[test]
    fn test_blank_title_falls_through() {
        assert_eq!(classify("", None), Category::FALLBACK);
        assert_eq!(classify("   \t", Some(Category::Sewing)), Category::Sewing);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(classify("PHARMACIE CENTRALE", None), Category::Health);
        assert_eq!(classify("hôtel du nord", None), Category::Hotel);
        assert_eq!(classify("HÔTEL DU NORD", None), Category::Hotel);
    }

    #[test]
    fn test_first_group_in_priority_order_wins() {
        // "café" (restaurant) outranks "cyber" (cybercafé)
        assert_eq!(classify("Cyber Café des Halles", None), Category::Restaurant);
        // "brasserie" (restaurant) outranks "gare" (bus)
        assert_eq!(classify("Brasserie de la Gare", None), Category::Restaurant);
        // "station" (gas) outranks "metro" (bus)
        assert_eq!(classify("Station Metro Bastille", None), Category::Gas);
    }

    #[test]
    fn test_accented_and_plain_spellings_agree() {
        assert_eq!(classify("Musée d'Orsay", None), Category::Leisure);
        assert_eq!(classify("Musee d'Orsay", None), Category::Leisure);
        assert_eq!(classify("Cathédrale Saint-Louis", None), Category::Worship);
        assert_eq!(classify("Grande Mosquée", None), Category::Worship);
    }

    #[test]
    fn test_brand_names() {
        assert_eq!(classify("Monoprix Opéra", None), Category::Market);
        assert_eq!(classify("Shell", None), Category::Gas);
        assert_eq!(classify("Ibis Budget", None), Category::Hotel);
        assert_eq!(classify("Bouygues Telecom", None), Category::Mobile);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let titles = ["Garage Voltaire", "Le Gourmet", "Tour Montparnasse", ""];
        for title in titles {
            for hint in [None, Some(Category::Bus)] {
                assert_eq!(classify(title, hint), classify(title, hint));
            }
        }
    }

    #[test]
    fn test_every_category_has_a_rule() {
        for category in Category::ALL {
            assert!(
                CATEGORY_RULES.iter().any(|r| r.category == category),
                "no rule for {category:?}"
            );
        }
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  Le   Bœuf  Sur le Toit "), "le boeuf sur le toit");
        assert_eq!(normalize_title("Épicerie Générale"), "epicerie generale");
    }
}
