//! Curated places shown before any search has run.
//!
//! A handful of Paris landmarks so the map is never empty on first load. Seed places live
//! for the whole session and are never mutated.

use crate::{
    category::Category,
    place::{Coordinates, Place},
};

struct SeedRow {
    id: &'static str,
    name: &'static str,
    category: Category,
    description: &'static str,
    lat: f64,
    lng: f64,
    rating: f32,
    address: &'static str,
}

const SEED_ROWS: [SeedRow; 5] = [
    SeedRow {
        id: "1",
        name: "Parc des Buttes-Chaumont",
        category: Category::Leisure,
        description: "Un grand espace vert avec un lac artificiel et des vues panoramiques.",
        lat: 48.8809,
        lng: 2.3828,
        rating: 4.8,
        address: "1 Rue Botzaris, 75019 Paris",
    },
    SeedRow {
        id: "7",
        name: "Tour Eiffel",
        category: Category::Leisure,
        description: "Le monument le plus emblématique de Paris.",
        lat: 48.8584,
        lng: 2.2945,
        rating: 4.9,
        address: "Champ de Mars, 5 Avenue Anatole France, 75007 Paris",
    },
    SeedRow {
        id: "8",
        name: "Musée du Louvre",
        category: Category::Leisure,
        description: "Le plus grand musée d'art du monde.",
        lat: 48.8606,
        lng: 2.3376,
        rating: 4.8,
        address: "Rue de Rivoli, 75001 Paris",
    },
    SeedRow {
        id: "12",
        name: "Cathédrale Notre-Dame",
        category: Category::Worship,
        description: "Chef-d'œuvre de l'architecture gothique française.",
        lat: 48.8529,
        lng: 2.3500,
        rating: 4.8,
        address: "6 Parvis Notre-Dame - Pl. Jean-Paul II, 75004 Paris",
    },
    SeedRow {
        id: "10",
        name: "Le Bouillon Chartier",
        category: Category::Restaurant,
        description: "Un restaurant historique servant une cuisine française traditionnelle.",
        lat: 48.8719,
        lng: 2.3435,
        rating: 4.5,
        address: "7 Rue du Faubourg Montmartre, 75009 Paris",
    },
];

/// The curated seed working set, in display order.
#[must_use]
pub fn seed_places() -> Vec<Place> {
    SEED_ROWS
        .iter()
        .map(|row| {
            Place::new(
                row.id,
                row.name,
                row.category,
                Coordinates {
                    lat: row.lat,
                    lng: row.lng,
                },
            )
            .with_description(row.description)
            .with_address(row.address)
            .with_rating(row.rating)
            .with_image(format!("https://picsum.photos/400/200?random={}", row.id))
        })
        .collect()
}
