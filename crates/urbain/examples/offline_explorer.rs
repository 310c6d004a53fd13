//! Offline place exploration
//!
//! This example walks through a session without any network access:
//! - Merging a batch of raw hits into the seed places
//! - Filtering by category and by favorites
//! - Distances and directions once a location fix arrives

use urbain::data::{Coordinates, RawHit};
use urbain::{
    ExplorerConfigBuilder, MemoryStore, PlaceExplorer, PlaceFilter, SearchQuery, location_channel,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ExplorerConfigBuilder::new().owner("user-123").build();
    let mut explorer = PlaceExplorer::with_seed_places(config, MemoryStore::new())?;

    // Pretend the provider answered with a few hits, one of them a seed duplicate
    let center = explorer.search_center();
    let ticket = explorer.begin_search(SearchQuery::All, center);
    let hits = vec![
        RawHit::new("Boulangerie Poilâne", Coordinates::new(48.8512, 2.3283)?),
        RawHit::new("Pharmacie de la Place", Coordinates::new(48.8606, 2.3476)?),
        RawHit::new("Tour Eiffel", Coordinates::new(48.8584, 2.2945)?),
    ];
    let outcome = explorer.complete_search(ticket, Ok(hits));
    println!("Merged {} new places", outcome.added());
    print_places("All places", &explorer);

    explorer.set_filter("Boulangeries & Pâtisseries".parse()?);
    print_places("Bakeries", &explorer);

    explorer.toggle_favorite("7")?;
    explorer.set_filter(PlaceFilter::Favorites);
    print_places("Favorites", &explorer);

    // Feed one location fix through the watch channel
    let (publisher, watch) = location_channel();
    explorer.enable_geolocation(watch)?;
    publisher.publish(Ok(Coordinates::new(48.8530, 2.3499)?));
    explorer.next_location_event().await;

    explorer.set_filter(PlaceFilter::All);
    for place in explorer.displayed() {
        if let Some(distance) = explorer.distance_to(&place.id) {
            println!("  {} is {distance} away", place.name);
        }
    }
    if let Some(url) = explorer.directions_url("8") {
        println!("\nDirections to the Louvre: {url}");
    }

    explorer.disable_geolocation()?;
    Ok(())
}

fn print_places(title: &str, explorer: &PlaceExplorer<MemoryStore>) {
    println!("\n{title}:");
    for (i, place) in explorer.displayed().iter().enumerate() {
        println!("  {}. {} [{}]", i + 1, place.name, place.category);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_env() {
        let _ = urbain::init_logging(tracing::Level::WARN);
    }

    #[test]
    fn test_offline_explorer_example() {
        setup_test_env();
        assert!(
            main().is_ok(),
            "Offline example should run successfully"
        );
    }
}
