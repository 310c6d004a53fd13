//! Live search against the Gemini Maps grounding API
//!
//! Requires `GEMINI_API_KEY` (or `API_KEY`) in the environment.
//!
//! ```sh
//! GEMINI_API_KEY=... cargo run --example live_search -- "Boulangeries & Pâtisseries"
//! ```

use urbain::data::GeminiClient;
use urbain::{ExplorerConfig, MemoryStore, PlaceExplorer, SearchQuery};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    urbain::init_logging(tracing::Level::INFO)?;

    let query = SearchQuery::parse(&std::env::args().nth(1).unwrap_or_default());
    let client = GeminiClient::from_env()?;
    let mut explorer = PlaceExplorer::with_seed_places(ExplorerConfig::default(), MemoryStore::new())?;

    let center = explorer.search_center();
    let outcome = explorer.search(&client, query, center).await;
    println!("{outcome:?}");

    for place in explorer.fetched_places() {
        println!("  {} [{}] at {}", place.name, place.category, place.position);
    }

    if let Some(place) = explorer.fetched_places().first() {
        println!("\n{}", client.place_insight(place).await);
    }
    Ok(())
}
