//! Integration tests for the Urbain place discovery engine
//!
//! These run against the public API only, with a scripted search provider standing in
//! for the remote service.

use std::{collections::VecDeque, sync::Mutex};

use urbain::{
    ExplorerConfigBuilder, FileStore, GeoError, LocationStatus, MemoryStore, NewPlace,
    PlaceExplorer, PlaceFilter, PlaceSearchProvider, RawHitBatch, SearchError, SearchOutcome,
    SearchQuery, SearchRequest, location_channel,
};
use urbain::data::{
    Category, Coordinates, RawHit,
    test_data::{coords, hit, place},
};

fn setup_test_env() {
    let _ = urbain::init_logging(tracing::Level::WARN);
}

/// Replays canned responses in order and records what was asked.
#[derive(Default)]
struct ScriptedProvider {
    responses: Mutex<VecDeque<RawHitBatch>>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl ScriptedProvider {
    fn new(responses: impl IntoIterator<Item = RawHitBatch>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::default(),
        }
    }

    fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl PlaceSearchProvider for ScriptedProvider {
    async fn search(&self, request: &SearchRequest) -> RawHitBatch {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn failure() -> RawHitBatch {
    Err(SearchError::Other(anyhow::anyhow!("service unavailable")))
}

fn gourmet_explorer() -> PlaceExplorer<MemoryStore> {
    let seed = vec![place("seed-1", "Le Gourmet", Category::Restaurant, 48.85, 2.35)];
    PlaceExplorer::new(ExplorerConfigBuilder::new().build(), seed, MemoryStore::new())
        .expect("Should create explorer")
}

#[tokio::test]
async fn test_full_workflow() {
    setup_test_env();

    let provider = ScriptedProvider::new([
        Ok(vec![
            hit("Boulangerie Royale", 48.86, 2.34),
            hit("le gourmet", 48.85, 2.35),
        ]),
        Ok(vec![hit("Boulangerie Royale", 48.86, 2.34)]),
    ]);
    let mut explorer = gourmet_explorer();
    let center = explorer.search_center();

    // 1. First search adds only the genuinely new place
    let outcome = explorer.search(&provider, SearchQuery::All, center).await;
    assert_eq!(outcome, SearchOutcome::Merged { added: 1 });
    assert_eq!(explorer.working_set().len(), 2);
    assert_eq!(explorer.seed_places()[0].name, "Le Gourmet");

    // 2. Re-running the same search is a no-op
    let outcome = explorer
        .search(&provider, SearchQuery::Category(Category::Bakery), center)
        .await;
    assert_eq!(outcome.added(), 0);
    assert_eq!(explorer.working_set().len(), 2);

    // 3. Filtering
    explorer.set_filter(PlaceFilter::Category(Category::Bakery));
    let names: Vec<&str> = explorer.displayed().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Boulangerie Royale"]);

    // 4. The provider saw the category label as query text
    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].query.query_text(), "Boulangeries & Pâtisseries");
    assert_eq!(requests[1].center, center);
}

#[tokio::test]
async fn test_provider_failure_keeps_working_set() {
    setup_test_env();

    let provider = ScriptedProvider::new([failure()]);
    let mut explorer = gourmet_explorer();

    let outcome = explorer
        .search(&provider, SearchQuery::parse("pizza"), explorer.search_center())
        .await;
    assert_eq!(outcome, SearchOutcome::Failed);
    assert_eq!(explorer.working_set().len(), 1);
}

#[test]
fn test_out_of_order_responses() {
    setup_test_env();

    let mut explorer = gourmet_explorer();
    let center = explorer.search_center();
    let slow = explorer.begin_search(SearchQuery::parse("sushi"), center);
    let fast = explorer.begin_search(SearchQuery::parse("pizza"), center);

    assert_eq!(
        explorer.complete_search(fast, Ok(vec![hit("Pizza Roma", 48.87, 2.33)])),
        SearchOutcome::Merged { added: 1 }
    );
    assert_eq!(
        explorer.complete_search(slow, Ok(vec![hit("Sushi Shop", 48.88, 2.32)])),
        SearchOutcome::Stale
    );
    assert!(explorer.working_set().iter().all(|p| p.name != "Sushi Shop"));
}

#[test]
fn test_preferences_survive_restart() {
    setup_test_env();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    {
        let store = FileStore::open(&path).unwrap();
        let mut explorer =
            PlaceExplorer::with_seed_places(ExplorerConfigBuilder::new().build(), store).unwrap();
        assert!(explorer.toggle_favorite("7").unwrap());
        assert!(explorer.toggle_favorite("10").unwrap());
        let (_publisher, watch) = location_channel();
        explorer.enable_geolocation(watch).unwrap();
    }

    let store = FileStore::open(&path).unwrap();
    let mut explorer =
        PlaceExplorer::with_seed_places(ExplorerConfigBuilder::new().build(), store).unwrap();
    assert!(explorer.geo_enabled());
    assert!(explorer.is_favorite("7"));
    assert!(explorer.is_favorite("10"));

    explorer.set_filter(PlaceFilter::Favorites);
    let ids: Vec<&str> = explorer.displayed().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["7", "10"]);
}

#[tokio::test]
async fn test_geolocation_lifecycle() {
    setup_test_env();

    let mut explorer = gourmet_explorer();
    let (publisher, watch) = location_channel();
    explorer.enable_geolocation(watch).unwrap();

    publisher.publish(Err(GeoError::PermissionDenied));
    assert_eq!(
        explorer.next_location_event().await,
        Some(LocationStatus::Failed(GeoError::PermissionDenied))
    );
    assert!(explorer.route_to("seed-1").is_none());

    publisher.publish(Ok(coords(48.8584, 2.2945)));
    explorer.next_location_event().await;
    assert_eq!(explorer.search_center(), coords(48.8584, 2.2945));
    assert_eq!(explorer.distance_to("seed-1").as_deref(), Some("4.2 km"));

    let route = explorer.route_to("seed-1").unwrap();
    assert_eq!(route.end, coords(48.85, 2.35));

    explorer.disable_geolocation().unwrap();
    assert!(publisher.is_closed());
    assert_eq!(explorer.location_status(), LocationStatus::Idle);
}

#[test]
fn test_submitted_place_reaches_dashboard() {
    setup_test_env();

    let config = ExplorerConfigBuilder::new().owner("user-123").build();
    let mut explorer = PlaceExplorer::new(config, Vec::new(), MemoryStore::new()).unwrap();
    let submitted = explorer
        .submit_place(NewPlace {
            name: "Pressing du Marché".to_string(),
            category: Category::DryCleaning,
            description: "Nettoyage à sec en 24h".to_string(),
            position: Coordinates::new(48.853, 2.369).unwrap(),
            image: None,
        })
        .unwrap();
    assert_eq!(submitted.rating, 4.5);

    let dashboard = explorer.dashboard().unwrap();
    assert_eq!(dashboard.places.len(), 1);
    assert_eq!(dashboard.pending, 1);
    assert_eq!(dashboard.active, 0);
}

#[test]
fn test_hits_without_position_are_ignored() {
    setup_test_env();

    let mut explorer = gourmet_explorer();
    let ticket = explorer.begin_search(SearchQuery::All, explorer.search_center());
    let outcome = explorer.complete_search(
        ticket,
        Ok(vec![RawHit::default(), hit("Musée Carnavalet", 48.857, 2.362)]),
    );
    assert_eq!(outcome.added(), 1);
    assert_eq!(explorer.fetched_places()[0].category, Category::Leisure);
}
