//! Integration tests for TravelRecs search flows

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use travelrecs::{
    DatasetSource, MemorySurface, TravelApp, TravelRecsError, render::NO_RESULTS,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bundled_dataset() -> DatasetSource {
    DatasetSource::File(
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/travel_recommendation.json"),
    )
}

async fn loaded_app() -> (Arc<MemorySurface>, TravelApp) {
    let surface = Arc::new(MemorySurface::new());
    let app = TravelApp::new(surface.clone());
    app.load_dataset(&bundled_dataset(), Duration::from_secs(5))
        .await
        .expect("bundled dataset loads");
    (surface, app)
}

/// Search flow against the bundled dataset, from keyword to reset
#[tokio::test]
async fn test_bundled_dataset_search_flow() {
    let (surface, app) = loaded_app().await;

    let result = app.search("Temples").unwrap();
    assert_eq!(result.label.as_deref(), Some("Temples"));
    let state = surface.snapshot();
    assert_eq!(state.cards.len(), 2);
    assert_eq!(state.cards[0].title, "Angkor Wat, Cambodia");
    assert_eq!(state.clock, None);

    let result = app.search("countries").unwrap();
    assert_eq!(result.items.len(), 6);
    let state = surface.snapshot();
    assert_eq!(state.cards.len(), 6);
    assert_eq!(state.clock.as_deref().map(|c| c.lines().count()), Some(3));
    assert!(app.clock().is_running());

    app.reset();
    let state = surface.snapshot();
    assert!(!app.clock().is_running());
    assert!(state.cards.is_empty());
    assert_eq!(state.header, None);
    assert_eq!(state.clock, None);
}

/// City results pick the clock of the country in the city name
#[tokio::test]
async fn test_city_search_uses_inferred_country() {
    let (surface, app) = loaded_app().await;

    let result = app.search("Rio").unwrap();
    assert_eq!(result.label.as_deref(), Some("City Results"));
    assert_eq!(result.items.len(), 1);
    assert!(
        surface
            .snapshot()
            .clock
            .unwrap()
            .starts_with("Local time in Brazil: ")
    );
}

/// Unknown queries render the empty state and no header
#[tokio::test]
async fn test_unknown_query_renders_empty_state() {
    let (surface, app) = loaded_app().await;

    let err = app.search("Atlantis!").unwrap_err();
    assert!(matches!(err, TravelRecsError::NoMatch { .. }));
    let state = surface.snapshot();
    assert!(state.cards.is_empty());
    assert_eq!(state.header, None);
    assert!(state.message.unwrap().contains("Atlantis"));
}

/// The dataset can be fetched over HTTP, with absent keys defaulting to empty
#[tokio::test]
async fn test_load_dataset_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/travel_recommendation.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"beaches":[{"name":"Bondi Beach, Australia","imageUrl":"bondi.jpg"}]}"#,
        ))
        .mount(&server)
        .await;

    let surface = Arc::new(MemorySurface::new());
    let app = TravelApp::new(surface.clone());
    let source = DatasetSource::parse(&format!("{}/travel_recommendation.json", server.uri()));
    app.load_dataset(&source, Duration::from_secs(5)).await.unwrap();

    app.search("beach").unwrap();
    let state = surface.snapshot();
    assert_eq!(state.cards.len(), 1);
    assert_eq!(state.cards[0].description, "No description available.");

    // temples key is absent: the keyword still matches, with nothing to show
    app.search("temple").unwrap();
    assert_eq!(surface.snapshot().message.as_deref(), Some(NO_RESULTS));
}

/// A failed load shows an empty-state message and searches keep waiting
#[tokio::test]
async fn test_failed_load_leaves_dataset_unset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let surface = Arc::new(MemorySurface::new());
    let app = TravelApp::new(surface.clone());
    let source = DatasetSource::parse(&format!("{}/travel_recommendation.json", server.uri()));

    let err = app
        .load_dataset(&source, Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, TravelRecsError::DatasetLoad { .. }));
    assert_eq!(surface.snapshot().message, Some(err.user_message()));
    assert!(!app.store().is_ready());

    let err = app.search("japan").unwrap_err();
    assert!(matches!(err, TravelRecsError::DatasetNotReady));
}
