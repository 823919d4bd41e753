//! Application state and user actions
//!
//! [`TravelApp`] owns everything a search needs: the dataset store, the
//! matcher, the renderer, the clock scheduler and the surface they all draw
//! on. Every user action goes through one of its methods.

use crate::clock::ClockScheduler;
use crate::config::TravelRecsConfig;
use crate::error::TravelRecsError;
use crate::render::{RenderCommand, RenderSurface, ResultRenderer};
use crate::search::{ClockTarget, MatchResult, Matcher, normalize_query};
use crate::store::{DataStore, DatasetSource};
use crate::timezone::TimeZoneResolver;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// The search page and everything behind it
pub struct TravelApp {
    store: DataStore,
    matcher: Matcher,
    renderer: ResultRenderer,
    timezones: TimeZoneResolver,
    clock: ClockScheduler,
    surface: Arc<dyn RenderSurface>,
}

impl TravelApp {
    /// App with default matcher and display settings
    #[must_use]
    pub fn new(surface: Arc<dyn RenderSurface>) -> Self {
        Self::from_config(surface, &TravelRecsConfig::default())
    }

    #[must_use]
    pub fn from_config(surface: Arc<dyn RenderSurface>, config: &TravelRecsConfig) -> Self {
        let timezones = TimeZoneResolver;
        debug!("{} countries have a local clock", timezones.len());
        Self {
            store: DataStore::new(),
            matcher: Matcher::default(),
            renderer: ResultRenderer::from_config(&config.display),
            timezones,
            clock: ClockScheduler::new(Arc::clone(&surface), config.clock.tick()),
            surface,
        }
    }

    #[must_use]
    pub fn store(&self) -> &DataStore {
        &self.store
    }

    #[must_use]
    pub fn clock(&self) -> &ClockScheduler {
        &self.clock
    }

    #[must_use]
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Load the dataset. On failure the store stays empty and the surface
    /// shows an empty-state message; searches keep reporting "still loading".
    pub async fn load_dataset(&self, source: &DatasetSource, timeout: Duration) -> crate::Result<()> {
        match source.load(timeout).await {
            Ok(dataset) => {
                if dataset.is_empty() {
                    warn!("Dataset from {} has no places", source);
                } else {
                    info!("Loaded dataset from {}", source);
                }
                self.store.set(dataset)
            }
            Err(e) => {
                warn!("Failed to load dataset from {}: {}", source, e);
                self.surface
                    .render(RenderCommand::ShowMessage(e.user_message()));
                Err(e)
            }
        }
    }

    /// Run a search for the raw query text and render the outcome
    pub fn search(&self, raw: &str) -> crate::Result<MatchResult> {
        match self.try_search(raw) {
            Ok(result) => Ok(result),
            Err(e) => {
                debug!("Search for '{}' rejected: {}", raw, e);
                self.clock.stop();
                self.surface.render(RenderCommand::SetClock(None));
                self.surface.render(RenderCommand::SetHeader(None));
                self.surface
                    .render(RenderCommand::ShowMessage(e.user_message()));
                Err(e)
            }
        }
    }

    fn try_search(&self, raw: &str) -> crate::Result<MatchResult> {
        let query = normalize_query(raw);
        if query.is_empty() {
            return Err(TravelRecsError::EmptyQuery);
        }
        let dataset = self.store.get().ok_or(TravelRecsError::DatasetNotReady)?;

        let result = self.matcher.resolve(&query, dataset);
        let Some(label) = result.label.as_deref() else {
            return Err(TravelRecsError::no_match(raw.trim()));
        };

        self.surface.render(RenderCommand::SetHeader(Some(format!(
            "Results for \"{}\"",
            raw.trim()
        ))));
        self.renderer.render(self.surface.as_ref(), &result.items, label);
        self.apply_clock(&result.clock);

        Ok(result)
    }

    fn apply_clock(&self, target: &ClockTarget) {
        match target {
            ClockTarget::None => {
                self.clock.stop();
                self.surface.render(RenderCommand::SetClock(None));
            }
            ClockTarget::Country(country) => match self.timezones.resolve(country) {
                Some(tz) => {
                    self.clock.start_single(country.trim(), tz);
                }
                None => {
                    debug!("No timezone configured for {}", country);
                    self.clock.stop();
                    self.surface.render(RenderCommand::SetClock(Some(format!(
                        "Local time for {} is not available.",
                        country.trim()
                    ))));
                }
            },
            ClockTarget::Countries(countries) => {
                let pairs: Vec<_> = countries
                    .iter()
                    .filter_map(|c| {
                        self.timezones
                            .resolve(c)
                            .map(|tz| (c.trim().to_string(), tz))
                    })
                    .collect();
                if pairs.is_empty() {
                    self.clock.stop();
                    self.surface.render(RenderCommand::SetClock(None));
                } else {
                    self.clock.start_multi(pairs);
                }
            }
        }
    }

    /// Clear the query, the results, the header and the clock
    pub fn reset(&self) {
        self.clock.stop();
        self.surface.render(RenderCommand::ClearQuery);
        self.surface.render(RenderCommand::SetHeader(None));
        self.surface.render(RenderCommand::ShowCards(Vec::new()));
        self.surface.render(RenderCommand::SetClock(None));
        debug!("Search reset");
    }

    /// Navigating away from the search page stops the clock
    pub fn leave_search(&self) {
        if self.clock.stop() {
            self.surface.render(RenderCommand::SetClock(None));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Country, Dataset, Place};
    use crate::render::MemorySurface;

    fn dataset() -> Dataset {
        Dataset {
            beaches: vec![
                Place::new("Bora Bora, French Polynesia"),
                Place::new("Copacabana Beach, Brazil"),
            ],
            temples: vec![Place::new("Angkor Wat, Cambodia")],
            countries: vec![
                Country::new(
                    "Japan",
                    vec![Place::new("Tokyo, Japan"), Place::new("Kyoto, Japan")],
                ),
                Country::new("France", vec![Place::new("Paris, France")]),
                Country::new("Brazil", vec![Place::new("Rio de Janeiro, Brazil")]),
            ],
        }
    }

    fn loaded_app() -> (Arc<MemorySurface>, TravelApp) {
        let surface = Arc::new(MemorySurface::new());
        let app = TravelApp::new(surface.clone());
        app.store().set(dataset()).unwrap();
        (surface, app)
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_rejected_before_loading() {
        let surface = Arc::new(MemorySurface::new());
        let app = TravelApp::new(surface.clone());

        for raw in ["", "   "] {
            let err = app.search(raw).unwrap_err();
            assert!(matches!(err, TravelRecsError::EmptyQuery));
            let state = surface.snapshot();
            assert!(state.cards.is_empty());
            assert_eq!(state.header, None);
            assert_eq!(state.message, Some(err.user_message()));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_before_load_is_not_ready() {
        let surface = Arc::new(MemorySurface::new());
        let app = TravelApp::new(surface.clone());

        let err = app.search("japan").unwrap_err();
        assert!(matches!(err, TravelRecsError::DatasetNotReady));
        assert!(surface.snapshot().message.unwrap().contains("still loading"));
    }

    #[test]
    fn test_country_search_outside_runtime_shows_static_clock() {
        let (surface, app) = loaded_app();
        let result = app.search("japan").unwrap();
        assert_eq!(result.tier, Some("country-exact"));

        let state = surface.snapshot();
        assert_eq!(state.cards.len(), 2);
        assert!(state.clock.unwrap().starts_with("Local time in Japan: "));
        assert!(!app.clock().is_running());
    }

    #[tokio::test]
    async fn test_empty_dataset_still_becomes_ready() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "{}").unwrap();

        let surface = Arc::new(MemorySurface::new());
        let app = TravelApp::new(surface.clone());
        let source = DatasetSource::File(file.path().to_path_buf());
        app.load_dataset(&source, Duration::from_secs(1)).await.unwrap();

        assert!(app.store().is_ready());
        assert!(app.store().get().unwrap().is_empty());
        let err = app.search("japan").unwrap_err();
        assert!(matches!(err, TravelRecsError::NoMatch { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyword_search_renders_without_clock() {
        let (surface, app) = loaded_app();
        let result = app.search("Beaches").unwrap();
        assert_eq!(result.tier, Some("beach"));

        let state = surface.snapshot();
        assert_eq!(state.header.as_deref(), Some("Results for \"Beaches\""));
        assert_eq!(state.cards.len(), 2);
        assert!(state.cards.iter().all(|c| c.badge == "Beaches"));
        assert_eq!(state.clock, None);
        assert!(!app.clock().is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_country_search_starts_single_clock() {
        let (surface, app) = loaded_app();
        app.search("JAPAN").unwrap();

        assert!(app.clock().is_running());
        let clock = surface.snapshot().clock.unwrap();
        assert!(clock.starts_with("Local time in Japan: "));
    }

    #[tokio::test(start_paused = true)]
    async fn test_country_without_timezone_shows_notice() {
        let (surface, app) = loaded_app();
        app.search("japan").unwrap();
        app.search("france").unwrap();

        assert!(!app.clock().is_running());
        assert_eq!(
            surface.snapshot().clock.as_deref(),
            Some("Local time for France is not available.")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_country_keyword_starts_multi_clock() {
        let (surface, app) = loaded_app();
        let result = app.search("countries").unwrap();
        assert_eq!(result.items.len(), 4);

        let clock = surface.snapshot().clock.unwrap();
        let lines: Vec<&str> = clock.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Japan: "));
        assert!(lines[1].starts_with("Brazil: "));
    }

    #[tokio::test(start_paused = true)]
    async fn test_city_search_infers_country_clock() {
        let (surface, app) = loaded_app();
        let result = app.search("kyo").unwrap();
        assert_eq!(result.tier, Some("city"));
        assert_eq!(result.label.as_deref(), Some("City Results"));
        assert!(
            surface
                .snapshot()
                .clock
                .unwrap()
                .starts_with("Local time in Japan: ")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_match_stops_clock() {
        let (surface, app) = loaded_app();
        app.search("japan").unwrap();
        let err = app.search("atlantis").unwrap_err();

        assert!(matches!(err, TravelRecsError::NoMatch { .. }));
        assert!(!app.clock().is_running());
        let state = surface.snapshot();
        assert!(state.cards.is_empty());
        assert_eq!(state.header, None);
        assert_eq!(state.clock, None);
        assert!(state.message.unwrap().contains("atlantis"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_clears_everything() {
        let (surface, app) = loaded_app();
        app.search("brazil").unwrap();
        assert!(app.clock().is_running());

        app.reset();
        let state = surface.snapshot();
        assert!(!app.clock().is_running());
        assert_eq!(state.header, None);
        assert!(state.cards.is_empty());
        assert_eq!(state.clock, None);
        assert_eq!(state.query_clears, 1);

        // resetting an idle app is fine too
        app.reset();
        assert_eq!(surface.snapshot().query_clears, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_leave_search_stops_clock() {
        let (surface, app) = loaded_app();
        app.search("japan").unwrap();
        app.leave_search();

        assert!(!app.clock().is_running());
        assert_eq!(surface.snapshot().clock, None);
        // results stay rendered
        assert_eq!(surface.snapshot().cards.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_searches_keep_one_clock() {
        let (surface, app) = loaded_app();
        app.search("japan").unwrap();
        let updates_before = surface.snapshot().clock_updates;
        app.search("brazil").unwrap();
        let active = app.clock().active_task();

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(app.clock().active_task(), active);
        let state = surface.snapshot();
        // one immediate render for brazil plus one tick
        assert_eq!(state.clock_updates, updates_before + 2);
        assert!(state.clock.unwrap().starts_with("Local time in Brazil: "));
    }
}
