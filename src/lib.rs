//! `TravelRecs` - Travel recommendation search with live destination clocks
//!
//! This library loads a small recommendation dataset (beaches, temples and
//! countries with their cities), matches free-text queries against it,
//! renders result cards and keeps a live clock for the matched countries.

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod render;
pub mod search;
pub mod store;
pub mod timezone;

// Re-export core types for public API
pub use app::TravelApp;
pub use clock::{ClockDisplay, ClockScheduler, ClockTaskId, format_wall_clock};
pub use config::TravelRecsConfig;
pub use error::TravelRecsError;
pub use models::{Country, Dataset, Place};
pub use render::{Card, MemorySurface, RenderCommand, RenderSurface, ResultRenderer};
pub use search::{ClockTarget, MatchResult, Matcher, normalize_query};
pub use store::{DataStore, DatasetSource};
pub use timezone::{TimeZoneResolver, infer_country_from_city_name};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TravelRecsError>;
