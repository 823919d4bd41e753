//! Result rendering
//!
//! The core never draws anything itself. It sends [`RenderCommand`]s to a
//! [`RenderSurface`], which owns presentation. [`ResultRenderer`] turns a
//! result list and its badge label into cards.

use crate::config::DisplayConfig;
use crate::models::Place;
use serde::Serialize;
use std::sync::{Mutex, PoisonError};

/// Shown on a card whose place has no description
pub const NO_DESCRIPTION: &str = "No description available.";

/// Shown instead of cards when a result list is empty
pub const NO_RESULTS: &str = "No recommendations found. Try another keyword.";

/// One displayed recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: String,
    pub image_url: String,
    pub badge: String,
    pub description: String,
}

/// Commands understood by a rendering surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    /// Replace the results header; `None` hides it
    SetHeader(Option<String>),
    /// Replace all rendered cards
    ShowCards(Vec<Card>),
    /// Replace all rendered cards with a message
    ShowMessage(String),
    /// Replace the clock text; `None` hides the clock
    SetClock(Option<String>),
    /// Clear the query input
    ClearQuery,
}

/// Presentation side of the application
pub trait RenderSurface: Send + Sync {
    fn render(&self, command: RenderCommand);
}

/// Builds cards from results
#[derive(Debug, Clone)]
pub struct ResultRenderer {
    max_cards: usize,
    min_cards: usize,
    placeholder_image: String,
}

impl Default for ResultRenderer {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}

impl ResultRenderer {
    #[must_use]
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            max_cards: config.max_cards,
            min_cards: config.min_cards,
            placeholder_image: config.placeholder_image.clone(),
        }
    }

    /// Number of cards shown for `count` results: all of them below the
    /// minimum, otherwise at least the minimum and at most the maximum.
    #[must_use]
    pub fn display_count(&self, count: usize) -> usize {
        if count < self.min_cards {
            count
        } else {
            count.min(self.max_cards).max(self.min_cards)
        }
    }

    /// Cards for the displayed window of `items`
    #[must_use]
    pub fn cards(&self, items: &[Place], label: &str) -> Vec<Card> {
        items
            .iter()
            .take(self.display_count(items.len()))
            .map(|place| self.card(place, label))
            .collect()
    }

    fn card(&self, place: &Place, label: &str) -> Card {
        Card {
            title: place.name.clone(),
            image_url: place
                .image_url()
                .unwrap_or(&self.placeholder_image)
                .to_string(),
            badge: label.to_string(),
            description: place.description().unwrap_or(NO_DESCRIPTION).to_string(),
        }
    }

    /// Replace whatever the surface shows with these results
    pub fn render(&self, surface: &dyn RenderSurface, items: &[Place], label: &str) {
        if items.is_empty() {
            surface.render(RenderCommand::ShowMessage(NO_RESULTS.to_string()));
        } else {
            surface.render(RenderCommand::ShowCards(self.cards(items, label)));
        }
    }
}

/// Latest state shown by a [`MemorySurface`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceState {
    pub header: Option<String>,
    pub cards: Vec<Card>,
    pub message: Option<String>,
    pub clock: Option<String>,
    /// Number of clock updates received
    pub clock_updates: usize,
    /// Number of times the query input was cleared
    pub query_clears: usize,
}

/// Surface that keeps what it would show in memory
#[derive(Debug, Default)]
pub struct MemorySurface {
    state: Mutex<SurfaceState>,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> SurfaceState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RenderSurface for MemorySurface {
    fn render(&self, command: RenderCommand) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match command {
            RenderCommand::SetHeader(header) => state.header = header,
            RenderCommand::ShowCards(cards) => {
                state.cards = cards;
                state.message = None;
            }
            RenderCommand::ShowMessage(message) => {
                state.cards.clear();
                state.message = Some(message);
            }
            RenderCommand::SetClock(clock) => {
                if clock.is_some() {
                    state.clock_updates += 1;
                }
                state.clock = clock;
            }
            RenderCommand::ClearQuery => state.query_clears += 1,
        }
    }
}
