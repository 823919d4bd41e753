//! The recommendation dataset loaded once at startup

use super::{Country, Place};
use serde::{Deserialize, Serialize};

/// All recommendations, grouped by category
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Dataset {
    pub beaches: Vec<Place>,
    pub temples: Vec<Place>,
    pub countries: Vec<Country>,
}

impl Dataset {
    /// Parse a dataset document. Absent keys become empty lists.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Every city of every country, countries in source order
    pub fn all_cities(&self) -> impl Iterator<Item = &Place> {
        self.countries.iter().flat_map(|c| c.cities.iter())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.beaches.is_empty() && self.temples.is_empty() && self.countries.is_empty()
    }
}
