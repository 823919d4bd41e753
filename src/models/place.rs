//! Place and country models as they appear in the recommendation dataset

use serde::{Deserialize, Serialize};

/// A recommended destination: a beach, a temple or a city
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Place {
    /// Display name, for cities usually "City, Country"
    pub name: String,
    /// Short description shown on the card
    pub description: Option<String>,
    /// Card image location
    pub image_url: Option<String>,
}

impl Place {
    /// Create a place with a name only
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a place with every field set
    #[must_use]
    pub fn with_details(
        name: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            image_url: Some(image_url.into()),
        }
    }

    /// Description if present and not blank
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
    }

    /// Image URL if present and not blank
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|u| !u.trim().is_empty())
    }
}

/// A country and its recommended cities, in source order
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Country {
    pub name: String,
    pub cities: Vec<Place>,
}

impl Country {
    #[must_use]
    pub fn new(name: impl Into<String>, cities: Vec<Place>) -> Self {
        Self {
            name: name.into(),
            cities,
        }
    }
}
