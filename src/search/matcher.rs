//! Tiered query matching
//!
//! A normalized query is resolved against the dataset by walking an ordered
//! list of tiers; the first tier that matches decides the result. The order
//! is part of the contract: category keywords beat country names, exact
//! country names beat partial ones, and countries beat cities.

use crate::models::{Dataset, Place};
use crate::timezone::infer_country_from_city_name;
use serde::Serialize;
use tracing::debug;

/// Clock requested by a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ClockTarget {
    /// No clock for this result
    None,
    /// A single clock for one country
    Country(String),
    /// One clock line per listed country
    Countries(Vec<String>),
}

/// What a tier produced
#[derive(Debug, Clone, PartialEq)]
pub struct TierMatch {
    pub items: Vec<Place>,
    pub label: String,
    pub clock: ClockTarget,
}

/// Outcome of resolving one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub items: Vec<Place>,
    /// Badge label; `None` when no tier matched
    pub label: Option<String>,
    pub query: String,
    /// Name of the tier that fired
    pub tier: Option<&'static str>,
    pub clock: ClockTarget,
}

impl MatchResult {
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.tier.is_some()
    }
}

/// One ranked rule in the matcher's precedence chain
pub trait MatchTier: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` when this tier does not apply to the query
    fn resolve(&self, query: &str, dataset: &Dataset) -> Option<TierMatch>;
}

/// Which keyword list a keyword tier returns
#[derive(Debug, Clone, Copy)]
enum Category {
    Beaches,
    Temples,
}

/// Exact keyword → whole category
struct KeywordTier {
    keyword: &'static str,
    label: &'static str,
    category: Category,
}

impl MatchTier for KeywordTier {
    fn name(&self) -> &'static str {
        self.keyword
    }

    fn resolve(&self, query: &str, dataset: &Dataset) -> Option<TierMatch> {
        if query != self.keyword {
            return None;
        }
        let items = match self.category {
            Category::Beaches => dataset.beaches.clone(),
            Category::Temples => dataset.temples.clone(),
        };
        Some(TierMatch {
            items,
            label: self.label.to_string(),
            clock: ClockTarget::None,
        })
    }
}

/// "country" → every city, clocks for every country
struct AllCountriesTier;

impl MatchTier for AllCountriesTier {
    fn name(&self) -> &'static str {
        "country"
    }

    fn resolve(&self, query: &str, dataset: &Dataset) -> Option<TierMatch> {
        if query != "country" {
            return None;
        }
        Some(TierMatch {
            items: dataset.all_cities().cloned().collect(),
            label: "Countries (Cities)".to_string(),
            clock: ClockTarget::Countries(
                dataset.countries.iter().map(|c| c.name.clone()).collect(),
            ),
        })
    }
}

/// Country name equal to the query
struct CountryExactTier;

impl MatchTier for CountryExactTier {
    fn name(&self) -> &'static str {
        "country-exact"
    }

    fn resolve(&self, query: &str, dataset: &Dataset) -> Option<TierMatch> {
        dataset
            .countries
            .iter()
            .find(|c| c.name.trim().to_lowercase() == query)
            .map(country_match)
    }
}

/// Country name containing the query, first in dataset order
struct CountryPartialTier;

impl MatchTier for CountryPartialTier {
    fn name(&self) -> &'static str {
        "country-partial"
    }

    fn resolve(&self, query: &str, dataset: &Dataset) -> Option<TierMatch> {
        dataset
            .countries
            .iter()
            .find(|c| c.name.to_lowercase().contains(query))
            .map(country_match)
    }
}

fn country_match(country: &crate::models::Country) -> TierMatch {
    TierMatch {
        items: country.cities.clone(),
        label: format!("{} (Cities)", country.name),
        clock: ClockTarget::Country(country.name.clone()),
    }
}

/// Every city whose name contains the query
struct CityTier;

impl MatchTier for CityTier {
    fn name(&self) -> &'static str {
        "city"
    }

    fn resolve(&self, query: &str, dataset: &Dataset) -> Option<TierMatch> {
        let items: Vec<Place> = dataset
            .all_cities()
            .filter(|city| city.name.to_lowercase().contains(query))
            .cloned()
            .collect();

        let first = items.first()?;
        let clock = infer_country_from_city_name(&first.name)
            .map_or(ClockTarget::None, ClockTarget::Country);

        Some(TierMatch {
            items,
            label: "City Results".to_string(),
            clock,
        })
    }
}

/// Resolves normalized queries through an ordered list of tiers
pub struct Matcher {
    tiers: Vec<Box<dyn MatchTier>>,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(vec![
            Box::new(KeywordTier {
                keyword: "beach",
                label: "Beaches",
                category: Category::Beaches,
            }),
            Box::new(KeywordTier {
                keyword: "temple",
                label: "Temples",
                category: Category::Temples,
            }),
            Box::new(AllCountriesTier),
            Box::new(CountryExactTier),
            Box::new(CountryPartialTier),
            Box::new(CityTier),
        ])
    }
}

impl Matcher {
    /// Build a matcher from tiers in precedence order
    #[must_use]
    pub fn new(tiers: Vec<Box<dyn MatchTier>>) -> Self {
        Self { tiers }
    }

    /// Tier names in the order they are tried
    #[must_use]
    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }

    /// Resolve a normalized, non-empty query. A result without a tier means
    /// nothing matched.
    #[must_use]
    pub fn resolve(&self, query: &str, dataset: &Dataset) -> MatchResult {
        for tier in &self.tiers {
            if let Some(found) = tier.resolve(query, dataset) {
                debug!(
                    "Query '{}' matched tier '{}' with {} items",
                    query,
                    tier.name(),
                    found.items.len()
                );
                return MatchResult {
                    items: found.items,
                    label: Some(found.label),
                    query: query.to_string(),
                    tier: Some(tier.name()),
                    clock: found.clock,
                };
            }
        }

        debug!("Query '{}' matched no tier", query);
        MatchResult {
            items: Vec::new(),
            label: None,
            query: query.to_string(),
            tier: None,
            clock: ClockTarget::None,
        }
    }
}
