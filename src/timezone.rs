//! Country timezone lookup and city → country inference

use chrono_tz::Tz;

/// Countries with a configured clock
const COUNTRY_TIMEZONES: [(&str, Tz); 3] = [
    ("australia", chrono_tz::Australia::Sydney),
    ("japan", chrono_tz::Asia::Tokyo),
    ("brazil", chrono_tz::America::Sao_Paulo),
];

/// Maps country names to the timezone their clock is shown in
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeZoneResolver;

impl TimeZoneResolver {
    /// Timezone for a country, case-insensitive on the trimmed name.
    /// `None` means the country has no clock configured.
    #[must_use]
    pub fn resolve(&self, country: &str) -> Option<Tz> {
        let key = country.trim().to_lowercase();
        COUNTRY_TIMEZONES
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, tz)| *tz)
    }

    /// Number of configured countries
    #[must_use]
    pub fn len(&self) -> usize {
        COUNTRY_TIMEZONES.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        COUNTRY_TIMEZONES.is_empty()
    }
}

/// Infer the country from a "City, Country" display name.
///
/// This is syntactic only: the trailing comma-separated segment is taken as
/// the country, so a country name that itself contains a comma is mis-split.
#[must_use]
pub fn infer_country_from_city_name(city: &str) -> Option<String> {
    let segments: Vec<&str> = city.split(',').collect();
    if segments.len() < 2 {
        return None;
    }
    segments
        .last()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
