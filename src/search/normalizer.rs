//! Query normalization
//!
//! Turns raw user input into the canonical form the matcher compares against:
//! lowercase, punctuation stripped, trimmed, and the plural category keywords
//! folded onto their singular form.

/// Plural keywords and the singular form each one is folded onto
const KEYWORD_PLURALS: [(&str, &str); 3] = [
    ("beaches", "beach"),
    ("temples", "temple"),
    ("countries", "country"),
];

fn is_kept(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c.is_whitespace()
}

/// Normalize a raw query. An empty result means "no query".
#[must_use]
pub fn normalize_query(raw: &str) -> String {
    let cleaned: String = raw.to_lowercase().chars().filter(|&c| is_kept(c)).collect();
    let trimmed = cleaned.trim();

    KEYWORD_PLURALS
        .iter()
        .find(|(plural, _)| *plural == trimmed)
        .map_or_else(|| trimmed.to_string(), |(_, singular)| (*singular).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Beach", "beach")]
    #[case("  BEACHES ", "beach")]
    #[case("temples", "temple")]
    #[case("Countries!", "country")]
    #[case("Japan?", "japan")]
    #[case("rio de janeiro", "rio de janeiro")]
    #[case("são-paulo", "são-paulo")]
    #[case("snake_case", "snake_case")]
    fn test_normalize(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_query(raw), expected);
    }

    #[rstest]
    #[case("")]
    #[case("    ")]
    #[case("?!.,")]
    fn test_normalize_to_empty(#[case] raw: &str) {
        assert!(normalize_query(raw).is_empty());
    }

    #[test]
    fn test_plural_folding_is_exact() {
        // Only the whole query is folded, not a word inside it
        assert_eq!(normalize_query("beaches of brazil"), "beaches of brazil");
        assert_eq!(normalize_query("country"), "country");
    }
}
