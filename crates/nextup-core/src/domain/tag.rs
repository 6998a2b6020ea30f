//! Marker tag slug.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Slug used when the configured value is unset or blank.
pub const DEFAULT_TAG_SLUG: &str = "next-event";

/// The slug identifying the marker tag.
///
/// Construction normalizes: surrounding whitespace is trimmed, and an empty
/// result falls back to [`DEFAULT_TAG_SLUG`]. Deserialization goes through
/// the same path, so a slug read from config is always usable as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct TagSlug(String);

impl TagSlug {
    pub fn new(slug: impl Into<String>) -> Self {
        let slug = slug.into();
        let trimmed = slug.trim();
        if trimmed.is_empty() {
            Self(DEFAULT_TAG_SLUG.to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TagSlug {
    fn default() -> Self {
        Self(DEFAULT_TAG_SLUG.to_string())
    }
}

impl From<String> for TagSlug {
    fn from(slug: String) -> Self {
        Self::new(slug)
    }
}

impl fmt::Display for TagSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("featured", "featured")]
    #[case::padded("  featured  ", "featured")]
    #[case::empty("", DEFAULT_TAG_SLUG)]
    #[case::blank("   ", DEFAULT_TAG_SLUG)]
    fn new_normalizes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(TagSlug::new(input).as_str(), expected);
    }

    #[test]
    fn default_is_the_documented_slug() {
        assert_eq!(TagSlug::default().as_str(), "next-event");
    }

    #[test]
    fn deserialization_normalizes_too() {
        let slug: TagSlug = serde_json::from_str("\"  \"").unwrap();
        assert_eq!(slug.as_str(), DEFAULT_TAG_SLUG);
    }
}
