//! The message formatter capability.

use std::fmt;

use serde::Deserialize;

use crate::event::Argument;

/// Locale requested for formatted messages, as a language tag (`"en"`, `"fr-CA"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Create a locale from a language tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Get the language tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the primary language subtag (`"fr"` for `"fr-CA"`).
    pub fn language(&self) -> &str {
        self.0.split(['-', '_']).next().unwrap_or_default()
    }

    /// Returns `true` if the locale is English or unspecified.
    pub fn is_english(&self) -> bool {
        let language = self.language();
        language.is_empty() || language.eq_ignore_ascii_case("en")
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns a message key and its arguments into readable text.
pub trait MessageFormatter: Send + Sync {
    /// Format the message for `key`.
    ///
    /// Formatting never fails: keys the formatter does not know still produce
    /// some text.
    fn format(&self, locale: &Locale, key: &str, arguments: &[Argument]) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_language() {
        assert_eq!(Locale::new("fr-CA").language(), "fr");
        assert_eq!(Locale::new("en_US").language(), "en");
        assert!(Locale::new("EN").is_english());
        assert!(Locale::new("").is_english());
        assert!(!Locale::new("de").is_english());
    }
}
