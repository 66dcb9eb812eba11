//! Configuration types for Sextant error reporting.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources. Every field is optional in serialized form and falls back
//! to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining reporter settings and the error family.
//! - [`ReporterConfig`] - Controls how the [`ErrorReporter`](crate::reporter::ErrorReporter) labels
//!   diagnostics and when it aborts.
//!
//! # Example
//!
//! ```
//! # use sextant::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.reporter().source(), "xml");
//! assert!(!config.reporter().continue_after_fatal_error());
//! ```

use serde::Deserialize;

use crate::{family::FamilyKind, message::Locale};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Reporter configuration section.
    #[serde(default)]
    reporter: ReporterConfig,

    /// Error family used to resolve ranges and the fatal-error policy.
    #[serde(default)]
    family: FamilyKind,
}

impl AppConfig {
    /// Creates a new [`AppConfig`].
    ///
    /// # Arguments
    ///
    /// * `reporter` - Reporter settings.
    /// * `family` - Error family of the parse pass.
    pub fn new(reporter: ReporterConfig, family: FamilyKind) -> Self {
        Self { reporter, family }
    }

    /// Returns the reporter configuration.
    pub fn reporter(&self) -> &ReporterConfig {
        &self.reporter
    }

    /// Returns the configured error family.
    pub fn family(&self) -> FamilyKind {
        self.family
    }

    /// Replace the error family.
    pub fn with_family(mut self, family: FamilyKind) -> Self {
        self.family = family;
        self
    }
}

/// Settings of an [`ErrorReporter`](crate::reporter::ErrorReporter).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
    /// Label stored as the source of every diagnostic.
    source: String,

    /// Locale passed to message formatters.
    locale: Locale,

    /// Record fatal errors as diagnostics and keep parsing.
    continue_after_fatal_error: bool,

    /// Cross-check positions derived from the parser location against the
    /// document index.
    validate_locator_positions: bool,

    /// Additional keys whose fatal errors never abort parsing.
    ignored_fatal_keys: Vec<String>,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            source: "xml".to_string(),
            locale: Locale::default(),
            continue_after_fatal_error: false,
            validate_locator_positions: true,
            ignored_fatal_keys: Vec::new(),
        }
    }
}

impl ReporterConfig {
    /// Returns the diagnostic source label.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the message locale.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Returns `true` if fatal errors never abort parsing.
    pub fn continue_after_fatal_error(&self) -> bool {
        self.continue_after_fatal_error
    }

    /// Returns `true` if parser-derived positions are checked against the
    /// document index.
    pub fn validate_locator_positions(&self) -> bool {
        self.validate_locator_positions
    }

    /// Returns the keys whose fatal errors are ignored in addition to the
    /// family's own.
    pub fn ignored_fatal_keys(&self) -> &[String] {
        &self.ignored_fatal_keys
    }

    /// Set the diagnostic source label.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the message locale.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set whether parsing continues after fatal errors.
    pub fn with_continue_after_fatal_error(mut self, enabled: bool) -> Self {
        self.continue_after_fatal_error = enabled;
        self
    }

    /// Set whether parser-derived positions are cross-checked.
    pub fn with_validate_locator_positions(mut self, enabled: bool) -> Self {
        self.validate_locator_positions = enabled;
        self
    }

    /// Add a key whose fatal errors never abort parsing.
    pub fn with_ignored_fatal_key(mut self, key: impl Into<String>) -> Self {
        self.ignored_fatal_keys.push(key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReporterConfig::default();

        assert_eq!(config.source(), "xml");
        assert_eq!(config.locale().as_str(), "en");
        assert!(!config.continue_after_fatal_error());
        assert!(config.validate_locator_positions());
        assert!(config.ignored_fatal_keys().is_empty());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").expect("empty config parses");

        assert_eq!(config.family(), FamilyKind::Xml);
        assert_eq!(config.reporter(), &ReporterConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            family = "schema"

            [reporter]
            locale = "fr-FR"
            continue_after_fatal_error = true
            ignored_fatal_keys = ["ETagRequired"]
            "#,
        )
        .expect("config parses");

        assert_eq!(config.family(), FamilyKind::Schema);
        let reporter = config.reporter();
        assert_eq!(reporter.source(), "xml");
        assert_eq!(reporter.locale().language(), "fr");
        assert!(reporter.continue_after_fatal_error());
        assert!(reporter.validate_locator_positions());
        assert_eq!(reporter.ignored_fatal_keys(), ["ETagRequired"]);
    }

    #[test]
    fn test_unknown_family_rejected() {
        let result = toml::from_str::<AppConfig>("family = \"relaxng\"");

        assert!(result.is_err());
    }

    #[test]
    fn test_builders() {
        let config = ReporterConfig::default()
            .with_source("sextant")
            .with_continue_after_fatal_error(true)
            .with_validate_locator_positions(false)
            .with_ignored_fatal_key("MarkupEntityMismatch");

        assert_eq!(config.source(), "sextant");
        assert!(config.continue_after_fatal_error());
        assert!(!config.validate_locator_positions());
        assert_eq!(config.ignored_fatal_keys(), ["MarkupEntityMismatch"]);
    }
}
