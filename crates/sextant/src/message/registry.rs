//! Domain → formatter lookup table.

use std::{fmt, sync::Arc};

use indexmap::IndexMap;

use crate::message::{
    catalog::CatalogFormatter, domain::Domain, formatter::MessageFormatter,
    schema::SchemaFormatter,
};

/// Maps message domains to the formatter responsible for them.
///
/// [`FormatterRegistry::with_defaults`] registers the built-in domains;
/// [`FormatterRegistry::register`] adds or replaces formatters for any other
/// domain.
#[derive(Clone)]
pub struct FormatterRegistry {
    formatters: IndexMap<Domain, Arc<dyn MessageFormatter>>,
}

impl FormatterRegistry {
    /// Create a registry without any formatter.
    pub fn empty() -> Self {
        Self {
            formatters: IndexMap::new(),
        }
    }

    /// Create a registry with the built-in formatters.
    ///
    /// XML and XML namespace messages share one formatter.
    pub fn with_defaults() -> Self {
        let xml: Arc<dyn MessageFormatter> = Arc::new(CatalogFormatter::xml());

        let mut registry = Self::empty();
        registry.register(Domain::Xml, Arc::clone(&xml));
        registry.register(Domain::XmlNs, xml);
        registry.register(Domain::Schema, Arc::new(SchemaFormatter::new()));
        registry.register(Domain::XmlModel, Arc::new(CatalogFormatter::xml_model()));
        registry
    }

    /// Register `formatter` for `domain`.
    ///
    /// Returns the formatter previously registered for the domain, if any.
    pub fn register(
        &mut self,
        domain: Domain,
        formatter: Arc<dyn MessageFormatter>,
    ) -> Option<Arc<dyn MessageFormatter>> {
        self.formatters.insert(domain, formatter)
    }

    /// Get the formatter registered for `domain`.
    pub fn get(&self, domain: &Domain) -> Option<&dyn MessageFormatter> {
        self.formatters.get(domain).map(|formatter| formatter.as_ref())
    }

    /// Iterate over the registered domains in registration order.
    pub fn domains(&self) -> impl Iterator<Item = &Domain> {
        self.formatters.keys()
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterRegistry")
            .field("domains", &self.formatters.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{event::Argument, message::formatter::Locale};

    struct Upper;

    impl MessageFormatter for Upper {
        fn format(&self, _locale: &Locale, key: &str, _arguments: &[Argument]) -> String {
            key.to_uppercase()
        }
    }

    #[test]
    fn test_default_domains() {
        let registry = FormatterRegistry::with_defaults();
        let domains: Vec<_> = registry.domains().cloned().collect();

        assert_eq!(
            domains,
            [Domain::Xml, Domain::XmlNs, Domain::Schema, Domain::XmlModel]
        );
    }

    #[test]
    fn test_xml_and_namespaces_share_catalog() {
        let registry = FormatterRegistry::with_defaults();
        let locale = Locale::default();
        let args = [Argument::from("a"), Argument::from("p")];

        let xml = registry.get(&Domain::Xml).map(|f| f.format(&locale, "ElementPrefixUnbound", &args));
        let ns = registry.get(&Domain::XmlNs).map(|f| f.format(&locale, "ElementPrefixUnbound", &args));

        assert!(xml.is_some());
        assert_eq!(xml, ns);
    }

    #[test]
    fn test_unknown_domain_not_registered() {
        let registry = FormatterRegistry::with_defaults();

        assert!(registry.get(&Domain::parse("urn:custom")).is_none());
    }

    #[test]
    fn test_register_extension_domain() {
        let mut registry = FormatterRegistry::with_defaults();
        let previous = registry.register(Domain::parse("urn:custom"), Arc::new(Upper));

        assert!(previous.is_none());
        let message = registry
            .get(&Domain::parse("urn:custom"))
            .map(|f| f.format(&Locale::default(), "oops", &[]));
        assert_eq!(message.as_deref(), Some("OOPS"));
    }
}
