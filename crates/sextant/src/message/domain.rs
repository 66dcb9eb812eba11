//! Message domains used by the parsing engine.

use std::fmt;

/// A namespace grouping related error message keys.
///
/// The engine identifies domains by URI. Known URIs parse into dedicated
/// variants; anything else is kept verbatim in [`Domain::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Domain {
    /// XML 1.0 well-formedness.
    Xml,
    /// Namespaces in XML.
    XmlNs,
    /// XML Schema validation.
    Schema,
    /// `xml-model` processing instructions.
    XmlModel,
    /// Any other domain, by URI.
    Other(String),
}

impl Domain {
    pub const XML_URI: &'static str = "http://www.w3.org/TR/1998/REC-xml-19980210";
    pub const XMLNS_URI: &'static str = "http://www.w3.org/TR/1999/REC-xml-names-19990114";
    pub const SCHEMA_URI: &'static str = "http://www.w3.org/TR/xml-schema-1";
    pub const XML_MODEL_URI: &'static str = "http://www.w3.org/TR/xml-model/";

    /// Parse a domain URI.
    pub fn parse(uri: &str) -> Self {
        match uri {
            Self::XML_URI => Domain::Xml,
            Self::XMLNS_URI => Domain::XmlNs,
            Self::SCHEMA_URI => Domain::Schema,
            Self::XML_MODEL_URI => Domain::XmlModel,
            other => Domain::Other(other.to_string()),
        }
    }

    /// Returns the domain URI.
    pub fn as_str(&self) -> &str {
        match self {
            Domain::Xml => Self::XML_URI,
            Domain::XmlNs => Self::XMLNS_URI,
            Domain::Schema => Self::SCHEMA_URI,
            Domain::XmlModel => Self::XML_MODEL_URI,
            Domain::Other(uri) => uri,
        }
    }
}

impl From<&str> for Domain {
    fn from(uri: &str) -> Self {
        Self::parse(uri)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_domains() {
        assert_eq!(Domain::parse(Domain::XML_URI), Domain::Xml);
        assert_eq!(Domain::parse(Domain::XMLNS_URI), Domain::XmlNs);
        assert_eq!(Domain::parse(Domain::SCHEMA_URI), Domain::Schema);
        assert_eq!(Domain::parse(Domain::XML_MODEL_URI), Domain::XmlModel);
    }

    #[test]
    fn test_parse_other_domain_keeps_uri() {
        let domain = Domain::parse("urn:custom");

        assert_eq!(domain, Domain::Other("urn:custom".to_string()));
        assert_eq!(domain.to_string(), "urn:custom");
    }
}
