//! Glossary records collected while rendering a specification.
//!
//! Every `[[def:...]]` directive produces a [`TermDefinition`], every
//! `[[ref:...]]` appends the referenced term name, and `[[tref:...]]` /
//! `[[xref:...]]` append an [`ExternalReference`]. All three lists keep
//! encounter order; uniqueness is deliberately not enforced here.

use serde::Serialize;

/// A term defined by a `[[def:...]]` directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermDefinition {
    /// The canonical term text as written in the directive.
    term: String,

    /// An optional display alias (second directive argument).
    alias: Option<String>,

    /// The source document this definition came from, when known.
    source: Option<String>,
}

impl TermDefinition {
    /// Creates a definition for `term` with no alias or source.
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            alias: None,
            source: None,
        }
    }

    /// Sets the display alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets the source document name.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The canonical term text.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The display alias, if any.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The text shown for this definition: the alias when present,
    /// otherwise the term itself.
    pub fn display_text(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.term)
    }

    /// The source document, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// A reference to a term defined in an external specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalReference {
    /// Identifier of the external specification.
    spec: String,

    /// The referenced term within that specification.
    term: String,
}

impl ExternalReference {
    /// Creates an external reference to `term` in the spec named `spec`.
    pub fn new(spec: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            spec: spec.into(),
            term: term.into(),
        }
    }

    /// Identifier of the external specification.
    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// The referenced term.
    pub fn term(&self) -> &str {
        &self.term
    }
}

/// Ordered record of every definition and reference seen in a document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Glossary {
    definitions: Vec<TermDefinition>,
    references: Vec<String>,
    external_references: Vec<ExternalReference>,
}

impl Glossary {
    /// Creates an empty glossary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a term definition, keeping encounter order. Duplicate
    /// terms are kept; the renderer decides how to disambiguate anchors.
    pub fn define(&mut self, definition: TermDefinition) {
        self.definitions.push(definition);
    }

    /// Records a `[[ref:...]]` to `term`.
    pub fn reference(&mut self, term: impl Into<String>) {
        self.references.push(term.into());
    }

    /// Records a tref/xref to an external specification.
    pub fn reference_external(&mut self, external: ExternalReference) {
        self.external_references.push(external);
    }

    /// All definitions, in document order.
    pub fn definitions(&self) -> &[TermDefinition] {
        &self.definitions
    }

    /// All referenced term names, in document order.
    pub fn references(&self) -> &[String] {
        &self.references
    }

    /// All external references, in document order.
    pub fn external_references(&self) -> &[ExternalReference] {
        &self.external_references
    }

    /// True when nothing has been defined or referenced.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
            && self.references.is_empty()
            && self.external_references.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_display_text_prefers_alias() {
        let def = TermDefinition::new("decentralized-identifier").with_alias("DID");
        assert_eq!(def.display_text(), "DID");
        assert_eq!(def.term(), "decentralized-identifier");
    }

    #[test]
    fn test_definition_without_alias() {
        let def = TermDefinition::new("claim");
        assert_eq!(def.display_text(), "claim");
        assert!(def.alias().is_none());
        assert!(def.source().is_none());
    }

    #[test]
    fn test_glossary_keeps_order_and_duplicates() {
        let mut glossary = Glossary::new();
        glossary.define(TermDefinition::new("claim"));
        glossary.define(TermDefinition::new("holder"));
        glossary.define(TermDefinition::new("claim"));

        let terms: Vec<_> = glossary.definitions().iter().map(|d| d.term()).collect();
        assert_eq!(terms, ["claim", "holder", "claim"]);
    }

    #[test]
    fn test_glossary_records_references_in_order() {
        let mut glossary = Glossary::new();
        glossary.reference("holder");
        glossary.reference("claim");
        glossary.reference("holder");

        assert_eq!(glossary.references(), ["holder", "claim", "holder"]);
    }

    #[test]
    fn test_glossary_external_references() {
        let mut glossary = Glossary::new();
        glossary.reference_external(ExternalReference::new("vc-data-model", "issuer"));

        assert_eq!(glossary.external_references().len(), 1);
        assert_eq!(glossary.external_references()[0].spec(), "vc-data-model");
        assert_eq!(glossary.external_references()[0].term(), "issuer");
    }

    #[test]
    fn test_empty_glossary() {
        assert!(Glossary::new().is_empty());
    }
}
