//! Parsed template-tag directives.
//!
//! A directive is the `[[kind: args]]` syntax embedded in Markdown text.
//! The scanner produces one [`Directive`] per well-formed tag, in source
//! order, each carrying the span of the full `[[...]]` region.

/// The kind keyword of a directive tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// `[[def: term]]` or `[[def: term, alias]]`
    Def,
    /// `[[ref: term]]`
    Ref,
    /// `[[tref: spec, term]]`
    Tref,
    /// `[[xref: spec, term]]`
    Xref,
}

impl DirectiveKind {
    /// Maps a kind keyword to its variant. Unknown keywords return `None`
    /// and the scanner leaves the tag verbatim.
    ///
    /// `xtref` is the historical spelling of `xref` and maps to the same
    /// variant.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "def" => Some(Self::Def),
            "ref" => Some(Self::Ref),
            "tref" => Some(Self::Tref),
            "xref" | "xtref" => Some(Self::Xref),
            _ => None,
        }
    }

    /// The keyword as written in source.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Def => "def",
            Self::Ref => "ref",
            Self::Tref => "tref",
            Self::Xref => "xref",
        }
    }
}

/// A single well-formed directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Defines a term at this point in the document.
    Def {
        /// Canonical term text.
        term: String,
        /// Optional display alias.
        alias: Option<String>,
    },

    /// References a term defined in this document.
    Ref {
        /// The referenced term.
        term: String,
    },

    /// References a term defined in an external specification.
    Tref {
        /// External specification identifier.
        spec: String,
        /// The referenced term.
        term: String,
    },

    /// Cross-references a term in an external specification.
    Xref {
        /// External specification identifier.
        spec: String,
        /// The referenced term.
        term: String,
    },
}

impl Directive {
    /// The kind of this directive.
    pub fn kind(&self) -> DirectiveKind {
        match self {
            Self::Def { .. } => DirectiveKind::Def,
            Self::Ref { .. } => DirectiveKind::Ref,
            Self::Tref { .. } => DirectiveKind::Tref,
            Self::Xref { .. } => DirectiveKind::Xref,
        }
    }

    /// The term this directive defines or references.
    pub fn term(&self) -> &str {
        match self {
            Self::Def { term, .. }
            | Self::Ref { term }
            | Self::Tref { term, .. }
            | Self::Xref { term, .. } => term,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_keyword() {
        assert_eq!(DirectiveKind::from_keyword("def"), Some(DirectiveKind::Def));
        assert_eq!(DirectiveKind::from_keyword("ref"), Some(DirectiveKind::Ref));
        assert_eq!(
            DirectiveKind::from_keyword("tref"),
            Some(DirectiveKind::Tref)
        );
        assert_eq!(
            DirectiveKind::from_keyword("xref"),
            Some(DirectiveKind::Xref)
        );
        assert_eq!(DirectiveKind::from_keyword("insert"), None);
    }

    #[test]
    fn test_keyword_round_trip() {
        for kind in [
            DirectiveKind::Def,
            DirectiveKind::Ref,
            DirectiveKind::Tref,
            DirectiveKind::Xref,
        ] {
            assert_eq!(DirectiveKind::from_keyword(kind.keyword()), Some(kind));
        }
    }

    #[test]
    fn test_directive_term_accessor() {
        let def = Directive::Def {
            term: "claim".to_string(),
            alias: None,
        };
        assert_eq!(def.term(), "claim");
        assert_eq!(def.kind(), DirectiveKind::Def);

        let tref = Directive::Tref {
            spec: "vc".to_string(),
            term: "issuer".to_string(),
        };
        assert_eq!(tref.term(), "issuer");
    }
}
