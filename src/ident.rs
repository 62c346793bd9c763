//! Type identifiers and their resolution.
//!
//! An [`Identifier`] is the resolved type descriptor of a field: either a
//! builtin scalar known to the [`ConverterRegistry`] or a reference to a
//! struct already declared in the [`Document`]. A trailing `[]` marks an
//! array of that type.
//!
//! Resolution is one-pass and forward-reference-free: a struct must be
//! declared before its name can resolve. Builtins are looked up first, so a
//! struct cannot shadow a builtin type name; this is format policy.

use crate::convert::ConverterRegistry;
use crate::document::Document;
use crate::glyph;
use serde::Serialize;
use std::fmt;

/// Whether an identifier names a builtin scalar type or a declared struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IdentifierKind {
    /// A scalar type registered in the converter registry.
    Builtin,
    /// A reference to a previously declared struct, instantiated as a tuple.
    StructReference,
}

/// The resolved type descriptor of a field.
///
/// Immutable once constructed; copied by value into layouts and values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    kind: IdentifierKind,
    name: String,
    is_array: bool,
}

impl Identifier {
    /// Resolves raw identifier text (`int`, `int[]`, `Point`, `Point[]`)
    /// against the registry's builtin types and the document's already
    /// declared structs.
    ///
    /// Returns `None` when the name matches neither; callers turn that into
    /// an [`UnresolvedIdentifier`](crate::Error::UnresolvedIdentifier)
    /// error naming the raw text.
    pub fn determine(
        raw: &str,
        registry: &ConverterRegistry,
        document: &Document,
    ) -> Option<Identifier> {
        let (name, is_array) = match raw.strip_suffix(glyph::ARRAY_MARKER) {
            Some(stripped) => (stripped, true),
            None => (raw, false),
        };

        // Builtins take precedence, so a struct cannot shadow a builtin name.
        let kind = if registry.contains(name) {
            IdentifierKind::Builtin
        } else if document.structure(name).is_some() {
            IdentifierKind::StructReference
        } else {
            return None;
        };

        Some(Identifier {
            kind,
            name: name.to_string(),
            is_array,
        })
    }

    /// The element identifier of an array: same type, array flag cleared.
    pub fn element(&self) -> Identifier {
        Identifier {
            kind: self.kind,
            name: self.name.clone(),
            is_array: false,
        }
    }

    pub const fn kind(&self) -> IdentifierKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn is_array(&self) -> bool {
        self.is_array
    }

    /// `true` for arrays and struct references, whose values hold children
    /// rather than a scalar.
    pub const fn is_composite(&self) -> bool {
        self.is_array || matches!(self.kind, IdentifierKind::StructReference)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.is_array {
            write!(f, "{}", glyph::ARRAY_MARKER)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_builtins_and_array_markers() {
        let registry = ConverterRegistry::new();
        let document = Document::new();

        let identifier = Identifier::determine("int32", &registry, &document).unwrap();
        assert_eq!(identifier.kind(), IdentifierKind::Builtin);
        assert_eq!(identifier.name(), "int32");
        assert!(!identifier.is_array());

        let identifier = Identifier::determine("string[]", &registry, &document).unwrap();
        assert_eq!(identifier.kind(), IdentifierKind::Builtin);
        assert_eq!(identifier.name(), "string");
        assert!(identifier.is_array());
        assert_eq!(identifier.to_string(), "string[]");
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        let registry = ConverterRegistry::new();
        let document = Document::new();
        assert!(Identifier::determine("Point", &registry, &document).is_none());
    }

    #[test]
    fn element_clears_the_array_flag() {
        let registry = ConverterRegistry::new();
        let document = Document::new();

        let array = Identifier::determine("double[]", &registry, &document).unwrap();
        let element = array.element();
        assert!(!element.is_array());
        assert_eq!(element.name(), "double");
        assert_eq!(element.kind(), IdentifierKind::Builtin);
    }
}
