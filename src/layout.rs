//! Struct shapes: ordered lists of typed, named fields.
//!
//! A [`StructureLayout`] is created once when a `&struct&Name:{...};`
//! declaration is parsed and is immutable afterwards. Element order is
//! significant: struct instances are written as *positional* tuples, so the
//! layout is what maps tuple positions back to field names and types.

use crate::convert::ConverterRegistry;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::ident::Identifier;
use crate::token::Token;
use serde::Serialize;

/// One declared field of a struct: its resolved type and its name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutElement {
    pub identifier: Identifier,
    pub name: String,
}

/// The ordered shape of a declared struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructureLayout {
    elements: Vec<LayoutElement>,
}

impl StructureLayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The element at `index`, in declaration order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LayoutElement> {
        self.elements.get(index)
    }

    /// The position of the field named `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.elements.iter().position(|element| element.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LayoutElement> {
        self.elements.iter()
    }

    /// Builds a layout from the Identifier/Declaring pairs of a tokenized
    /// struct scope, resolving each field type against the structs declared
    /// so far. A struct can therefore reference earlier structs but never
    /// itself or a later one.
    pub(crate) fn from_scope(
        children: &[Token],
        registry: &ConverterRegistry,
        document: &Document,
    ) -> Result<StructureLayout> {
        let mut layout = StructureLayout::new();

        for pair in children.chunks(2) {
            let [Token::Identifier(raw), Token::Declaring(name)] = pair else {
                return Err(Error::custom(
                    "a structure declaration expects '&Type&name' fields separated by commas",
                ));
            };

            let identifier = Identifier::determine(raw, registry, document)
                .ok_or_else(|| Error::unresolved_identifier(raw))?;

            layout.elements.push(LayoutElement {
                identifier,
                name: name.clone(),
            });
        }

        Ok(layout)
    }
}

impl<'a> IntoIterator for &'a StructureLayout {
    type Item = &'a LayoutElement;
    type IntoIter = std::slice::Iter<'a, LayoutElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::IdentifierKind;
    use crate::token::ValueToken;

    fn scope_children(text: &str) -> Vec<Token> {
        let (flat, bank) = crate::lexer::protect_strings(text).unwrap();
        let tokens = crate::token::tokenize(&flat, &bank).unwrap();
        match tokens.into_iter().nth(2) {
            Some(Token::Value(ValueToken::Scope(children))) => children,
            other => panic!("expected a scope token, found {other:?}"),
        }
    }

    #[test]
    fn builds_elements_in_declaration_order() {
        let registry = ConverterRegistry::new();
        let document = Document::new();
        let children = scope_children("&struct&V:{&float&Date,&int[]&Version,&string&Download};");

        let layout = StructureLayout::from_scope(&children, &registry, &document).unwrap();
        assert_eq!(layout.len(), 3);
        assert_eq!(layout.get(0).unwrap().name, "Date");
        assert_eq!(layout.get(1).unwrap().name, "Version");
        assert!(layout.get(1).unwrap().identifier.is_array());
        assert_eq!(layout.get(2).unwrap().name, "Download");
        assert_eq!(layout.position("Download"), Some(2));
        assert_eq!(layout.position("Missing"), None);
    }

    #[test]
    fn unresolved_field_types_are_rejected() {
        let registry = ConverterRegistry::new();
        let document = Document::new();
        let children = scope_children("&struct&V:{&Missing&Field};");

        assert!(matches!(
            StructureLayout::from_scope(&children, &registry, &document),
            Err(Error::UnresolvedIdentifier { .. })
        ));
    }

    #[test]
    fn struct_types_resolve_against_earlier_declarations() {
        let registry = ConverterRegistry::new();
        let mut document = Document::new();
        let inner = {
            let children = scope_children("&struct&P:{&int&X,&int&Y};");
            StructureLayout::from_scope(&children, &registry, &document).unwrap()
        };
        document.declare_structure("P", inner);

        let children = scope_children("&struct&L:{&P&Start,&P&End};");
        let layout = StructureLayout::from_scope(&children, &registry, &document).unwrap();
        assert_eq!(
            layout.get(0).unwrap().identifier.kind(),
            IdentifierKind::StructReference
        );
    }
}
