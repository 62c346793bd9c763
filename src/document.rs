//! The document root: named struct layouts and named field values.
//!
//! A [`Document`] owns two insertion-ordered maps, one from struct name to
//! [`StructureLayout`] and one from field name to [`Value`]. Both orders are
//! preserved so [`Document::compose`] can render declarations before the
//! fields that use them. The maps are `IndexMap`s rather than `HashMap`s
//! for exactly this reason.
//!
//! Parsing is single-threaded and synchronous: the whole document text is
//! handed in, lexed, tokenized, and walked in one pass. Redeclaring a
//! struct name or redefining a field name is last-write-wins, not an error.

use crate::convert::ConverterRegistry;
use crate::error::{Error, Result};
use crate::glyph;
use crate::layout::StructureLayout;
use crate::lexer;
use crate::token::{self, Token, ValueToken};
use crate::value::Value;
use indexmap::IndexMap;
use std::ops;

/// A parsed HRTDS document.
///
/// Created empty, populated by [`Document::parse`], and read-only
/// afterwards. Not safe for concurrent mutation; callers needing shared
/// access must serialize externally.
#[derive(Debug, Default, PartialEq)]
pub struct Document {
    structures: IndexMap<String, StructureLayout>,
    fields: IndexMap<String, Value>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a struct layout under `name`. Redeclaring an existing name
    /// replaces the layout (last-write-wins).
    pub fn declare_structure(&mut self, name: &str, layout: StructureLayout) {
        self.structures.insert(name.to_string(), layout);
    }

    /// The layout declared under `name`.
    #[must_use]
    pub fn structure(&self, name: &str) -> Option<&StructureLayout> {
        self.structures.get(name)
    }

    /// The declared structs, in declaration order.
    pub fn structures(&self) -> indexmap::map::Iter<'_, String, StructureLayout> {
        self.structures.iter()
    }

    /// Stores a field value under `name`. Redefining an existing name
    /// replaces the value (last-write-wins).
    pub fn define_field(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }

    /// The field defined under `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The defined fields, in definition order.
    pub fn fields(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.fields.iter()
    }

    /// `true` when the document holds no structs and no fields. An empty
    /// body between the markers parses to an empty document.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.structures.is_empty() && self.fields.is_empty()
    }

    /// Parses document text into a `Document`.
    ///
    /// The text is lexed (markers, string protection, whitespace strip),
    /// tokenized, and walked as `[Identifier][Defining][Value]` triples:
    /// a scope value declares a struct, anything else defines a field. Any
    /// error aborts the parse; no partial document is returned.
    pub fn parse(content: &str, registry: &ConverterRegistry) -> Result<Document> {
        let body = lexer::extract_body(content)?;
        let (flattened, bank) = lexer::protect_strings(body)?;
        let tokens = token::tokenize(&flattened, &bank)?;

        let mut document = Document::new();
        for triple in tokens.chunks(3) {
            let [Token::Identifier(raw), Token::Defining(name), Token::Value(value_token)] = triple
            else {
                return Err(Error::custom(
                    "a field expects an identifier, a defining name, and a value, in that order",
                ));
            };

            match value_token {
                ValueToken::Scope(children) => {
                    if raw != glyph::STRUCT_KEYWORD {
                        return Err(Error::StrayScope { name: raw.clone() });
                    }
                    let layout = StructureLayout::from_scope(children, registry, &document)?;
                    document.declare_structure(name, layout);
                }
                other => {
                    if raw == glyph::STRUCT_KEYWORD {
                        return Err(Error::ValueShape {
                            type_name: glyph::STRUCT_KEYWORD.to_string(),
                            expected: "a scope literal '{...}'",
                            found: other.kind_name(),
                        });
                    }
                    let identifier = crate::Identifier::determine(raw, registry, &document)
                        .ok_or_else(|| Error::unresolved_identifier(raw))?;
                    let value = Value::build(identifier, other, registry, &document)?;
                    document.define_field(name, value);
                }
            }
        }

        Ok(document)
    }

    /// Renders the document back to grammar-conformant text: struct
    /// declarations first, in declaration order, then fields in definition
    /// order. The output is re-parseable into a structurally equal
    /// document; whitespace need not match the original input.
    pub fn compose(&self, registry: &ConverterRegistry) -> Result<String> {
        let mut composed = String::new();
        composed.push_str(glyph::BEGIN_FILE_SCOPE);
        composed.push('\n');

        for (name, layout) in &self.structures {
            composed.push('\t');
            composed.push(glyph::IDENTIFIER);
            composed.push_str(glyph::STRUCT_KEYWORD);
            composed.push(glyph::IDENTIFIER);
            composed.push(' ');
            composed.push_str(name);
            composed.push(' ');
            composed.push(glyph::ASSIGNMENT);
            composed.push(' ');
            composed.push(glyph::BEGIN_SCOPE);

            let last = layout.len().saturating_sub(1);
            for (index, element) in layout.iter().enumerate() {
                composed.push_str("\n\t\t");
                composed.push(glyph::IDENTIFIER);
                composed.push_str(&element.identifier.to_string());
                composed.push(glyph::IDENTIFIER);
                composed.push(' ');
                composed.push_str(&element.name);
                if index != last {
                    composed.push(glyph::LIST_SEPARATOR);
                }
            }

            composed.push_str("\n\t");
            composed.push(glyph::END_SCOPE);
            composed.push(glyph::TERMINATOR);
            composed.push_str("\n\n");
        }

        for (name, value) in &self.fields {
            composed.push('\t');
            composed.push(glyph::IDENTIFIER);
            composed.push_str(&value.identifier().to_string());
            composed.push(glyph::IDENTIFIER);
            composed.push(' ');
            composed.push_str(name);
            composed.push(' ');
            composed.push(glyph::ASSIGNMENT);
            composed.push(' ');
            composed.push_str(&value.compose(registry, 1)?);
            composed.push(glyph::TERMINATOR);
            composed.push('\n');
        }

        composed.push('\n');
        composed.push_str(glyph::END_FILE_SCOPE);
        Ok(composed)
    }
}

impl ops::Index<&str> for Document {
    type Output = Value;

    /// Field access by name. Panics when the field is not defined; use
    /// [`Document::field`] for a checked lookup.
    fn index(&self, name: &str) -> &Value {
        self.field(name)
            .unwrap_or_else(|| panic!("no field named '{name}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ConverterRegistry {
        ConverterRegistry::new()
    }

    #[test]
    fn parses_scalar_fields() {
        let document = Document::parse("${ &int&Age:32; &string&Name:\"A,B\"; }$", &registry())
            .unwrap();

        assert_eq!(document["Age"].as_i64(), Some(32));
        assert_eq!(document["Name"].as_str(), Some("A,B"));
    }

    #[test]
    fn parses_struct_declarations_and_instances() {
        let document =
            Document::parse("${ &struct&P:{&int&X,&int&Y}; &P&Origin:(0,0); }$", &registry())
                .unwrap();

        assert_eq!(document.structure("P").unwrap().len(), 2);
        assert_eq!(document["Origin"]["X"].as_i64(), Some(0));
        assert_eq!(document["Origin"]["Y"].as_i64(), Some(0));
    }

    #[test]
    fn empty_body_is_a_valid_empty_document() {
        let document = Document::parse("${ }$", &registry()).unwrap();
        assert!(document.is_empty());
    }

    #[test]
    fn forward_struct_references_are_rejected() {
        let result = Document::parse("${ &P&Origin:(0,0); &struct&P:{&int&X,&int&Y}; }$", &registry());
        assert!(matches!(result, Err(Error::UnresolvedIdentifier { .. })));
    }

    #[test]
    fn redeclaring_a_struct_is_last_write_wins() {
        let document = Document::parse(
            "${ &struct&P:{&int&X,&int&Y}; &struct&P:{&int&X}; &P&Origin:(1); }$",
            &registry(),
        )
        .unwrap();

        assert_eq!(document.structure("P").unwrap().len(), 1);
        assert_eq!(document["Origin"]["X"].as_i64(), Some(1));
    }

    #[test]
    fn scope_requires_the_struct_keyword() {
        let result = Document::parse("${ &int&P:{&int&X}; }$", &registry());
        assert!(matches!(result, Err(Error::StrayScope { .. })));

        let result = Document::parse("${ &struct&P:42; }$", &registry());
        assert!(matches!(result, Err(Error::ValueShape { .. })));
    }

    #[test]
    fn composes_the_canonical_layout() {
        let document = Document::parse("${ &int&Age:32; }$", &registry()).unwrap();
        let composed = document.compose(&registry()).unwrap();
        assert_eq!(composed, "${\n\t&int& Age : 32;\n\n}$");
    }

    #[test]
    fn compose_round_trips_struct_documents() {
        let text = "${ &struct&P:{&int&X,&int[]&Ys}; &P&Field:(1,[2,3]); }$";
        let first = Document::parse(text, &registry()).unwrap();
        let composed = first.compose(&registry()).unwrap();
        let second = Document::parse(&composed, &registry()).unwrap();
        assert_eq!(first, second);
    }
}
