//! Tokenization: turning flat, whitespace-stripped text into a typed token
//! tree.
//!
//! The first pass walks the top level of the document and cuts it into
//! repeating `[Identifier][Defining][Value]` triples:
//!
//! ```text
//! &int[]&Nums:[1,2,3];
//!  ^^^^^ ^^^^ ^^^^^^^
//!  ident  name  value
//! ```
//!
//! The second pass classifies each value by its first character (`{` scope,
//! `[` array, `(` tuple, anything else data) and recurses into composite
//! literals by splitting on depth-0 separators. Scopes may only appear at
//! the top level; struct *instances* inside arrays and tuples are written as
//! tuples.
//!
//! Tokens are a transient intermediate representation: they are consumed by
//! [`Document::parse`](crate::Document::parse) and discarded.

use crate::error::{Error, Result};
use crate::glyph;
use crate::lexer;

/// A top-level token. The tokenizer emits these in
/// `[Identifier][Defining][Value]` triples; scope bodies contain
/// `[Identifier][Declaring]` pairs.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// The text between two `&` markers: a type name, possibly with a
    /// trailing `[]`.
    Identifier(String),
    /// A field name being defined at the top level (`&...&name:`).
    Defining(String),
    /// A field name being declared inside a struct scope (`&...&name,`).
    Declaring(String),
    /// A value literal.
    Value(ValueToken),
}

/// A classified value literal.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueToken {
    /// `{...}`: a struct declaration body, holding Identifier/Declaring
    /// pairs.
    Scope(Vec<Token>),
    /// `[...]`: an array literal.
    Array(Vec<ValueToken>),
    /// `(...)`: a tuple (struct instance) literal.
    Tuple(Vec<ValueToken>),
    /// A leaf payload: raw scalar text, with banked string literals already
    /// restored.
    Data(String),
}

impl ValueToken {
    /// Human-readable literal kind, used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            ValueToken::Scope(_) => "a scope literal '{...}'",
            ValueToken::Array(_) => "an array literal '[...]'",
            ValueToken::Tuple(_) => "a tuple literal '(...)'",
            ValueToken::Data(_) => "raw scalar text",
        }
    }
}

/// Tokenizes the flattened document body produced by the lexer.
///
/// `bank` is the ordered string bank from
/// [`lexer::protect_strings`]; banked literals are restored into
/// [`ValueToken::Data`] payloads here.
pub fn tokenize(content: &str, bank: &[String]) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();

    let mut cursor = 0;
    while cursor < content.len() {
        let rest = &content[cursor..];

        // [Identifier] (&...&)
        let identifier_begin = rest.find(glyph::IDENTIFIER).ok_or_else(|| {
            Error::missing_delimiter(glyph::IDENTIFIER, "a field identifier", rest)
        })? + 1;
        let identifier_end = rest[identifier_begin..]
            .find(glyph::IDENTIFIER)
            .map(|found| found + identifier_begin)
            .ok_or_else(|| {
                Error::missing_delimiter(glyph::IDENTIFIER, "a field identifier", rest)
            })?;
        let identifier = &rest[identifier_begin..identifier_end];

        // [Defining] (&...:)
        let defining_begin = identifier_end + 1;
        let defining_end = rest[defining_begin..]
            .find(glyph::ASSIGNMENT)
            .map(|found| found + defining_begin)
            .ok_or_else(|| Error::missing_delimiter(glyph::ASSIGNMENT, "a field name", rest))?;
        let defining = &rest[defining_begin..defining_end];

        // [Value] (:...;)
        let value_begin = defining_end + 1;
        let value_end = rest[value_begin..]
            .find(glyph::TERMINATOR)
            .map(|found| found + value_begin)
            .ok_or_else(|| Error::missing_delimiter(glyph::TERMINATOR, "a field value", rest))?;
        let value = tokenize_value(&rest[value_begin..value_end], bank, 0, true)?;

        tokens.reserve(3);
        tokens.push(Token::Identifier(identifier.to_string()));
        tokens.push(Token::Defining(defining.to_string()));
        tokens.push(Token::Value(value));

        cursor += value_end + 1;
    }

    Ok(tokens)
}

/// Classifies one value literal by its first character and recurses into
/// composite literals.
fn tokenize_value(
    content: &str,
    bank: &[String],
    depth: usize,
    scope_allowed: bool,
) -> Result<ValueToken> {
    if depth > glyph::MAX_NESTING_DEPTH {
        return Err(Error::DepthLimit {
            limit: glyph::MAX_NESTING_DEPTH,
        });
    }

    match content.chars().next() {
        Some(glyph::BEGIN_SCOPE) => {
            if !scope_allowed {
                return Err(Error::ScopeInList);
            }
            tokenize_scope(inner(content, glyph::END_SCOPE, "a struct scope")?)
        }
        Some(glyph::BEGIN_ARRAY) => {
            let elements = tokenize_list(
                inner(content, glyph::END_ARRAY, "an array literal")?,
                bank,
                depth,
            )?;
            Ok(ValueToken::Array(elements))
        }
        Some(glyph::BEGIN_TUPLE) => {
            let elements = tokenize_list(
                inner(content, glyph::END_TUPLE, "a tuple literal")?,
                bank,
                depth,
            )?;
            Ok(ValueToken::Tuple(elements))
        }
        _ => tokenize_data(content, bank),
    }
}

/// Strips the opening bracket and the expected closing bracket, failing if
/// the literal is not closed by `close`.
fn inner<'a>(content: &'a str, close: char, construct: &'static str) -> Result<&'a str> {
    let body = &content[1..];
    body.strip_suffix(close)
        .ok_or_else(|| Error::missing_delimiter(close, construct, content))
}

/// Tokenizes a struct scope body: depth-0-separated `&Type&name` pairs.
fn tokenize_scope(content: &str) -> Result<ValueToken> {
    let mut children = Vec::new();
    for element in lexer::split_depth0(content) {
        // [Identifier] (&...&)
        let identifier_begin = element.find(glyph::IDENTIFIER).ok_or_else(|| {
            Error::missing_delimiter(glyph::IDENTIFIER, "a declared field", element)
        })? + 1;
        let identifier_end = element[identifier_begin..]
            .find(glyph::IDENTIFIER)
            .map(|found| found + identifier_begin)
            .ok_or_else(|| {
                Error::missing_delimiter(glyph::IDENTIFIER, "a declared field", element)
            })?;

        // [Declaring] (&...,)
        let declaring = &element[identifier_end + 1..];

        children.reserve(2);
        children.push(Token::Identifier(
            element[identifier_begin..identifier_end].to_string(),
        ));
        children.push(Token::Declaring(declaring.to_string()));
    }

    Ok(ValueToken::Scope(children))
}

/// Tokenizes the comma-separated elements of an array or tuple body.
fn tokenize_list(content: &str, bank: &[String], depth: usize) -> Result<Vec<ValueToken>> {
    lexer::split_depth0(content)
        .into_iter()
        .map(|element| tokenize_value(element, bank, depth + 1, false))
        .collect()
}

/// Base case: a leaf payload. Banked string literals (left behind as
/// `"<index>"` by the lexer) are restored to their original text.
fn tokenize_data(content: &str, bank: &[String]) -> Result<ValueToken> {
    let Some(reference) = content
        .strip_prefix(glyph::QUOTE)
        .and_then(|body| body.strip_suffix(glyph::QUOTE))
    else {
        return Ok(ValueToken::Data(content.to_string()));
    };

    let index: usize = reference
        .parse()
        .map_err(|_| Error::custom(format!("corrupt string bank reference '{content}'")))?;
    let restored = bank
        .get(index)
        .ok_or_else(|| Error::custom(format!("corrupt string bank reference '{content}'")))?;

    Ok(ValueToken::Data(restored.clone()))
}
