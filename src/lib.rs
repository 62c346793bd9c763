//! # hrtds
//!
//! Parser and composer for HRTDS, a human-readable, statically-typed data
//! serialization format.
//!
//! ## What is HRTDS?
//!
//! An HRTDS document declares named **struct layouts** and then **fields**,
//! each typed as a builtin scalar, a previously declared struct, or a
//! homogeneous array of either:
//!
//! ```text
//! ${
//!     &struct& Point : {
//!         &int& X,
//!         &int& Y
//!     };
//!
//!     &string& Name : "origin marker";
//!     &Point& Origin : (0, 0);
//!     &Point[]& Path : [(1, 2), (3, 4)];
//! }$
//! ```
//!
//! Types are checked while parsing: tuple arity must match the struct
//! layout, array elements share the declared element type, and struct names
//! must be declared before use.
//!
//! ## Quick Start
//!
//! ```rust
//! let document = hrtds::from_str(
//!     "${ &struct&P:{&int&X,&int&Y}; &P&Origin:(3,4); &int[]&Nums:[1,2,3]; }$",
//! ).unwrap();
//!
//! assert_eq!(document["Origin"]["X"].as_i64(), Some(3));
//! assert_eq!(document["Nums"][2].as_i64(), Some(3));
//!
//! // Compose back to grammar-conformant text; the output re-parses to a
//! // structurally identical document.
//! let text = hrtds::to_string(&document).unwrap();
//! let reparsed = hrtds::from_str(&text).unwrap();
//! assert_eq!(document, reparsed);
//! ```
//!
//! ## Custom scalar types
//!
//! The builtin scalars (`bool`, `string`, sized integers, `float`,
//! `double`) live in a [`ConverterRegistry`]. New scalar types are
//! registered before the first parse and flow through the core untouched;
//! see the [`convert`] module for a worked example.
//!
//! ## Concurrency
//!
//! Parsing and composing are pure, synchronous call-stack recursions.
//! Build the registry once at startup; a [`Document`] is not safe for
//! concurrent mutation.

pub mod convert;
pub mod document;
pub mod error;
pub mod format;
pub mod glyph;
pub mod ident;
pub mod layout;
pub mod lexer;
pub mod ser;
pub mod token;
pub mod value;

pub use convert::{Converter, ConverterRegistry};
pub use document::Document;
pub use error::{Error, Result};
pub use ident::{Identifier, IdentifierKind};
pub use layout::{LayoutElement, StructureLayout};
pub use value::{CustomScalar, Scalar, Value};

use std::io;

/// Parses HRTDS text into a [`Document`] using the builtin converter
/// registry.
///
/// # Errors
///
/// Returns an error for any structural, semantic, or conversion failure;
/// no partial document is ever produced.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(text: &str) -> Result<Document> {
    Document::parse(text, &ConverterRegistry::new())
}

/// Parses HRTDS text with an explicit converter registry, for documents
/// using registry-added scalar types.
///
/// # Errors
///
/// Returns an error for any structural, semantic, or conversion failure.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with(text: &str, registry: &ConverterRegistry) -> Result<Document> {
    Document::parse(text, registry)
}

/// Reads a full HRTDS document from a reader and parses it with the builtin
/// converter registry.
///
/// There is no streaming parse; the reader is drained before parsing
/// begins.
///
/// # Errors
///
/// Returns an error if reading fails, the bytes are not valid UTF-8, or
/// the text does not parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R: io::Read>(mut reader: R) -> Result<Document> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|err| Error::io(&err.to_string()))?;
    from_str(&text)
}

/// Composes a [`Document`] back to HRTDS text using the builtin converter
/// registry.
///
/// # Errors
///
/// Returns an error only for a malformed value tree, which indicates a
/// programming error rather than bad input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(document: &Document) -> Result<String> {
    document.compose(&ConverterRegistry::new())
}

/// Composes a [`Document`] with an explicit converter registry.
///
/// # Errors
///
/// Returns an error only for a malformed value tree.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with(document: &Document, registry: &ConverterRegistry) -> Result<String> {
    document.compose(registry)
}

/// Composes a [`Document`] and writes the text to a writer.
///
/// # Errors
///
/// Returns an error if composition or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W: io::Write>(mut writer: W, document: &Document) -> Result<()> {
    let text = to_string(document)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|err| Error::io(&err.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn from_str_and_to_string_round_trip() {
        let document = from_str("${ &int&Age:32; &string&Name:\"A,B\"; }$").unwrap();
        assert_eq!(document["Age"].as_i64(), Some(32));
        assert_eq!(document["Name"].as_str(), Some("A,B"));

        let text = to_string(&document).unwrap();
        let reparsed = from_str(&text).unwrap();
        assert_eq!(document, reparsed);
    }

    #[test]
    fn from_reader_drains_the_reader() {
        let cursor = Cursor::new(b"${ &bool&Flag:true; }$".to_vec());
        let document = from_reader(cursor).unwrap();
        assert_eq!(document["Flag"].as_bool(), Some(true));
    }

    #[test]
    fn to_writer_writes_composed_text() {
        let document = from_str("${ &int&Age:32; }$").unwrap();
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &document).unwrap();

        let reparsed = from_str(std::str::from_utf8(&buffer).unwrap()).unwrap();
        assert_eq!(document, reparsed);
    }
}
