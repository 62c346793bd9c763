//! Error types for HRTDS parsing and composition.
//!
//! All errors are reported immediately and abort the current parse or
//! compose call; no partial [`Document`](crate::Document) is ever produced.
//!
//! ## Error Categories
//!
//! - **Structural**: missing document markers, missing delimiters,
//!   unterminated strings, excessive nesting
//! - **Semantic**: unresolved identifiers, tuple arity mismatches,
//!   struct scopes in illegal positions, literal shapes that do not match
//!   the declared type
//! - **Conversion**: scalar text that cannot be decoded as its declared
//!   builtin type (out-of-range integral text is *not* an error; it
//!   saturates)

use std::fmt;
use thiserror::Error;

/// Represents every error the HRTDS parser, composer, or converter registry
/// can produce.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A required document marker (`${` or `}$`) was not found
    #[error("the document needs a '{marker}' to mark the {position} of the body")]
    MissingMarker {
        marker: &'static str,
        position: &'static str,
    },

    /// An opening quote without a matching closing quote
    #[error("unterminated string literal: an opening quote needs a matching closing quote")]
    UnterminatedString,

    /// A structural delimiter expected by the grammar was not found
    #[error("expected '{expected}' while reading {construct} near '{context}'")]
    MissingDelimiter {
        expected: char,
        construct: &'static str,
        context: String,
    },

    /// A struct scope appeared inside an array or tuple literal
    #[error("a struct scope cannot appear inside an array or tuple; struct instances are written as tuples '(...)'")]
    ScopeInList,

    /// A scope literal followed an identifier other than the `struct` keyword
    #[error("a scope literal '{{...}}' may only follow the 'struct' keyword, found identifier '{name}'")]
    StrayScope { name: String },

    /// Bracket nesting deeper than the supported bound
    #[error("bracket nesting exceeds the supported depth of {limit}")]
    DepthLimit { limit: usize },

    /// An identifier that names neither a builtin type nor a previously
    /// declared struct
    #[error("unrecognized identifier '{name}': custom structs must be declared before use")]
    UnresolvedIdentifier { name: String },

    /// A tuple literal whose element count does not match its struct layout
    #[error("tuple for struct '{name}' has {found} element(s), but its layout declares {expected}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// A value literal whose bracket kind does not match the declared type
    #[error("value for type '{type_name}' must be {expected}, found {found}")]
    ValueShape {
        type_name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Scalar text that cannot be decoded as its declared type
    #[error("cannot decode '{text}' as '{type_name}': {reason}")]
    Conversion {
        type_name: String,
        text: String,
        reason: String,
    },

    /// A converter was handed a scalar it does not encode. This indicates a
    /// malformed value tree, which is a programming error rather than an
    /// input error.
    #[error("converter for '{type_name}' cannot encode a {found} scalar")]
    Encode {
        type_name: String,
        found: &'static str,
    },

    /// Generic message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a missing-marker error for the document begin marker.
    pub(crate) fn missing_begin_marker() -> Self {
        Error::MissingMarker {
            marker: crate::glyph::BEGIN_FILE_SCOPE,
            position: "beginning",
        }
    }

    /// Creates a missing-marker error for the document end marker.
    pub(crate) fn missing_end_marker() -> Self {
        Error::MissingMarker {
            marker: crate::glyph::END_FILE_SCOPE,
            position: "end",
        }
    }

    /// Creates a missing-delimiter error, truncating the context to keep the
    /// message readable.
    pub(crate) fn missing_delimiter(
        expected: char,
        construct: &'static str,
        context: &str,
    ) -> Self {
        let context = if context.chars().count() > 40 {
            let mut truncated: String = context.chars().take(40).collect();
            truncated.push_str("...");
            truncated
        } else {
            context.to_string()
        };
        Error::MissingDelimiter {
            expected,
            construct,
            context,
        }
    }

    /// Creates an unresolved-identifier error.
    pub fn unresolved_identifier(name: &str) -> Self {
        Error::UnresolvedIdentifier {
            name: name.to_string(),
        }
    }

    /// Creates a tuple arity-mismatch error.
    pub fn arity_mismatch(name: &str, expected: usize, found: usize) -> Self {
        Error::ArityMismatch {
            name: name.to_string(),
            expected,
            found,
        }
    }

    /// Creates a conversion error for scalar text that failed to decode.
    pub fn conversion<R: fmt::Display>(type_name: &str, text: &str, reason: R) -> Self {
        Error::Conversion {
            type_name: type_name.to_string(),
            text: text.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
