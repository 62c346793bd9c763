//! Grammar constants for the HRTDS format.
//!
//! Every structural character of the grammar lives here so the parser,
//! tokenizer, and composer agree on a single definition. These are fixed
//! format constants, not configuration.

/// Marks the beginning of the document body. Everything before the first
/// occurrence is ignored.
pub const BEGIN_FILE_SCOPE: &str = "${";

/// Marks the end of the document body. Everything after the last occurrence
/// is ignored.
pub const END_FILE_SCOPE: &str = "}$";

/// Keyword used as the identifier of a struct declaration: `&struct&Name:{...};`.
pub const STRUCT_KEYWORD: &str = "struct";

/// Opens a struct declaration scope.
pub const BEGIN_SCOPE: char = '{';
/// Closes a struct declaration scope.
pub const END_SCOPE: char = '}';

/// Opens an array literal.
pub const BEGIN_ARRAY: char = '[';
/// Closes an array literal, and also terminates the `[]` array marker on an
/// identifier (`&int[]&`).
pub const END_ARRAY: char = ']';

/// Opens a tuple (struct instance) literal.
pub const BEGIN_TUPLE: char = '(';
/// Closes a tuple literal.
pub const END_TUPLE: char = ')';

/// Wraps a type identifier: `&int&`, `&Point[]&`.
pub const IDENTIFIER: char = '&';
/// Separates a field name from its value.
pub const ASSIGNMENT: char = ':';
/// Terminates a top-level field or struct declaration.
pub const TERMINATOR: char = ';';
/// Separates list elements at every nesting level.
pub const LIST_SEPARATOR: char = ',';
/// Delimits a string literal. The format supports no escape sequences.
pub const QUOTE: char = '"';

/// The array marker suffix on identifiers.
pub const ARRAY_MARKER: &str = "[]";

/// Maximum bracket nesting depth the tokenizer will recurse into. Deeper
/// input is rejected instead of risking stack exhaustion.
pub const MAX_NESTING_DEPTH: usize = 128;
