//! HRTDS Format Specification
//!
//! This module documents the HRTDS (Human-Readable Typed Data
//! Serialization) format as implemented by this library.
//!
//! # Overview
//!
//! HRTDS is a statically-typed text format sitting structurally between
//! TOML and a schema'd binary protocol: a document declares named struct
//! layouts, then fields typed as a builtin scalar, a previously declared
//! struct, or a homogeneous array of either.
//!
//! # Document markers
//!
//! The document body must sit between `${` and `}$`:
//!
//! ```text
//! ${
//!     &int& Age : 32;
//! }$
//! ```
//!
//! The begin marker is located by first occurrence, the end marker by last
//! occurrence. Both are required; an unterminated document is a hard error.
//! There is no escaping of `${` or `}$` inside the body.
//!
//! # Fields
//!
//! ```text
//! &TypeName[]& FieldName : VALUE;
//! ```
//!
//! - the type identifier is wrapped in `&` markers; a trailing `[]` marks
//!   an array
//! - `:` separates the field name from its value
//! - `;` terminates the field
//! - `TypeName` is either a builtin or a struct declared *earlier* in the
//!   document; forward references do not resolve
//!
//! # Struct declarations
//!
//! ```text
//! &struct& Version : {
//!     &float& Date,
//!     &int[]& Numbers,
//!     &string& Download
//! };
//! ```
//!
//! Declaration elements are comma-separated with no per-element terminator,
//! unlike top-level fields. A struct may reference structs declared before
//! it, but not itself and not later ones. Redeclaring a name replaces the
//! earlier layout (last-write-wins).
//!
//! # Value literals
//!
//! | Shape | Syntax | Example |
//! |-------|--------|---------|
//! | Scalar | raw text or quoted string | `32`, `"A, B"` |
//! | Array | `[v1, v2, ...]` | `[1, 2, 3]` |
//! | Struct instance ("tuple") | `(v1, v2, ...)` | `(0, 0)` |
//!
//! Tuples are positional: element order matches the declared struct's field
//! order, and the element count must match the layout exactly.
//!
//! # Builtin scalar types
//!
//! `bool`, `string`, `int8`, `int16`, `int32`, `int64`, `uint8`, `uint16`,
//! `uint32`, `uint64`, `float`, `double`, plus the aliases `int` (`int32`)
//! and `uint` (`uint32`).
//!
//! Integral decoding saturates: out-of-range numeric text clamps to the
//! type's min/max. Only non-numeric text is a conversion error.
//!
//! # Strings
//!
//! String literals are wrapped in `"` quotes and support **no escape
//! sequences**; a literal cannot contain a quote. Everything else,
//! including structural characters (`,`, `:`, `;`, `&`, brackets) and
//! whitespace, is preserved exactly.
//!
//! # Composition
//!
//! Composing a parsed document renders struct declarations first, then
//! fields, in their original orders. Lists of scalars stay on one line;
//! struct-typed arrays, and lists containing composite children, expand
//! across multiple tab-indented lines. Composed output re-parses to a
//! structurally identical document; exact whitespace of the source is not
//! preserved.
//!
//! # Limitations
//!
//! - no unions, optional fields, references/aliases, or versioned schemas
//! - no comments
//! - no streaming parse; the whole document is read, parsed, discarded
//! - documents are not safe for concurrent mutation

// This module contains only documentation; no implementation code
