//! Lexing primitives: document-marker extraction, string protection, and
//! the bracket-depth separator scan.
//!
//! HRTDS tokenization is driven by structural characters (`&`, `:`, `;`,
//! `,`, brackets), so the lexer first moves every quoted string literal out
//! of the way. Each literal is appended to an ordered *string bank* and its
//! span in the text is replaced by the bank index, still wrapped in quotes:
//!
//! ```text
//! &string&Name:"A,B";   becomes   &string&Name:"0";   bank: ["A,B"]
//! ```
//!
//! Only after this substitution is whitespace stripped, which is why
//! whitespace inside literals survives. The tokenizer later restores
//! literals by their leading quote.

use crate::error::{Error, Result};
use crate::glyph;

/// Returns the document body between the first `${` and the last `}$`.
///
/// Both markers are required; content outside them is ignored. Further `$`
/// characters inside the body are in scope, which is why the end marker is
/// searched from the back.
pub fn extract_body(content: &str) -> Result<&str> {
    let begin = content
        .find(glyph::BEGIN_FILE_SCOPE)
        .ok_or_else(Error::missing_begin_marker)?
        + glyph::BEGIN_FILE_SCOPE.len();

    let end = content
        .rfind(glyph::END_FILE_SCOPE)
        .ok_or_else(Error::missing_end_marker)?;

    if end < begin {
        return Err(Error::missing_end_marker());
    }

    Ok(&content[begin..end])
}

/// Moves every quoted literal into a string bank, leaving `"<index>"` in its
/// place, then strips all remaining whitespace.
///
/// Returns the flattened text and the bank. Fails if an opening quote has no
/// matching closing quote.
pub fn protect_strings(body: &str) -> Result<(String, Vec<String>)> {
    let mut bank: Vec<String> = Vec::new();
    let mut flattened = String::with_capacity(body.len());

    let mut rest = body;
    while let Some(open) = rest.find(glyph::QUOTE) {
        flattened.push_str(&rest[..open]);

        let after_open = &rest[open + glyph::QUOTE.len_utf8()..];
        let close = after_open
            .find(glyph::QUOTE)
            .ok_or(Error::UnterminatedString)?;

        bank.push(after_open[..close].to_string());

        flattened.push(glyph::QUOTE);
        flattened.push_str(&(bank.len() - 1).to_string());
        flattened.push(glyph::QUOTE);

        rest = &after_open[close + glyph::QUOTE.len_utf8()..];
    }
    flattened.push_str(rest);

    flattened.retain(|c| !c.is_whitespace());
    Ok((flattened, bank))
}

/// Returns the byte positions of every list separator that sits at bracket
/// nesting depth 0 within `content`.
///
/// `{`, `[`, `(` raise the depth; `}`, `]`, `)` lower it. This is the single
/// primitive every recursive tokenizer routine splits on, so nested arrays
/// and tuples never leak separators into their parent list.
pub fn depth0_separators(content: &str) -> Vec<usize> {
    let mut separators = Vec::new();
    let mut depth: i32 = 0;
    for (position, current) in content.char_indices() {
        match current {
            glyph::BEGIN_SCOPE | glyph::BEGIN_ARRAY | glyph::BEGIN_TUPLE => depth += 1,
            glyph::END_SCOPE | glyph::END_ARRAY | glyph::END_TUPLE => depth -= 1,
            glyph::LIST_SEPARATOR => {
                if depth == 0 {
                    separators.push(position);
                }
            }
            _ => {}
        }
    }

    separators
}

/// Splits `content` on its depth-0 separators. An empty `content` yields no
/// elements, so `[]` and `()` are zero-length lists rather than lists of one
/// empty element.
pub fn split_depth0(content: &str) -> Vec<&str> {
    if content.is_empty() {
        return Vec::new();
    }

    let mut elements = Vec::new();
    let mut cursor = 0;
    for separator in depth0_separators(content) {
        elements.push(&content[cursor..separator]);
        cursor = separator + glyph::LIST_SEPARATOR.len_utf8();
    }
    elements.push(&content[cursor..]);

    elements
}
