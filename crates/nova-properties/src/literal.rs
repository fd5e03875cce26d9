use std::fmt;
use std::fmt::Write as _;
use std::ops::Range;

use crate::text_block::{is_java_whitespace, strip_indent, strip_trailing_spaces};

const TEXT_BLOCK_DELIMITER: &str = "\"\"\"";

/// The two source forms of a Java string literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiteralKind {
    /// `"..."`
    Quoted,
    /// `"""` + line terminator + content + `"""`
    TextBlock,
}

impl LiteralKind {
    #[must_use]
    pub fn of(literal: &str) -> Self {
        if literal.starts_with(TEXT_BLOCK_DELIMITER) {
            LiteralKind::TextBlock
        } else {
            LiteralKind::Quoted
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidLiteralKind {
    /// The opening `"""` is not followed by optional whitespace and a line terminator.
    MissingLineTerminator,
    /// The literal is too short to contain both of its delimiters.
    Unterminated,
}

impl fmt::Display for InvalidLiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidLiteralKind::MissingLineTerminator => {
                f.write_str("missing line terminator after opening text block delimiter")
            }
            InvalidLiteralKind::Unterminated => f.write_str("unterminated string literal"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid literal format: {kind}")]
pub struct InvalidLiteralFormat {
    pub kind: InvalidLiteralKind,
    /// Byte range within the provided literal text.
    pub span: Range<usize>,
}

fn invalid(kind: InvalidLiteralKind, span: Range<usize>) -> InvalidLiteralFormat {
    InvalidLiteralFormat { kind, span }
}

/// Convert the source text of a Java string literal into a `.properties` value.
///
/// `literal` is the literal exactly as written in source, delimiters included.
///
/// Quoted literals only lose their surrounding quotes; their escapes are already valid
/// `.properties` escapes. Text blocks are de-indented the way `javac` does it and then
/// re-escaped: `\s`, `\t`, `\r` and `\'` are interpreted, a backslash before a line break joins
/// the lines, other escapes are kept verbatim, `"` and `=` gain a backslash and every UTF-16 code
/// unit above `0x7F` becomes `\uXXXX`.
pub fn string_literal_to_properties_value(literal: &str) -> Result<String, InvalidLiteralFormat> {
    let kind = LiteralKind::of(literal);
    tracing::trace!(target = "nova.properties", ?kind, len = literal.len(), "converting literal");

    let result = match kind {
        LiteralKind::Quoted => quoted_content(literal).map(str::to_owned),
        LiteralKind::TextBlock => text_block_content(literal)
            .map(|content| escape_text_block(&strip_trailing_spaces(&strip_indent(content)))),
    };

    if let Err(err) = &result {
        tracing::debug!(
            target = "nova.properties",
            kind = ?err.kind,
            span = ?err.span,
            "rejected literal"
        );
    }
    result
}

fn quoted_content(literal: &str) -> Result<&str, InvalidLiteralFormat> {
    let mut chars = literal.chars();
    if chars.next().is_none() || chars.next_back().is_none() {
        return Err(invalid(InvalidLiteralKind::Unterminated, 0..literal.len()));
    }
    Ok(chars.as_str())
}

/// Content between the opening line terminator and the closing `"""`.
fn text_block_content(literal: &str) -> Result<&str, InvalidLiteralFormat> {
    let start = content_start(literal)?;
    let end = literal
        .char_indices()
        .rev()
        .nth(TEXT_BLOCK_DELIMITER.len() - 1)
        .map_or(0, |(idx, _)| idx);
    if start > end {
        return Err(invalid(InvalidLiteralKind::Unterminated, 0..literal.len()));
    }
    Ok(&literal[start..end])
}

fn content_start(literal: &str) -> Result<usize, InvalidLiteralFormat> {
    let after_delimiter = TEXT_BLOCK_DELIMITER.len();
    let rest = &literal[after_delimiter..];

    for (offset, ch) in rest.char_indices() {
        let idx = after_delimiter + offset;
        match ch {
            // A `\n` following `\r` stays in the content as an empty first line.
            '\n' | '\r' => return Ok(idx + 1),
            ch if is_java_whitespace(ch) => {}
            ch => {
                return Err(invalid(
                    InvalidLiteralKind::MissingLineTerminator,
                    idx..idx + ch.len_utf8(),
                ))
            }
        }
    }

    Err(invalid(
        InvalidLiteralKind::MissingLineTerminator,
        after_delimiter..literal.len(),
    ))
}

fn escape_text_block(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next().unwrap_or('\0') {
                '\'' => out.push('\''),
                's' => out.push(' '),
                // Line continuation: the lines are joined.
                '\n' => {}
                'r' => out.push('\r'),
                't' => out.push('\t'),
                other => {
                    out.push('\\');
                    out.push(other);
                }
            },
            '"' | '=' => {
                out.push('\\');
                out.push(ch);
            }
            ch if ch.is_ascii() => out.push(ch),
            ch => push_unicode_escapes(&mut out, ch),
        }
    }

    out
}

/// Append `\uXXXX` for each UTF-16 code unit of `ch`.
pub(crate) fn push_unicode_escapes(out: &mut String, ch: char) {
    let mut buf = [0u16; 2];
    for unit in ch.encode_utf16(&mut buf).iter() {
        let _ = write!(out, "\\u{unit:04x}");
    }
}
