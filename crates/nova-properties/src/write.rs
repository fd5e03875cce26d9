use crate::literal::{push_unicode_escapes, string_literal_to_properties_value};
use crate::InvalidLiteralFormat;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineSeparator {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl LineSeparator {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LineSeparator::Lf => "\n",
            LineSeparator::CrLf => "\r\n",
            LineSeparator::Cr => "\r",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteOptions {
    /// Text between key and value, e.g. `=` or ` = `.
    pub separator: String,
    pub line_separator: LineSeparator,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            separator: "=".to_owned(),
            line_separator: LineSeparator::default(),
        }
    }
}

/// Escape `key` so it reads back unchanged as the key of an entry.
#[must_use]
pub fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for ch in key.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ' ' => out.push_str("\\ "),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0C' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(ch);
            }
            ch if ch.is_ascii() => out.push(ch),
            ch => push_unicode_escapes(&mut out, ch),
        }
    }
    out
}

/// Format one `key<separator>value` line.
///
/// `value` is expected to be escaped already (see
/// [`string_literal_to_properties_value`]); only characters that would break the entry across
/// physical lines, and a leading space that the reader would skip, are escaped here.
#[must_use]
pub fn format_entry(key: &str, value: &str, options: &WriteOptions) -> String {
    let mut out = escape_key(key);
    out.push_str(&options.separator);

    for (idx, ch) in value.chars().enumerate() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0C' => out.push_str("\\f"),
            ' ' if idx == 0 => out.push_str("\\ "),
            ch => out.push(ch),
        }
    }

    out.push_str(options.line_separator.as_str());
    out
}

/// Append an entry to the text of an existing `.properties` file.
#[must_use]
pub fn append_entry(existing: &str, key: &str, value: &str, options: &WriteOptions) -> String {
    let entry = format_entry(key, value, options);
    let mut out = String::with_capacity(existing.len() + entry.len() + 2);
    out.push_str(existing);
    if !existing.is_empty() && !existing.ends_with(['\n', '\r']) {
        out.push_str(options.line_separator.as_str());
    }
    out.push_str(&entry);
    out
}

/// Convert a Java string literal and format it as the entry for `key`.
pub fn externalize(
    key: &str,
    literal: &str,
    options: &WriteOptions,
) -> Result<String, InvalidLiteralFormat> {
    let value = string_literal_to_properties_value(literal)?;
    Ok(format_entry(key, &value, options))
}
