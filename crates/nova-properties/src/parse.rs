//! A minimal, range-preserving reader for Java `.properties` files.
//!
//! The goal is tooling support (locating keys, reading back externalized strings) rather than
//! byte-for-byte `java.util.Properties` compatibility: malformed `\u` escapes are kept as text
//! instead of failing the whole file.

use text_size::{TextRange, TextSize};

fn text_size(offset: usize) -> TextSize {
    TextSize::from(u32::try_from(offset).unwrap_or(u32::MAX))
}

fn text_range(start: usize, end: usize) -> TextRange {
    TextRange::new(text_size(start), text_size(end))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyEntry {
    pub key: String,
    pub value: String,
    pub key_range: TextRange,
    pub value_range: TextRange,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertiesFile {
    pub entries: Vec<PropertyEntry>,
}

impl PropertiesFile {
    #[must_use]
    pub fn by_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a PropertyEntry> + 'a {
        self.entries.iter().filter(move |e| e.key == key)
    }

    /// The effective value for `key`: later entries override earlier ones.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }
}

#[derive(Clone, Debug)]
struct LogicalLine {
    /// Characters with the byte offset each one started at in the input.
    chars: Vec<(usize, char)>,
    /// Byte offset where the last physical line's content ends (before its terminator).
    content_end: usize,
}

/// Parse a `.properties` file into key/value entries.
#[must_use]
pub fn parse(text: &str) -> PropertiesFile {
    let mut offset = 0usize;
    let mut entries = Vec::new();

    while offset < text.len() {
        let line_start = offset;
        let logical = read_logical_line(text, &mut offset);
        if let Some(entry) = parse_logical_line(&logical) {
            entries.push(entry);
        }

        // Ensure we always make progress even on pathological inputs.
        if offset == line_start {
            offset += text[offset..].chars().next().map_or(1, char::len_utf8);
        }
    }

    PropertiesFile { entries }
}

fn read_logical_line(text: &str, offset: &mut usize) -> LogicalLine {
    let bytes = text.as_bytes();
    let mut chars = Vec::new();
    let mut first_segment = true;

    loop {
        let segment_start = *offset;
        let mut line_end = segment_start;
        while line_end < bytes.len() && !matches!(bytes[line_end], b'\n' | b'\r') {
            line_end += 1;
        }
        let segment = &text[segment_start..line_end];

        // Comment lines never continue, even when they end in a backslash.
        let is_comment = first_segment
            && segment
                .trim_start_matches(is_whitespace)
                .starts_with(['#', '!']);
        let continues = !is_comment && ends_with_unescaped_backslash(segment);
        let copy = if continues {
            &segment[..segment.len() - 1]
        } else {
            segment
        };
        chars.extend(
            copy.char_indices()
                .map(|(idx, ch)| (segment_start + idx, ch)),
        );

        // Consume the terminator (`\n`, `\r` or `\r\n`).
        *offset = line_end;
        if *offset < bytes.len() {
            if bytes[*offset] == b'\r' && bytes.get(*offset + 1) == Some(&b'\n') {
                *offset += 2;
            } else {
                *offset += 1;
            }
        }

        if !continues || *offset >= bytes.len() {
            return LogicalLine {
                chars,
                content_end: line_end,
            };
        }

        // Continuation: skip leading whitespace on the next physical line.
        while *offset < bytes.len() && is_whitespace(bytes[*offset] as char) {
            *offset += 1;
        }
        first_segment = false;
    }
}

fn ends_with_unescaped_backslash(line: &str) -> bool {
    line.bytes().rev().take_while(|b| *b == b'\\').count() % 2 == 1
}

fn parse_logical_line(line: &LogicalLine) -> Option<PropertyEntry> {
    let chars = &line.chars;
    let mut i = 0usize;
    while i < chars.len() && is_whitespace(chars[i].1) {
        i += 1;
    }

    if i >= chars.len() || matches!(chars[i].1, '#' | '!') {
        return None;
    }

    let key_start = i;
    while i < chars.len() {
        match chars[i].1 {
            // Escaped character.
            '\\' => i += 2,
            '=' | ':' => break,
            c if is_whitespace(c) => break,
            _ => i += 1,
        }
    }
    let key_end = i.min(chars.len());

    // Skip whitespace between key and separator.
    while i < chars.len() && is_whitespace(chars[i].1) {
        i += 1;
    }

    // Optional `:` / `=`.
    if i < chars.len() && matches!(chars[i].1, '=' | ':') {
        i += 1;
    }

    // Skip whitespace after separator.
    while i < chars.len() && is_whitespace(chars[i].1) {
        i += 1;
    }

    let value_start = i;
    let value_end = chars.len();

    Some(PropertyEntry {
        key: unescape(&chars[key_start..key_end]),
        value: unescape(&chars[value_start..value_end]),
        key_range: slice_range(line, key_start, key_end),
        value_range: slice_range(line, value_start, value_end),
    })
}

fn slice_range(line: &LogicalLine, start: usize, end: usize) -> TextRange {
    let chars = &line.chars;
    if start >= end || start >= chars.len() {
        let at = chars.get(start).map_or(line.content_end, |(offset, _)| *offset);
        return text_range(at, at);
    }

    let (last_offset, last_char) = chars[end.min(chars.len()) - 1];
    text_range(chars[start].0, last_offset + last_char.len_utf8())
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0C')
}

/// Resolve `.properties` escapes. `\uXXXX` escapes are UTF-16 code units, so a surrogate pair
/// written as two escapes decodes to one character.
fn unescape(chars: &[(usize, char)]) -> String {
    let mut units: Vec<u16> = Vec::with_capacity(chars.len());
    let mut buf = [0u16; 2];
    let mut push = |units: &mut Vec<u16>, ch: char| {
        units.extend_from_slice(ch.encode_utf16(&mut buf));
    };

    let mut i = 0usize;
    while i < chars.len() {
        let ch = chars[i].1;
        i += 1;
        if ch != '\\' {
            push(&mut units, ch);
            continue;
        }

        let Some(&(_, escaped)) = chars.get(i) else {
            break;
        };
        i += 1;
        match escaped {
            't' => push(&mut units, '\t'),
            'n' => push(&mut units, '\n'),
            'r' => push(&mut units, '\r'),
            'f' => push(&mut units, '\x0C'),
            'u' => match hex_unit(chars.get(i..i + 4)) {
                Some(unit) => {
                    units.push(unit);
                    i += 4;
                }
                None => push(&mut units, 'u'),
            },
            other => push(&mut units, other),
        }
    }

    String::from_utf16_lossy(&units)
}

fn hex_unit(digits: Option<&[(usize, char)]>) -> Option<u16> {
    digits?.iter().try_fold(0u16, |acc, (_, c)| {
        let digit = c.to_digit(16)?;
        Some((acc << 4) | digit as u16)
    })
}
