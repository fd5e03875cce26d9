//! Text block helpers.
//!
//! [`strip_indent`] follows the JDK's `String::stripIndent`, which is what `javac` applies to the
//! content of a text block before interpreting escape sequences.

/// Java's `Character.isWhitespace`.
///
/// This differs from [`char::is_whitespace`]: the non-breaking spaces (`U+00A0`, `U+2007`,
/// `U+202F`) are excluded while the information separators `U+001C..=U+001F` are included.
pub fn is_java_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\u{000B}'
            | '\u{000C}'
            | '\r'
            | '\u{001C}'..='\u{001F}'
            | ' '
            | '\u{1680}'
            | '\u{2000}'..='\u{2006}'
            | '\u{2008}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Remove incidental indentation and trailing whitespace from every line.
///
/// Lines may end in `\n`, `\r` or `\r\n`; the result always uses `\n`. When `text` ends with a
/// line terminator nothing is treated as incidental (the closing delimiter sat in column 0) and
/// the result keeps a trailing `\n`. Otherwise the last line takes part in the indentation
/// computation even when it is blank.
#[must_use]
pub fn strip_indent(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let ends_with_terminator = text.ends_with(['\n', '\r']);
    let lines = split_lines(text);
    let outdent = if ends_with_terminator {
        0
    } else {
        outdent(&lines)
    };

    let mut out = String::with_capacity(text.len());
    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(strip_line(line, outdent));
    }
    if ends_with_terminator {
        out.push('\n');
    }
    out
}

/// Drop runs of spaces that sit directly in front of a `\n`.
///
/// Only U+0020 is removed, and the final line (which has no `\n` after it) is left alone.
#[must_use]
pub fn strip_trailing_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut lines = text.split('\n').peekable();
    while let Some(line) = lines.next() {
        if lines.peek().is_some() {
            out.push_str(line.trim_end_matches(' '));
            out.push('\n');
        } else {
            out.push_str(line);
        }
    }
    out
}

/// Split on `\n`, `\r` and `\r\n` without yielding an empty line after a final terminator.
fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut idx = 0usize;

    while idx < bytes.len() {
        match bytes[idx] {
            b'\n' => {
                lines.push(&text[start..idx]);
                idx += 1;
                start = idx;
            }
            b'\r' => {
                lines.push(&text[start..idx]);
                idx += 1;
                if idx < bytes.len() && bytes[idx] == b'\n' {
                    idx += 1;
                }
                start = idx;
            }
            _ => idx += 1,
        }
    }

    if start < bytes.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|ch| is_java_whitespace(*ch)).count()
}

fn is_blank(line: &str) -> bool {
    line.chars().all(is_java_whitespace)
}

fn outdent(lines: &[&str]) -> usize {
    let mut outdent = usize::MAX;
    for line in lines {
        if !is_blank(line) {
            outdent = outdent.min(leading_whitespace(line));
        }
    }

    // A blank last line is the closing delimiter's own indentation.
    if let Some(last) = lines.last().filter(|line| is_blank(line)) {
        outdent = outdent.min(last.chars().count());
    }

    outdent
}

fn strip_line(line: &str, outdent: usize) -> &str {
    let trimmed = line.trim_end_matches(is_java_whitespace);
    if trimmed.is_empty() {
        return "";
    }

    let skip = leading_whitespace(line).min(outdent);
    let start: usize = line.chars().take(skip).map(char::len_utf8).sum();
    &trimmed[start..]
}
