use nova_properties::{string_literal_to_properties_value, InvalidLiteralKind};
use pretty_assertions::assert_eq;

fn convert(literal: &str) -> String {
    string_literal_to_properties_value(literal).unwrap()
}

/// Builds a text block whose closing delimiter is indented by four spaces.
fn text_block(opening_line: &str, lines: &[&str]) -> String {
    let mut literal = format!("\"\"\"{opening_line}\n");
    for line in lines {
        literal.push_str(line);
        literal.push('\n');
    }
    literal.push_str("    \"\"\"");
    literal
}

#[test]
fn empty_string() {
    assert_eq!(convert("\"\""), "");
}

#[test]
fn quoted_escapes_are_kept() {
    assert_eq!(convert("\"\\\"\\r\\n\\\\\""), "\\\"\\r\\n\\\\");
}

#[test]
fn empty_block() {
    assert_eq!(convert("\"\"\"\n\"\"\""), "");
}

#[test]
fn whitespace_only_block() {
    assert_eq!(convert(&text_block("", &["      "])), "\n");
    assert_eq!(convert("\"\"\"  \n   \"\"\""), "");
}

#[test]
fn block_text() {
    let literal = text_block("", &["    Some Text", "    with 2 lines."]);
    assert_eq!(convert(&literal), "Some Text\nwith 2 lines.\n");
}

#[test]
fn block_with_whitespace_on_start() {
    let literal = text_block(" ", &["    Some Text"]);
    assert_eq!(convert(&literal), "Some Text\n");
}

#[test]
fn block_with_trailing_whitespace_removed() {
    let literal = text_block("", &["    Some Text  "]);
    assert_eq!(convert(&literal), "Some Text\n");
}

#[test]
fn block_with_trailing_whitespace_kept() {
    let literal = text_block("", &["    Some Text \\s"]);
    assert_eq!(convert(&literal), "Some Text  \n");
}

#[test]
fn block_keeps_one_space_per_space_escape() {
    let literal = text_block("", &["    a \\s\\s\\s"]);
    assert_eq!(convert(&literal), "a    \n");

    let literal = text_block("", &["    a\\s  "]);
    assert_eq!(convert(&literal), "a \n");

    let literal = text_block("", &["    a\\s b   "]);
    assert_eq!(convert(&literal), "a  b\n");
}

#[test]
fn block_with_carriage_return_escape() {
    let literal = text_block("", &["    Some Text\\r"]);
    assert_eq!(convert(&literal), "Some Text\r\n");
}

#[test]
fn block_with_tab() {
    let literal = text_block("", &["    Some\\tText"]);
    assert_eq!(convert(&literal), "Some\tText\n");
}

#[test]
fn block_with_newline_escape() {
    let literal = text_block("", &["    Some\\nText"]);
    assert_eq!(convert(&literal), "Some\\nText\n");
}

#[test]
fn block_with_unicode_escape() {
    let literal = text_block("", &["    \\u00e4"]);
    assert_eq!(convert(&literal), "\\u00e4\n");
}

#[test]
fn block_with_joined_lines() {
    let literal = text_block("", &["    Some Text \\", "    goes on."]);
    assert_eq!(convert(&literal), "Some Text goes on.\n");
}

#[test]
fn block_keeps_relative_indentation() {
    let literal = text_block("", &["    if (x) {", "        y();", "    }"]);
    assert_eq!(convert(&literal), "if (x) {\n    y();\n}\n");
}

#[test]
fn block_closing_on_content_line_has_no_trailing_newline() {
    assert_eq!(convert("\"\"\"\n    Some Text\"\"\""), "Some Text");
}

#[test]
fn block_escapes_property_syntax_and_non_ascii() {
    let literal = text_block("", &["    key=\"grün\""]);
    assert_eq!(convert(&literal), "key\\=\\\"gr\\u00fcn\\\"\n");
}

#[test]
fn opening_line_with_content_is_rejected() {
    let err = string_literal_to_properties_value("\"\"\" Some Text\n    \"\"\"").unwrap_err();
    assert_eq!(err.kind, InvalidLiteralKind::MissingLineTerminator);
    assert_eq!(err.span, 4..5);
}

#[test]
fn unbalanced_quoted_literal_is_accepted() {
    assert_eq!(convert("\"abc"), "ab");
}
