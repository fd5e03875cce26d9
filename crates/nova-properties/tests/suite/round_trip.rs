use nova_properties::{append_entry, externalize, parse, WriteOptions};
use pretty_assertions::assert_eq;

/// Externalize `literal` under `key` and read the value back with the `.properties` reader.
fn read_back(key: &str, literal: &str) -> String {
    let entry = externalize(key, literal, &WriteOptions::default()).unwrap();
    let parsed = parse(&entry);
    assert_eq!(parsed.entries.len(), 1, "entry: {entry:?}");
    parsed.get(key).unwrap().to_owned()
}

#[test]
fn quoted_literal_reads_back_as_java_value() {
    assert_eq!(read_back("greeting", "\"Hello, World!\""), "Hello, World!");
    assert_eq!(read_back("quote", "\"say \\\"hi\\\"\""), "say \"hi\"");
    assert_eq!(read_back("tab", "\"a\\tb\""), "a\tb");
}

#[test]
fn text_block_reads_back_as_java_value() {
    let literal = "\"\"\"\n    Dear \"user\",\n      a=b \\u00e4 ö \\s\n    goes \\\n    on.\n    \"\"\"";
    assert_eq!(
        read_back("letter", literal),
        "Dear \"user\",\n  a=b ä ö  \ngoes on.\n"
    );
}

#[test]
fn supplementary_characters_survive() {
    let literal = "\"\"\"\n  \u{1F600} ok\n  \"\"\"";
    assert_eq!(read_back("emoji", literal), "\u{1F600} ok\n");
}

#[test]
fn leading_space_survives() {
    let literal = "\"\"\"\n  \\s indented\n  \"\"\"";
    assert_eq!(read_back("space", literal), " indented\n");
}

#[test]
fn keys_with_special_characters_round_trip() {
    let entry = externalize("menu title: Ä", "\"x\"", &WriteOptions::default()).unwrap();
    assert_eq!(entry, "menu\\ title\\:\\ \\u00c4=x\n");
    assert_eq!(parse(&entry).get("menu title: Ä"), Some("x"));
}

#[test]
fn appended_entries_keep_existing_ones() {
    let options = WriteOptions::default();
    let text = append_entry("# messages\nfirst=1", "second", "2", &options);
    let parsed = parse(&text);
    assert_eq!(parsed.get("first"), Some("1"));
    assert_eq!(parsed.get("second"), Some("2"));
}
