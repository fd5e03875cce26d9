use nova_properties::{externalize, parse, string_literal_to_properties_value, WriteOptions};
use proptest::prelude::*;

const PROPTEST_CASES: u32 = 256;

fn arb_char() -> impl Strategy<Value = char> {
    // Content characters that never form an escape sequence on their own, plus the characters
    // the conversion has to escape:
    // - `"` and `=` (property syntax)
    // - multi-byte UTF-8 chars in the BMP
    // - a supplementary character (two UTF-16 code units)
    prop_oneof![
        12 => prop::sample::select(vec!['a', 'b', 'c', 'x', 'y', 'z', '0', '1', '.', ',', ' ']),
        2 => Just('"'),
        2 => Just('='),
        2 => Just('é'),
        2 => Just('中'),
        1 => Just('\u{1F600}'),
    ]
}

fn arb_word() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_char(), 1..=12)
        .prop_map(|chars| chars.into_iter().collect::<String>().trim().to_owned())
        .prop_filter("content lines are non-blank", |word| !word.is_empty())
}

/// Lines of a text block body as `(extra indentation, content)` pairs.
fn arb_body() -> impl Strategy<Value = Vec<(usize, String)>> {
    prop::collection::vec((0usize..=3, arb_word()), 1..=5)
}

fn text_block(body: &[(usize, String)]) -> String {
    let mut literal = String::from("\"\"\"\n");
    for (extra, content) in body {
        literal.push_str(&" ".repeat(4 + extra));
        literal.push_str(content);
        literal.push('\n');
    }
    literal.push_str("    \"\"\"");
    literal
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn quoted_literal_returns_inner_text(inner in prop::collection::vec(arb_char(), 0..=24)) {
        let inner: String = inner.into_iter().collect();
        let literal = format!("\"{inner}\"");
        // `"""` would be read as a text block delimiter.
        prop_assume!(!literal.starts_with("\"\"\""));
        prop_assert_eq!(string_literal_to_properties_value(&literal).unwrap(), inner);
    }

    #[test]
    fn text_block_value_is_ascii_with_escaped_syntax(body in arb_body()) {
        let value = string_literal_to_properties_value(&text_block(&body)).unwrap();
        prop_assert!(value.is_ascii(), "non-ASCII output: {value:?}");

        let mut prev = None;
        for ch in value.chars() {
            if ch == '"' || ch == '=' {
                prop_assert_eq!(prev, Some('\\'), "unescaped {:?} in {:?}", ch, value);
            }
            prev = Some(ch);
        }
    }

    #[test]
    fn text_block_reads_back_with_relative_indentation(body in arb_body()) {
        let entry = externalize("key", &text_block(&body), &WriteOptions::default()).unwrap();
        let parsed = parse(&entry);

        let mut expected = String::new();
        for (extra, content) in &body {
            expected.push_str(&" ".repeat(*extra));
            expected.push_str(content);
            expected.push('\n');
        }
        prop_assert_eq!(parsed.get("key"), Some(expected.as_str()));
    }
}
