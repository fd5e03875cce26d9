#![no_main]

mod utils;

use libfuzzer_sys::fuzz_target;
use nova_properties::{externalize, parse, string_literal_to_properties_value, WriteOptions};
use utils::truncate_utf8;

fuzz_target!(|data: &[u8]| {
    let Some(text) = truncate_utf8(data) else {
        return;
    };

    match string_literal_to_properties_value(text) {
        Ok(_) => {
            // Whatever the literal held, the written entry must stay a single entry.
            let entry = externalize("key", text, &WriteOptions::default())
                .expect("conversion already succeeded");
            let parsed = parse(&entry);
            assert_eq!(parsed.entries.len(), 1, "entry: {entry:?}");
            assert_eq!(parsed.entries[0].key, "key");
        }
        Err(err) => {
            assert!(err.span.start <= err.span.end, "invalid span {:?}", err.span);
            assert!(err.span.end <= text.len(), "span {:?} out of bounds", err.span);
        }
    }
});
