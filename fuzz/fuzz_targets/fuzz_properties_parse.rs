#![no_main]

mod utils;

use libfuzzer_sys::fuzz_target;
use utils::truncate_utf8;

fn assert_safe_slice(text: &str, start: usize, end: usize) {
    assert!(start <= end, "invalid range: {start} > {end}");
    assert!(
        end <= text.len(),
        "range end out of bounds: {end} > {}",
        text.len()
    );
    assert!(
        text.is_char_boundary(start) && text.is_char_boundary(end),
        "range {start}..{end} not on char boundaries"
    );
}

fuzz_target!(|data: &[u8]| {
    let Some(text) = truncate_utf8(data) else {
        return;
    };

    // Never panic / never hang, and always return ranges that are safe to slice.
    let parsed = nova_properties::parse(text);
    for entry in &parsed.entries {
        let key_start = u32::from(entry.key_range.start()) as usize;
        let key_end = u32::from(entry.key_range.end()) as usize;
        assert_safe_slice(text, key_start, key_end);

        let value_start = u32::from(entry.value_range.start()) as usize;
        let value_end = u32::from(entry.value_range.end()) as usize;
        assert_safe_slice(text, value_start, value_end);
    }
});
