#![no_main]

use libfuzzer_sys::fuzz_target;
use quarry_client::model::parse_value_ids;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Must never panic, and every id it keeps must survive a
        // join-and-reparse cycle.
        let ids = parse_value_ids(text);
        let joined = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        assert_eq!(parse_value_ids(&joined), ids);
    }
});
