#![no_main]

use libfuzzer_sys::fuzz_target;
use quarry_client::model::DisplayType;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Unknown codes are errors, not panics; known codes round-trip.
        if let Ok(display_type) = text.parse::<DisplayType>() {
            assert_eq!(display_type.as_str(), text);
        }
    }
});
