#![no_main]

use libfuzzer_sys::fuzz_target;
use quarry_client::wire::ArtifactRow;

fuzz_target!(|data: &[u8]| {
    // Malformed payloads must come back as errors, never panics. A row
    // that decodes must re-encode.
    if let Ok(row) = serde_json::from_slice::<ArtifactRow>(data) {
        let _ = serde_json::to_vec(&row);
    }
});
