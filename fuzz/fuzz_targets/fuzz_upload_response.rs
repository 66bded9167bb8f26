#![no_main]

use libfuzzer_sys::fuzz_target;

use appix::infrastructure::push::{parse_upload_response, ProgressDocument};

fuzz_target!(|data: &[u8]| {
    if let Ok(body) = std::str::from_utf8(data) {
        // Frontend responses are untrusted
        let _ = parse_upload_response(body);
        let _ = ProgressDocument::parse(body);
    }
});
