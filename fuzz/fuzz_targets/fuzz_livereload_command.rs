#![no_main]

use libfuzzer_sys::fuzz_target;

use appix::infrastructure::livereload::parse_command;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Some(command) = parse_command(text) {
            let _ = command.accepts_protocol_7();
        }
    }
});
