#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::Path;

use appix::domain::policies::EventFilter;
use appix::domain::value_objects::IgnorePatterns;

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    // First line is the path under test, the rest is a .appixignore body
    let (path, patterns) = content.split_once('\n').unwrap_or((content, ""));
    let root = Path::new("/app");
    let filter = match IgnorePatterns::from_content(root, &root.join(".appixignore"), patterns) {
        Ok(patterns) => EventFilter::new(patterns),
        Err(_) => EventFilter::builtin(),
    };
    let _ = filter.should_ignore(Path::new(path));
});
