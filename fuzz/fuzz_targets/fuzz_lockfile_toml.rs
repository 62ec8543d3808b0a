#![no_main]

use annealer::infrastructure::repositories::{parse_lockfile, render_lockfile};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Whatever parses must render and parse back to the same lockfile
        if let Ok(lockfile) = parse_lockfile(content) {
            let rendered = render_lockfile(&lockfile).expect("parsed lockfile renders");
            let reparsed = parse_lockfile(&rendered).expect("rendered lockfile parses");
            assert_eq!(reparsed, lockfile);
        }
    }
});
