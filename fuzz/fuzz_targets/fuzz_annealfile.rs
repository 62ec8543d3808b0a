#![no_main]

use annealer::config::{Annealfile, Variables};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let mut variables = Variables::new();
        variables.insert("root".to_string(), "releases".to_string());
        // Interpolation and parsing should never panic
        let _ = Annealfile::parse(content, &variables);
    }
});
