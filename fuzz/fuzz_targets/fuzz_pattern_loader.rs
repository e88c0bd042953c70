#![no_main]

use std::path::Path;

use breathpace::config::PatternLoader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml_str) = std::str::from_utf8(data) {
        let loader = PatternLoader::default();

        // Only panics matter; any error is fine
        let _ = loader.load_str(yaml_str, Path::new("fuzz.yaml"));
    }
});
