#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Unit file parsing (with unknown-key tracking) should never panic
        let _ = weaver::config::parse_with_warnings(content, std::path::Path::new("weaver.toml"));
    }
});
