#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        let _ = weaver::domain::outlet::Template::parse(source);
        let _ = weaver::domain::services::Selector::parse(source);
    }
});
