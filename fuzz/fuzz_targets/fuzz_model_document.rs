#![no_main]

use libfuzzer_sys::fuzz_target;
use weaver::infrastructure::sources::DocumentFormat;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        for format in [DocumentFormat::Json, DocumentFormat::Yaml, DocumentFormat::Toml] {
            let _ = format.parse(content);
        }
    }
});
