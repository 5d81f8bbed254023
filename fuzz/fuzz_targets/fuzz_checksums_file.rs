#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(checksums) = weaver::infrastructure::repositories::parse_checksums(content) {
            // whatever parses must format again without panicking
            let _ = weaver::infrastructure::repositories::format_checksums(&checksums);
        }
    }
});
