#![no_main]

use gomin::Manifest;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(manifest) = Manifest::parse(s, "go.mod") {
            let _ = manifest.declared_version();
        }
    }
});
