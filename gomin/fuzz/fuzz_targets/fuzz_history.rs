#![no_main]

use gomin::History;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = History::from_releases([(1, s)], 1);
    }
});
