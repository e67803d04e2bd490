#![no_main]

use gomin::{History, Package, ScanOptions, Scanner};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(package) = serde_json::from_slice::<Package>(data) {
        let history = History::default();
        let _ = Scanner::new(&history, ScanOptions::default()).scan_packages(&[package]);
    }
});
