#![no_main]

use libfuzzer_sys::fuzz_target;
use red_image::{encode_image, parse_gif};

fuzz_target!(|data: &[u8]| {
    // Malformed containers must be reported, never panic
    if let Ok(asset) = parse_gif(data) {
        let _ = encode_image(&asset);
    }
});
