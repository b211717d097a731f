#![no_main]

use libfuzzer_sys::fuzz_target;
use red_image::{classify, decode_image, decoder::load_external_palette};

fuzz_target!(|data: &[u8]| {
    // Neither path may panic, whatever the input
    let _ = load_external_palette(data);
    if let Ok(format) = classify(data.len()) {
        if !format.uses_external_palette() {
            let _ = decode_image(format, data, None).and_then(|image| image.to_gif());
        }
    }
});
