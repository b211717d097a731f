#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use red_image::{
    decode_image, encode_image, parse_gif, Palette, PaletteSource, PixelSource, FORMATS,
    PALETTE_BYTES,
};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    format: u8,
    palette: Vec<u8>,
    pixels: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let format = &FORMATS[input.format as usize % FORMATS.len()];

    // Lay out a valid raw file the way the descriptor declares it
    let palette: Vec<u8> = (0..PALETTE_BYTES)
        .map(|i| input.palette.get(i).copied().unwrap_or(0) % 64)
        .collect();
    let mut raw = vec![0u8; format.byte_size];
    if let PaletteSource::Embedded { offset, length } = format.palette {
        raw[offset..offset + length].copy_from_slice(&palette);
    }
    if let PixelSource::Stored { offset } = format.pixels {
        let stored = &mut raw[offset..offset + format.pixel_count()];
        for (i, byte) in stored.iter_mut().enumerate() {
            *byte = input.pixels.get(i % input.pixels.len().max(1)).copied().unwrap_or(0);
        }
    }

    let external = Palette::from_bytes(&palette).unwrap().widen().unwrap();
    let external = format.uses_external_palette().then_some(&external);

    let image = decode_image(format, &raw, external).unwrap();
    let asset = parse_gif(&image.to_gif().unwrap()).unwrap();
    let encoded = encode_image(&asset).unwrap();

    assert_eq!(encoded.format, format);
    assert_eq!(encoded.data, raw, "raw bytes must survive the round trip");
    if let Some(narrow) = encoded.external_palette {
        assert_eq!(narrow.as_bytes(), &palette[..]);
    }
});
