//! Decoded GIF -> raw engine image.

use crate::format::{classify_pixels, FormatDescriptor, PaletteSource, PixelSource};
use crate::{GifAsset, Palette, RedImageError, Result, PALETTE_BYTES, PALETTE_ENTRIES};

/// A raw image ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Format the GIF was matched to
    pub format: &'static FormatDescriptor,
    /// File contents, exactly `format.byte_size` bytes
    pub data: Vec<u8>,
    /// Narrowed palette for the sibling file, present only for formats with
    /// an external palette
    pub external_palette: Option<Palette>,
}

/// Rebuilds the raw byte layout for a decoded GIF.
///
/// The GIF must have exactly 256 colours; smaller tables are rejected with
/// [`RedImageError::UnsupportedPaletteSize`] rather than padded. The format is
/// chosen by pixel count. The palette is narrowed to 6 bits and placed where
/// the format stores it, followed by the frame when the format stores pixels.
/// For the colour palette format the frame is dropped without being checked.
pub fn encode_image(asset: &GifAsset) -> Result<EncodedImage> {
    if asset.palette.len() != PALETTE_BYTES {
        return Err(RedImageError::UnsupportedPaletteSize {
            entries: asset.palette_entries(),
        });
    }
    let format = classify_pixels(asset.width, asset.height)?;
    if asset.frame.len() != format.pixel_count() {
        return Err(RedImageError::TruncatedRead {
            expected: format.pixel_count(),
            actual: asset.frame.len(),
        });
    }

    let palette = Palette::from_bytes(&asset.palette)?.narrow();
    let mut data = vec![0u8; format.byte_size];

    let external_palette = match format.palette {
        PaletteSource::Embedded { offset, length } => {
            data[offset..offset + length].copy_from_slice(palette.as_bytes());
            None
        }
        PaletteSource::External => Some(palette),
        PaletteSource::Synthesized(_) => None,
    };

    match format.pixels {
        PixelSource::Stored { offset } => {
            data[offset..offset + format.pixel_count()].copy_from_slice(&asset.frame);
        }
        PixelSource::IdentityRamp => {}
    }

    Ok(EncodedImage {
        format,
        data,
        external_palette,
    })
}

/// Returns true if the frame is the `0, 1, 2, ..., 255` ramp a decoded colour
/// palette produces.
pub fn is_identity_ramp(frame: &[u8]) -> bool {
    frame.len() == PALETTE_ENTRIES && frame.iter().enumerate().all(|(i, &v)| v as usize == i)
}
