//! Raw engine image -> indexed image ready for GIF encoding.

use crate::format::{FormatDescriptor, PaletteSource, PixelSource, SynthesisRule};
use crate::{build_single_frame_gif, Palette, RedImageError, Result};

/// An indexed image with an 8-bit palette.
///
/// `pixels` always holds `width * height` indices. Every byte is a valid
/// index because the palette always has 256 entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Format the image was decoded from
    pub format: &'static FormatDescriptor,
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
    /// Palette indices in row-major order
    pub pixels: Vec<u8>,
    /// 8-bit colour table
    pub palette: Palette,
}

impl RasterImage {
    /// Encodes the image as a single-frame GIF.
    pub fn to_gif(&self) -> Result<Vec<u8>> {
        build_single_frame_gif(self.width, self.height, &self.palette, &self.pixels)
    }
}

/// Reads the contents of a sibling palette file and widens it to 8 bits.
///
/// The file must be exactly 768 bytes of 6-bit components.
pub fn load_external_palette(data: &[u8]) -> Result<Palette> {
    Palette::from_bytes(data)?.widen()
}

/// Splits a raw image into palette and pixel indices as `format` lays them out.
///
/// # Arguments
/// * `format` - Descriptor returned by [`classify`](crate::classify)
/// * `data` - The complete file; must be exactly `format.byte_size` bytes
/// * `external_palette` - Already widened palette; required for formats with
///   an external palette and rejected for all others
///
/// Embedded palettes are validated and widened. Synthesized palettes ignore
/// the file contents entirely. Pixel values are passed through unchanged.
pub fn decode_image(
    format: &'static FormatDescriptor,
    data: &[u8],
    external_palette: Option<&Palette>,
) -> Result<RasterImage> {
    if data.len() != format.byte_size {
        return Err(RedImageError::TruncatedRead {
            expected: format.byte_size,
            actual: data.len(),
        });
    }
    format.check_palette_mode(external_palette.is_some())?;

    let palette = match (format.palette, external_palette) {
        (PaletteSource::Embedded { offset, length }, _) => {
            Palette::from_bytes(&data[offset..offset + length])?.widen()?
        }
        (PaletteSource::External, Some(palette)) => palette.clone(),
        (PaletteSource::External, None) => {
            return Err(RedImageError::MissingPalette { format: format.name })
        }
        (PaletteSource::Synthesized(SynthesisRule::Identity), _) => Palette::synthesize_identity(),
        (PaletteSource::Synthesized(SynthesisRule::Greyscale), _) => {
            Palette::synthesize_greyscale()
        }
    };

    let pixels = match format.pixels {
        PixelSource::Stored { offset } => data[offset..offset + format.pixel_count()].to_vec(),
        PixelSource::IdentityRamp => (0..format.pixel_count()).map(|i| i as u8).collect(),
    };

    Ok(RasterImage {
        format,
        width: format.width,
        height: format.height,
        pixels,
        palette,
    })
}
