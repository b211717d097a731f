//! The closed set of supported raw formats.
//!
//! The files carry no header or magic number: the byte length is the format
//! tag. Going the other way, a GIF is matched by its pixel count. Both keys
//! are checked for uniqueness at compile time.

use std::fmt;

use crate::{RedImageError, Result, PALETTE_BYTES, PALETTE_ENTRIES};

/// Algorithm used for formats that carry no palette of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisRule {
    /// `(i, i, i)` for every index
    Identity,
    /// `(i, i + 1, i + 2)` with components wrapping modulo 256
    Greyscale,
}

/// Where the colours of an image come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteSource {
    /// Stored in the image file as `length` bytes of 6-bit components at `offset`
    Embedded { offset: usize, length: usize },
    /// Stored in a separate 768 byte sibling file
    External,
    /// Computed, never stored
    Synthesized(SynthesisRule),
}

/// Where the pixel indices of an image come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelSource {
    /// `width * height` index bytes stored in the image file at `offset`
    Stored { offset: usize },
    /// Not stored; pixel `i` has value `i`
    IdentityRamp,
}

/// Static description of one raw format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDescriptor {
    /// Human readable name
    pub name: &'static str,
    /// Customary file extension used by the engine
    pub extension: &'static str,
    /// Exact file size in bytes
    pub byte_size: usize,
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
    /// Where the colour table is stored, if at all
    pub palette: PaletteSource,
    /// Where the pixel indices are stored, if at all
    pub pixels: PixelSource,
}

impl FormatDescriptor {
    /// Number of pixels, the key used to match a GIF back to this format.
    #[inline]
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Returns true if the palette has to be supplied as a separate file.
    #[inline]
    pub const fn uses_external_palette(&self) -> bool {
        matches!(self.palette, PaletteSource::External)
    }

    /// Rejects a palette file for formats without an external palette, and
    /// the lack of one for formats that need it.
    pub fn check_palette_mode(&self, has_external_palette: bool) -> Result<()> {
        match (self.uses_external_palette(), has_external_palette) {
            (true, false) => Err(RedImageError::MissingPalette { format: self.name }),
            (false, true) => Err(RedImageError::UnexpectedPalette { format: self.name }),
            _ => Ok(()),
        }
    }

    /// Checks that the palette and pixel regions tile the file exactly.
    const fn is_consistent(&self) -> bool {
        let palette_bytes = match self.palette {
            PaletteSource::Embedded { offset, length } => {
                if length != PALETTE_BYTES || offset + length > self.byte_size {
                    return false;
                }
                length
            }
            PaletteSource::External | PaletteSource::Synthesized(_) => 0,
        };
        let pixel_bytes = match self.pixels {
            PixelSource::Stored { offset } => {
                if offset + self.pixel_count() > self.byte_size {
                    return false;
                }
                self.pixel_count()
            }
            PixelSource::IdentityRamp => {
                if self.pixel_count() != PALETTE_ENTRIES {
                    return false;
                }
                0
            }
        };
        palette_bytes + pixel_bytes == self.byte_size
    }
}

impl fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (.{}, {}x{}, {} bytes)",
            self.name, self.extension, self.width, self.height, self.byte_size
        )
    }
}

/// `.COL`: a bare palette, shown as a 16x16 swatch of every colour.
pub const COLOUR_PALETTE: FormatDescriptor = FormatDescriptor {
    name: "colour palette",
    extension: "COL",
    byte_size: PALETTE_BYTES,
    width: 16,
    height: 16,
    palette: PaletteSource::Embedded {
        offset: 0,
        length: PALETTE_BYTES,
    },
    pixels: PixelSource::IdentityRamp,
};

/// `.MPH`: 256x256 heightmap, one byte per sample.
pub const HEIGHTMAP: FormatDescriptor = FormatDescriptor {
    name: "heightmap",
    extension: "MPH",
    byte_size: 65536,
    width: 256,
    height: 256,
    palette: PaletteSource::Synthesized(SynthesisRule::Greyscale),
    pixels: PixelSource::Stored { offset: 0 },
};

/// `.RAW`: 320x200 scene prefixed by its own palette.
pub const SCENE: FormatDescriptor = FormatDescriptor {
    name: "scene image",
    extension: "RAW",
    byte_size: PALETTE_BYTES + 320 * 200,
    width: 320,
    height: 200,
    palette: PaletteSource::Embedded {
        offset: 0,
        length: PALETTE_BYTES,
    },
    pixels: PixelSource::Stored {
        offset: PALETTE_BYTES,
    },
};

/// `.TM`: 256x192 image whose palette lives in a sibling file.
pub const TILE_MAP: FormatDescriptor = FormatDescriptor {
    name: "tile map image",
    extension: "TM",
    byte_size: 49152,
    width: 256,
    height: 192,
    palette: PaletteSource::External,
    pixels: PixelSource::Stored { offset: 0 },
};

/// Every supported format.
pub const FORMATS: [FormatDescriptor; 4] = [COLOUR_PALETTE, HEIGHTMAP, SCENE, TILE_MAP];

const fn registry_is_valid(formats: &[FormatDescriptor]) -> bool {
    let mut i = 0;
    while i < formats.len() {
        if !formats[i].is_consistent() {
            return false;
        }
        let mut j = i + 1;
        while j < formats.len() {
            if formats[i].byte_size == formats[j].byte_size
                || formats[i].pixel_count() == formats[j].pixel_count()
            {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    registry_is_valid(&FORMATS),
    "format sizes and pixel counts must be unique and layouts must tile the file"
);

/// Identifies a raw image by its exact length in bytes.
///
/// Fails with [`RedImageError::UnsupportedSize`] when no format matches; there
/// is no nearest-size fallback.
pub fn classify(byte_length: usize) -> Result<&'static FormatDescriptor> {
    FORMATS
        .iter()
        .find(|format| format.byte_size == byte_length)
        .ok_or(RedImageError::UnsupportedSize { size: byte_length })
}

/// Identifies the raw format a GIF of the given dimensions converts to.
///
/// Only the pixel count is compared, so a 128x512 GIF matches the 256x256
/// heightmap. Fails with [`RedImageError::UnsupportedDimensions`] when no
/// format matches.
pub fn classify_pixels(width: usize, height: usize) -> Result<&'static FormatDescriptor> {
    let pixel_count = width
        .checked_mul(height)
        .ok_or(RedImageError::UnsupportedDimensions { width, height })?;
    FORMATS
        .iter()
        .find(|format| format.pixel_count() == pixel_count)
        .ok_or(RedImageError::UnsupportedDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_valid() {
        assert!(registry_is_valid(&FORMATS));
        assert!(!registry_is_valid(&[SCENE, SCENE]));
    }

    #[test]
    fn test_inconsistent_layout_rejected() {
        let mut broken = SCENE;
        broken.byte_size += 1;
        assert!(!broken.is_consistent());

        let mut broken = COLOUR_PALETTE;
        broken.width = 32;
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_classify_known_sizes() {
        assert_eq!(classify(768).unwrap(), &COLOUR_PALETTE);
        assert_eq!(classify(65536).unwrap(), &HEIGHTMAP);
        assert_eq!(classify(64768).unwrap(), &SCENE);
        assert_eq!(classify(49152).unwrap(), &TILE_MAP);
    }

    #[test]
    fn test_classify_descriptor_contents() {
        let scene = classify(64768).unwrap();
        assert_eq!((scene.width, scene.height), (320, 200));
        assert_eq!(
            scene.palette,
            PaletteSource::Embedded {
                offset: 0,
                length: 768
            }
        );
        assert_eq!(scene.pixels, PixelSource::Stored { offset: 768 });

        let tile_map = classify(49152).unwrap();
        assert!(tile_map.uses_external_palette());
        assert_eq!((tile_map.width, tile_map.height), (256, 192));
    }

    #[test]
    fn test_classify_unknown_sizes() {
        for size in [0usize, 1, 256, 767, 769, 49151, 49153, 64000, 64767, 64769, 65535, 65537] {
            assert!(
                matches!(classify(size), Err(RedImageError::UnsupportedSize { size: s }) if s == size),
                "size {} should not classify",
                size
            );
        }
    }

    #[test]
    fn test_classify_pixels() {
        assert_eq!(classify_pixels(16, 16).unwrap(), &COLOUR_PALETTE);
        assert_eq!(classify_pixels(256, 256).unwrap(), &HEIGHTMAP);
        assert_eq!(classify_pixels(320, 200).unwrap(), &SCENE);
        assert_eq!(classify_pixels(256, 192).unwrap(), &TILE_MAP);
        // same pixel count, different shape
        assert_eq!(classify_pixels(128, 512).unwrap(), &HEIGHTMAP);
    }

    #[test]
    fn test_classify_pixels_unknown() {
        assert!(matches!(
            classify_pixels(320, 240),
            Err(RedImageError::UnsupportedDimensions {
                width: 320,
                height: 240
            })
        ));
        assert!(classify_pixels(0, 0).is_err());
        assert!(classify_pixels(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_tables_agree() {
        for format in &FORMATS {
            assert_eq!(classify(format.byte_size).unwrap(), format);
            assert_eq!(classify_pixels(format.width, format.height).unwrap(), format);
        }
    }

    #[test]
    fn test_check_palette_mode() {
        assert!(TILE_MAP.check_palette_mode(true).is_ok());
        assert!(matches!(
            TILE_MAP.check_palette_mode(false),
            Err(RedImageError::MissingPalette { .. })
        ));
        for format in [COLOUR_PALETTE, HEIGHTMAP, SCENE] {
            assert!(format.check_palette_mode(false).is_ok());
            assert!(matches!(
                format.check_palette_mode(true),
                Err(RedImageError::UnexpectedPalette { .. })
            ));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(SCENE.to_string(), "scene image (.RAW, 320x200, 64768 bytes)");
    }
}
