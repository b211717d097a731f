//! 256 colour RGB palettes and the 6-bit <-> 8-bit component rescaling.
//!
//! The engine stores palettes with 6 bits per channel (every component in
//! `0..64`), the VGA DAC layout. GIF colour tables use 8 bits per channel, so
//! palettes are widened by multiplying each component by 4 on the way to GIF
//! and narrowed by dividing by 4 on the way back.

use std::ops::Index;

use crate::{RedImageError, Result, NARROW_LIMIT, PALETTE_BYTES, PALETTE_ENTRIES};

const SCALE: u8 = 4;

/// An ordered table of exactly 256 RGB colours.
///
/// Entry `i` is the colour of pixel value `i`. The same type holds both the
/// narrow (6-bit) and the wide (8-bit) representation; which one a value is
/// depends on where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [[u8; 3]; PALETTE_ENTRIES],
}

impl Palette {
    /// Builds a palette from 768 packed `R, G, B` bytes.
    ///
    /// Fails with [`RedImageError::InvalidPaletteSize`] for any other length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PALETTE_BYTES {
            return Err(RedImageError::InvalidPaletteSize { size: bytes.len() });
        }
        let mut colors = [[0u8; 3]; PALETTE_ENTRIES];
        for (color, rgb) in colors.iter_mut().zip(bytes.chunks_exact(3)) {
            color.copy_from_slice(rgb);
        }
        Ok(Self { colors })
    }

    /// Returns the palette as 768 packed `R, G, B` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.colors.as_flattened()
    }

    /// Iterates over the colours in index order.
    pub fn colors(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.colors.iter().copied()
    }

    /// Returns true if every component fits in 6 bits.
    pub fn is_narrow(&self) -> bool {
        self.as_bytes().iter().all(|&c| c < NARROW_LIMIT)
    }

    /// Scales a 6-bit palette up to 8 bits per component.
    ///
    /// Every component is multiplied by 4. A component of 64 or more is not a
    /// valid 6-bit value and fails with [`RedImageError::InvalidPaletteValue`],
    /// reporting the byte offset of the first offender.
    pub fn widen(&self) -> Result<Self> {
        if let Some((offset, &value)) = self
            .as_bytes()
            .iter()
            .enumerate()
            .find(|&(_, &c)| c >= NARROW_LIMIT)
        {
            return Err(RedImageError::InvalidPaletteValue { offset, value });
        }
        Ok(self.map_components(|c| c * SCALE))
    }

    /// Scales an 8-bit palette down to 6 bits per component.
    ///
    /// Integer division by 4; the two low bits are dropped. This is the exact
    /// inverse of [`Palette::widen`] for every palette `widen` produces.
    pub fn narrow(&self) -> Self {
        self.map_components(|c| c / SCALE)
    }

    /// A monochrome ramp where colour `i` is `(i, i, i)`.
    pub fn synthesize_identity() -> Self {
        let mut colors = [[0u8; 3]; PALETTE_ENTRIES];
        for (i, color) in colors.iter_mut().enumerate() {
            *color = [i as u8; 3];
        }
        Self { colors }
    }

    /// The heightmap ramp where colour `i` is `(i, i + 1, i + 2)`.
    ///
    /// Components wrap modulo 256, so the last two entries are `(254, 255, 0)`
    /// and `(255, 0, 1)`. Existing heightmap GIFs carry exactly these colours.
    pub fn synthesize_greyscale() -> Self {
        let mut colors = [[0u8; 3]; PALETTE_ENTRIES];
        for (i, color) in colors.iter_mut().enumerate() {
            let i = i as u8;
            *color = [i, i.wrapping_add(1), i.wrapping_add(2)];
        }
        Self { colors }
    }

    fn map_components(&self, f: impl Fn(u8) -> u8) -> Self {
        let mut colors = self.colors;
        for component in colors.as_flattened_mut() {
            *component = f(*component);
        }
        Self { colors }
    }
}

impl Index<usize> for Palette {
    type Output = [u8; 3];

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.colors[index]
    }
}
