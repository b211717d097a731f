//! # red_image
//!
//! Conversion between the fixed-size raster formats of a legacy game engine
//! and single-frame indexed GIF files.
//!
//! ## Features
//!
//! - **Format registry**: the on-disk format is identified purely by its byte length
//! - **Palette codec**: exact 6-bit <-> 8-bit palette rescaling with validation
//! - **Decoder/Encoder**: raw bytes <-> palette + index buffer, byte-exact round trip
//!
//! ## Quick Start
//!
//! ### Converting a scene image to GIF
//!
//! ```ignore
//! use red_image::decode_file;
//!
//! // 64768 byte scene with an embedded palette
//! let format = decode_file("TITLE.RAW".as_ref(), None, "title.gif".as_ref())?;
//! println!("{}", format.name);
//! ```
//!
//! ### Converting a GIF back
//!
//! ```ignore
//! use red_image::encode_file;
//!
//! // 256x192 image whose palette lives in a sibling file
//! encode_file("map.gif".as_ref(), Some("MAP.PAL".as_ref()), "MAP.TM".as_ref())?;
//! ```

use std::path::PathBuf;
use thiserror::Error;

pub mod container;
pub mod convert;
pub mod decoder;
pub mod encoder;
pub mod format;
pub mod palette;

pub use container::{build_single_frame_gif, parse_gif, GifAsset};
pub use convert::{decode_file, encode_file};
pub use decoder::{decode_image, RasterImage};
pub use encoder::{encode_image, EncodedImage};
pub use format::{
    classify, classify_pixels, FormatDescriptor, PaletteSource, PixelSource, SynthesisRule,
    FORMATS,
};
pub use palette::Palette;

/// Errors that can occur while converting an image.
#[derive(Debug, Error)]
pub enum RedImageError {
    /// No known format has this exact byte length
    #[error("unsupported image type or size: {size} bytes")]
    UnsupportedSize { size: usize },

    /// No known format has this many pixels
    #[error("unsupported gif size: {width}x{height}")]
    UnsupportedDimensions { width: usize, height: usize },

    /// A 6-bit palette component was out of range
    #[error("unsupported colour palette value {value} at byte {offset}")]
    InvalidPaletteValue { offset: usize, value: u8 },

    /// An external palette file was not exactly 768 bytes
    #[error("unsupported colour palette size: {size} bytes, expected 768")]
    InvalidPaletteSize { size: usize },

    /// A GIF colour table did not hold exactly 256 entries
    #[error("unsupported colour palette size: {entries} entries, expected 256")]
    UnsupportedPaletteSize { entries: usize },

    /// Fewer bytes were available than the format requires
    #[error("could not read image: expected {expected} bytes, got {actual}")]
    TruncatedRead { expected: usize, actual: usize },

    /// The destination accepted fewer bytes than were written
    #[error("error writing image data to '{}'", .path.display())]
    ShortWrite { path: PathBuf },

    /// Opening, creating, reading or writing a file failed
    #[error("i/o error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A palette file was given for a format that keeps its own palette
    #[error("{format} does not use an external colour palette")]
    UnexpectedPalette { format: &'static str },

    /// No palette file was given for a format that needs one
    #[error("{format} requires an external colour palette")]
    MissingPalette { format: &'static str },

    /// Invalid image dimensions (zero or too large for GIF)
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// The GIF encoder rejected the image
    #[error("could not create gif: {0}")]
    GifEncode(String),

    /// The GIF container was malformed
    #[error("invalid gif data: {0}")]
    GifDecode(String),

    /// The GIF container holds no image frame
    #[error("unsupported gif frame: no frame found")]
    NoFrame,
}

/// Result type for conversion operations.
pub type Result<T> = core::result::Result<T, RedImageError>;

/// Number of colours in every palette handled by this crate.
pub const PALETTE_ENTRIES: usize = 256;

/// Size in bytes of a palette (256 RGB triples).
pub const PALETTE_BYTES: usize = PALETTE_ENTRIES * 3;

/// Exclusive upper bound of a 6-bit colour component.
pub(crate) const NARROW_LIMIT: u8 = 64;
