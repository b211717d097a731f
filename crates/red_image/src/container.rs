//! Single-frame indexed GIF reading and writing on top of the `gif` crate.

use std::borrow::Cow;

use gif::{ColorOutput, DecodeOptions, Encoder, Frame};

use crate::{Palette, RedImageError, Result};

/// Upper bound on the canvas a parsed GIF may allocate.
const GIF_PIXEL_LIMIT: usize = 1 << 24;

/// The parts of a decoded GIF needed to rebuild a raw image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GifAsset {
    /// Logical screen width in pixels
    pub width: usize,
    /// Logical screen height in pixels
    pub height: usize,
    /// Colour table of the first frame as packed `R, G, B` bytes.
    /// Its length is whatever the file declares, not padded to 256 entries.
    pub palette: Vec<u8>,
    /// Palette indices of the first frame on a `width * height` canvas
    pub frame: Vec<u8>,
}

impl GifAsset {
    /// Number of colours in the colour table.
    #[inline]
    pub fn palette_entries(&self) -> usize {
        self.palette.len() / 3
    }
}

/// Encodes an indexed image as a GIF with one frame and a 256 colour global table.
///
/// # Arguments
/// * `width`, `height` - Image size, both in `1..=65535`
/// * `palette` - 8-bit colour table
/// * `pixels` - `width * height` palette indices in row-major order
pub fn build_single_frame_gif(
    width: usize,
    height: usize,
    palette: &Palette,
    pixels: &[u8],
) -> Result<Vec<u8>> {
    let (frame_width, frame_height) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err(RedImageError::InvalidDimensions { width, height }),
    };
    if pixels.len() != width * height {
        return Err(RedImageError::GifEncode(format!(
            "expected {} pixels for {}x{} frame, got {}",
            width * height,
            width,
            height,
            pixels.len()
        )));
    }

    let mut output = Vec::new();
    {
        let mut encoder = Encoder::new(&mut output, frame_width, frame_height, palette.as_bytes())
            .map_err(|e| RedImageError::GifEncode(e.to_string()))?;

        let frame = Frame {
            width: frame_width,
            height: frame_height,
            buffer: Cow::Borrowed(pixels),
            ..Frame::default()
        };
        encoder
            .write_frame(&frame)
            .map_err(|e| RedImageError::GifEncode(e.to_string()))?;
        // the trailer is written when the encoder drops
    }

    tracing::trace!(width, height, bytes = output.len(), "built gif");
    Ok(output)
}

/// Decodes the first frame of a GIF into palette indices.
///
/// The frame's local colour table takes precedence over the global one.
/// Pixels outside the frame rectangle, and transparent pixels, take the
/// background index (0 when the file declares none). Later frames are ignored.
pub fn parse_gif(data: &[u8]) -> Result<GifAsset> {
    let mut options = DecodeOptions::new();
    options.set_color_output(ColorOutput::Indexed);
    let mut decoder = options
        .read_info(data)
        .map_err(|e| RedImageError::GifDecode(e.to_string()))?;

    let width = decoder.width() as usize;
    let height = decoder.height() as usize;
    if width * height > GIF_PIXEL_LIMIT {
        return Err(RedImageError::InvalidDimensions { width, height });
    }
    let global_palette = decoder.global_palette().map(<[u8]>::to_vec);
    let background = decoder.bg_color().unwrap_or(0) as u8;

    let frame = decoder
        .read_next_frame()
        .map_err(|e| RedImageError::GifDecode(e.to_string()))?
        .ok_or(RedImageError::NoFrame)?;

    let palette = frame.palette.clone().or(global_palette).unwrap_or_default();

    let mut canvas = vec![background; width * height];
    let left = frame.left as usize;
    let top = frame.top as usize;
    let frame_width = frame.width as usize;
    if frame_width > 0 && left < width {
        let visible = frame_width.min(width - left);
        for (y, row) in frame.buffer.chunks_exact(frame_width).enumerate() {
            let canvas_y = top + y;
            if canvas_y >= height {
                break;
            }
            let start = canvas_y * width + left;
            let target = &mut canvas[start..start + visible];
            for (dst, &src) in target.iter_mut().zip(&row[..visible]) {
                if frame.transparent != Some(src) {
                    *dst = src;
                }
            }
        }
    }

    tracing::trace!(width, height, colors = palette.len() / 3, "parsed gif");
    Ok(GifAsset {
        width,
        height,
        palette,
        frame: canvas,
    })
}
