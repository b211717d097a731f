//! File to file conversion pipelines.
//!
//! Each call reads its inputs completely and builds the whole output in
//! memory. Outputs are written to temporary files next to their destination
//! and renamed into place only once every output is staged, so an error never
//! leaves a partial file behind and never deletes a file that already existed.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::decoder::load_external_palette;
use crate::encoder::is_identity_ramp;
use crate::format::{classify, FormatDescriptor, PixelSource};
use crate::{decode_image, encode_image, parse_gif, RedImageError, Result};

/// Converts a raw engine image to a GIF.
///
/// The format is identified by the size of `image_path`. `palette_path` must
/// be given for formats with an external palette and omitted otherwise.
/// Returns the format that was decoded.
pub fn decode_file(
    image_path: &Path,
    palette_path: Option<&Path>,
    gif_path: &Path,
) -> Result<&'static FormatDescriptor> {
    let data = read_file(image_path)?;
    let format = classify(data.len())?;
    debug!(path = %image_path.display(), %format, "classified image");
    format.check_palette_mode(palette_path.is_some())?;

    let palette = match palette_path {
        Some(path) => Some(load_external_palette(&read_file(path)?)?),
        None => None,
    };

    let image = decode_image(format, &data, palette.as_ref())?;
    let gif = image.to_gif()?;
    debug!(bytes = gif.len(), "encoded gif");

    commit(stage(gif_path, &gif)?, gif_path)?;
    Ok(format)
}

/// Converts a GIF back to a raw engine image.
///
/// The format is identified by the GIF's pixel count. For formats with an
/// external palette the narrowed palette is written to `palette_path`;
/// for all others `palette_path` must be `None`. Returns the format that was
/// encoded.
pub fn encode_file(
    gif_path: &Path,
    palette_path: Option<&Path>,
    image_path: &Path,
) -> Result<&'static FormatDescriptor> {
    let data = read_file(gif_path)?;
    let asset = parse_gif(&data)?;
    debug!(
        path = %gif_path.display(),
        width = asset.width,
        height = asset.height,
        colors = asset.palette_entries(),
        "parsed gif"
    );

    let encoded = encode_image(&asset)?;
    let format = encoded.format;
    debug!(%format, "classified gif");
    format.check_palette_mode(palette_path.is_some())?;

    if format.pixels == PixelSource::IdentityRamp && !is_identity_ramp(&asset.frame) {
        warn!(path = %gif_path.display(), "frame is not the colour ramp, only the palette is kept");
    }

    let staged_image = stage(image_path, &encoded.data)?;
    let staged_palette = match (palette_path, &encoded.external_palette) {
        (Some(path), Some(palette)) => Some((stage(path, palette.as_bytes())?, path)),
        _ => None,
    };

    commit(staged_image, image_path)?;
    if let Some((staged, path)) = staged_palette {
        commit(staged, path)?;
    }
    Ok(format)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path).map_err(|source| io_error(path, source))?;
    tracing::trace!(path = %path.display(), bytes = data.len(), "read file");
    Ok(data)
}

/// Writes `data` to a temporary file in the same directory as `path`.
///
/// The temporary file is deleted when dropped without being committed.
fn stage(path: &Path, data: &[u8]) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(|source| io_error(path, source))?;
    staged
        .write_all(data)
        .and_then(|()| staged.flush())
        .map_err(|source| io_error(path, source))?;
    Ok(staged)
}

/// Renames a staged file over `path`.
fn commit(staged: NamedTempFile, path: &Path) -> Result<()> {
    staged
        .persist(path)
        .map_err(|err| io_error(path, err.error))?;
    tracing::trace!(path = %path.display(), "wrote file");
    Ok(())
}

fn io_error(path: &Path, source: io::Error) -> RedImageError {
    match source.kind() {
        io::ErrorKind::WriteZero => RedImageError::ShortWrite {
            path: path.to_path_buf(),
        },
        _ => RedImageError::Io {
            path: path.to_path_buf(),
            source,
        },
    }
}
