//! PNG output for finished rasters.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{PaintError, PaintResult};
use crate::raster::Raster;

/// Copy a raster into an `image` buffer.
pub fn to_rgba_image(raster: &Raster) -> PaintResult<RgbaImage> {
    RgbaImage::from_raw(raster.width, raster.height, raster.data.clone()).ok_or_else(|| {
        PaintError::encoding(format!(
            "buffer of {} bytes does not hold a {}x{} RGBA image",
            raster.data.len(),
            raster.width,
            raster.height
        ))
    })
}

/// Encode a raster as PNG bytes.
pub fn encode_png(raster: &Raster) -> PaintResult<Vec<u8>> {
    let img = to_rgba_image(raster)?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Write a raster to `path` as PNG. The raster is left untouched on failure.
pub fn write_png(raster: &Raster, path: &Path) -> PaintResult<()> {
    let img = to_rgba_image(raster)?;
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| PaintError::encoding(format!("cannot write {}: {e}", path.display())))
}
