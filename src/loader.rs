//! Image decoding.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::imageops::FilterType;

use crate::error::{AppError, Result};
use crate::geometry::Rect;

/// A decoded image ready for display.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    path: PathBuf,
    pixels: RgbaImage,
}

impl LoadedImage {
    pub fn new(path: impl Into<PathBuf>, pixels: RgbaImage) -> Self {
        Self {
            path: path.into(),
            pixels,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// The image extent in image coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f32, self.height() as f32)
    }

    /// Pixels for GPU upload, downscaled when an edge exceeds `max_dimension`.
    ///
    /// Annotations keep using the full-resolution coordinate space; only the
    /// texture is smaller.
    pub fn texture_data(&self, max_dimension: u32) -> (Cow<'_, [u8]>, u32, u32) {
        let (w, h) = (self.width(), self.height());
        if w <= max_dimension && h <= max_dimension {
            return (Cow::Borrowed(self.pixels()), w, h);
        }

        let scale = max_dimension as f32 / w.max(h) as f32;
        let new_w = ((w as f32 * scale).round() as u32).clamp(1, max_dimension);
        let new_h = ((h as f32 * scale).round() as u32).clamp(1, max_dimension);
        log::debug!(
            "Downscaling {} from {}x{} to {}x{} for upload",
            self.file_name(),
            w,
            h,
            new_w,
            new_h
        );
        let resized = image::imageops::resize(&self.pixels, new_w, new_h, FilterType::Triangle);
        (Cow::Owned(resized.into_raw()), new_w, new_h)
    }
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let bytes = std::fs::read(path).map_err(|e| AppError::io(path, e))?;
    decode_image(path, &bytes)
}

/// Decode image bytes; `path` is kept for display and error messages.
pub fn decode_image(path: &Path, bytes: &[u8]) -> Result<LoadedImage> {
    let decoded = image::load_from_memory(bytes).map_err(|source| AppError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let pixels = decoded.to_rgba8();

    log::info!(
        "Loaded {} ({}x{})",
        path.display(),
        pixels.width(),
        pixels.height()
    );

    Ok(LoadedImage::new(path, pixels))
}
