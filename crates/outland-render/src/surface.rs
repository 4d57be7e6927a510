//! Offscreen drawing target standing in for the window canvas.

use std::path::Path;

use image::{ImageFormat, ImageResult, Rgba, RgbaImage};

use crate::error::RenderError;

/// Largest accepted side length.
pub const MAX_SURFACE_SIZE: u32 = 16_384;

pub const BACKGROUND: Rgba<u8> = Rgba([12, 14, 20, 255]);

pub struct Surface {
    image: RgbaImage,
}

fn check(width: u32, height: u32) -> Result<(), RenderError> {
    if width == 0 || height == 0 || width > MAX_SURFACE_SIZE || height > MAX_SURFACE_SIZE {
        return Err(RenderError::SurfaceUnavailable { width, height });
    }
    Ok(())
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        check(width, height)?;
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, BACKGROUND),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Reallocate at a new size. Contents are reset to the background.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        check(width, height)?;
        self.image = RgbaImage::from_pixel(width, height, BACKGROUND);
        Ok(())
    }

    pub fn clear(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.image.save_with_format(path, ImageFormat::Png)
    }
}
