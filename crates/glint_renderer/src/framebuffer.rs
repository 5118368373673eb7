//! Render target storing linear colors.

use std::path::Path;

use glint_core::Color;

/// Convert a linear color to 8-bit RGBA.
///
/// Channels are clamped to `[0, 1]` and scaled; no gamma is applied.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * color.x.clamp(0.0, 1.0)) as u8;
    let g = (255.0 * color.y.clamp(0.0, 1.0)) as u8;
    let b = (255.0 * color.z.clamp(0.0, 1.0)) as u8;
    [r, g, b, 255]
}

/// Image buffer for storing render output.
///
/// Pixels are linear RGB in row-major order with `(0, 0)` at the top-left
/// corner.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width * height],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        self.pixels[y * self.width + x] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.width * self.height * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Write the image to `path` as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.to_rgba8(),
            self.width as u32,
            self.height as u32,
            image::ColorType::Rgba8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Vec3;

    #[test]
    fn test_new_buffer_is_black() {
        let image = Framebuffer::new(4, 3);
        assert_eq!(image.pixels.len(), 12);
        assert!(image.pixels.iter().all(|&p| p == Color::ZERO));
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut image = Framebuffer::new(4, 3);
        let red = Vec3::new(1.0, 0.0, 0.0);
        image.set(3, 2, red);
        assert_eq!(image.get(3, 2), red);
        assert_eq!(image.get(0, 0), Color::ZERO);
        // (3, 2) is the last slot in row-major order.
        assert_eq!(image.pixels[11], red);
    }

    #[test]
    fn test_rgba_clamps_out_of_range_channels() {
        assert_eq!(color_to_rgba(Vec3::new(2.0, 1.0, -0.5)), [255, 255, 0, 255]);
        assert_eq!(color_to_rgba(Vec3::ZERO), [0, 0, 0, 255]);
    }

    #[test]
    fn test_rgba_bytes_follow_pixel_order() {
        let mut image = Framebuffer::new(2, 1);
        image.set(0, 0, Vec3::new(1.0, 0.0, 0.0));
        image.set(1, 0, Vec3::new(0.0, 1.0, 0.0));
        let bytes = image.to_rgba8();
        assert_eq!(bytes, vec![255, 0, 0, 255, 0, 255, 0, 255]);
    }
}
