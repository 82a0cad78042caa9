//! CPU surface for drawing - RGBA8 storage

use crate::constants::BACKGROUND_COLOR;
use crate::types::Color;

/// An RGBA8 CPU surface
/// Stores pixels as [u8; 4] in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuSurface {
    /// Surface dimensions
    pub width: u32,
    pub height: u32,
    pixels: Vec<[u8; 4]>,
}

impl CpuSurface {
    /// Create a new surface with the given dimensions, initialized to opaque white
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![BACKGROUND_COLOR.to_rgba(); pixel_count],
        }
    }

    /// Fill the whole surface with a solid color
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.to_rgba());
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        Some(self.pixels[index])
    }

    /// Set a pixel at the given coordinates
    /// Does nothing if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        self.pixels[index] = color.to_rgba();
    }

    /// Raw RGBA8 bytes, row-major, suitable for encoding
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Get the total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// True if every pixel is the background color
    pub fn is_blank(&self) -> bool {
        let background = BACKGROUND_COLOR.to_rgba();
        self.pixels.iter().all(|p| *p == background)
    }

    /// Count of pixels differing from the background
    pub fn painted_pixel_count(&self) -> usize {
        let background = BACKGROUND_COLOR.to_rgba();
        self.pixels.iter().filter(|p| **p != background).count()
    }
}
