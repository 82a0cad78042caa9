//! Brush settings
//!
//! Width and color are read by every segment drawn after they change.
//! Already rendered pixels are never touched by a settings change.

use doodle_config::{DEFAULT_BRUSH_WIDTH, MAX_BRUSH_WIDTH, MIN_BRUSH_WIDTH};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::Color;

/// Current brush style for a drawing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushSettings {
    width: u32,
    color: Color,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_BRUSH_WIDTH,
            color: Color::BLACK,
        }
    }
}

impl BrushSettings {
    /// Create settings, clamping width into the allowed range
    pub fn new(width: u32, color: Color) -> Self {
        Self {
            width: clamp_width(width),
            color,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Set the line width, clamped to `MIN_BRUSH_WIDTH..=MAX_BRUSH_WIDTH`
    pub fn set_width(&mut self, width: u32) {
        let clamped = clamp_width(width);
        if clamped != width {
            debug!("Brush width {} clamped to {}", width, clamped);
        }
        self.width = clamped;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

#[inline]
fn clamp_width(width: u32) -> u32 {
    width.clamp(MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = BrushSettings::default();
        assert_eq!(settings.width(), 5);
        assert_eq!(settings.color(), Color::BLACK);
    }

    #[test]
    fn test_width_clamped() {
        let mut settings = BrushSettings::default();
        settings.set_width(0);
        assert_eq!(settings.width(), MIN_BRUSH_WIDTH);
        settings.set_width(500);
        assert_eq!(settings.width(), MAX_BRUSH_WIDTH);
        settings.set_width(12);
        assert_eq!(settings.width(), 12);

        assert_eq!(BrushSettings::new(99, Color::WHITE).width(), MAX_BRUSH_WIDTH);
    }
}
