//! Drawing surface
//!
//! This module connects pointer input to the raster surface:
//! - Input comes in via `begin_stroke`, `extend_stroke`, `end_stroke`
//! - Each extension becomes a `StrokeSegment` styled by the current brush
//! - Segments are rasterized onto the CPU surface immediately
//!
//! The surface does not depend on any UI framework. The host forwards
//! pointer down/move/up/leave events to it, one at a time.

use doodle_config::CanvasConfig;
use tracing::{debug, info};

use crate::brush::BrushSettings;
use crate::constants::BACKGROUND_COLOR;
use crate::surface::CpuSurface;
use crate::types::{Color, Point, StrokeSegment};

/// Whether a pointer is currently held down on the surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    /// No open stroke. Extensions are ignored.
    #[default]
    Idle,
    /// A stroke is open; `last` is where the next segment starts.
    Stroking { last: Point },
}

/// A raster canvas with freehand stroke input
pub struct DrawingSurface {
    /// CPU surface holding the bitmap
    surface: CpuSurface,
    /// Style applied to newly drawn segments
    brush: BrushSettings,
    state: StrokeState,
    /// Segments drawn since creation or the last clear
    segments: Vec<StrokeSegment>,
}

impl DrawingSurface {
    /// Create a new white surface with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface: CpuSurface::new(width, height),
            brush: BrushSettings::default(),
            state: StrokeState::Idle,
            segments: Vec::new(),
        }
    }

    pub fn from_config(config: &CanvasConfig) -> Self {
        Self::new(config.width, config.height)
    }

    pub fn width(&self) -> u32 {
        self.surface.width
    }

    pub fn height(&self) -> u32 {
        self.surface.height
    }

    /// Read-only access to the bitmap
    pub fn surface(&self) -> &CpuSurface {
        &self.surface
    }

    pub fn settings(&self) -> &BrushSettings {
        &self.brush
    }

    /// Set brush width for subsequent segments (clamped to the allowed range)
    pub fn set_brush_width(&mut self, width: u32) {
        self.brush.set_width(width);
    }

    /// Set brush color for subsequent segments
    pub fn set_brush_color(&mut self, color: Color) {
        self.brush.set_color(color);
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self.state, StrokeState::Stroking { .. })
    }

    pub fn segments(&self) -> &[StrokeSegment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Open a stroke at `point`. Draws nothing on its own.
    ///
    /// A stroke that is already open is restarted at `point`.
    pub fn begin_stroke(&mut self, point: Point) {
        debug!("begin_stroke at ({:.1}, {:.1})", point.x, point.y);
        self.state = StrokeState::Stroking { last: point };
    }

    /// Draw a segment from the last point to `point` with the current brush
    ///
    /// Returns the affected region, or None if no stroke is open or the
    /// segment missed the surface entirely.
    pub fn extend_stroke(&mut self, point: Point) -> Option<(u32, u32, u32, u32)> {
        let StrokeState::Stroking { last } = self.state else {
            return None;
        };

        let segment = StrokeSegment {
            from: last,
            to: point,
            width: self.brush.width(),
            color: self.brush.color(),
        };
        self.state = StrokeState::Stroking { last: point };

        let region = self.surface.draw_segment(&segment);
        debug!(
            "extend_stroke ({:.1}, {:.1}) -> ({:.1}, {:.1}) width={} color={} region={:?}",
            last.x,
            last.y,
            point.x,
            point.y,
            segment.width,
            segment.color.to_hex(),
            region
        );
        self.segments.push(segment);
        region
    }

    /// Close the open stroke. Does nothing if none is open.
    pub fn end_stroke(&mut self) {
        if self.is_stroking() {
            debug!("end_stroke");
        }
        self.state = StrokeState::Idle;
    }

    /// The pointer left the surface; behaves exactly like `end_stroke`
    pub fn pointer_leave(&mut self) {
        self.end_stroke();
    }

    /// Reset the bitmap to solid white and discard all segments
    ///
    /// Irreversible. Any open stroke is closed.
    pub fn clear(&mut self) {
        info!(
            "Clearing canvas ({} segments discarded)",
            self.segments.len()
        );
        self.surface.fill(BACKGROUND_COLOR);
        self.segments.clear();
        self.state = StrokeState::Idle;
    }
}
