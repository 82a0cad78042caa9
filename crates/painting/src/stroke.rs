//! Segment rasterization for strokes

use tracing::debug;

use crate::surface::CpuSurface;
use crate::types::{Point, StrokeSegment};

impl CpuSurface {
    /// Draw a round-capped line segment (a capsule) onto the surface.
    ///
    /// Every pixel whose center lies within `width / 2` of the segment is
    /// painted, as is the pixel containing each endpoint so that thin or
    /// zero-length segments still leave a mark.
    ///
    /// Returns the bounding box of the affected region (x, y, width, height),
    /// or None if the segment is completely outside the surface.
    pub fn draw_segment(&mut self, segment: &StrokeSegment) -> Option<(u32, u32, u32, u32)> {
        let StrokeSegment {
            from,
            to,
            width,
            color,
        } = *segment;

        if width == 0 || !from.is_finite() || !to.is_finite() {
            debug!("  -> skipped: zero width or non-finite endpoint");
            return None;
        }

        let radius = width as f32 / 2.0;
        let radius_sq = radius * radius;

        // Bounding box of the capsule
        let x_min_f = (from.x.min(to.x) - radius).floor();
        let y_min_f = (from.y.min(to.y) - radius).floor();
        let x_max_f = (from.x.max(to.x) + radius).ceil();
        let y_max_f = (from.y.max(to.y) + radius).ceil();

        // Clamp to surface bounds
        let x_min = (x_min_f.max(0.0) as u32).min(self.width);
        let y_min = (y_min_f.max(0.0) as u32).min(self.height);
        let x_max = (x_max_f.max(0.0) as u32).min(self.width);
        let y_max = (y_max_f.max(0.0) as u32).min(self.height);

        if x_min >= x_max || y_min >= y_max {
            return None;
        }

        for py in y_min..y_max {
            for px in x_min..x_max {
                let center = Point::new(px as f32 + 0.5, py as f32 + 0.5);
                if distance_sq_to_segment(center, from, to) <= radius_sq {
                    self.set_pixel(px, py, color);
                }
            }
        }

        for endpoint in [from, to] {
            if let Some((px, py)) = self.pixel_containing(endpoint) {
                self.set_pixel(px, py, color);
            }
        }

        Some((x_min, y_min, x_max - x_min, y_max - y_min))
    }

    /// The pixel a point falls in, if it is on the surface
    fn pixel_containing(&self, point: Point) -> Option<(u32, u32)> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let (px, py) = (point.x.floor() as u32, point.y.floor() as u32);
        (px < self.width && py < self.height).then_some((px, py))
    }
}

/// Squared distance from `p` to the closest point on segment `a`-`b`
#[inline]
pub fn distance_sq_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    let t = if len_sq <= f32::EPSILON {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };

    let cx = a.x + dx * t - p.x;
    let cy = a.y + dy * t - p.y;
    cx * cx + cy * cy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn segment(from: (f32, f32), to: (f32, f32), width: u32) -> StrokeSegment {
        StrokeSegment {
            from: from.into(),
            to: to.into(),
            width,
            color: Color::BLACK,
        }
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((distance_sq_to_segment(Point::new(5.0, 3.0), a, b) - 9.0).abs() < 1e-4);
        // Beyond the end clamps to the endpoint
        assert!((distance_sq_to_segment(Point::new(13.0, 4.0), a, b) - 25.0).abs() < 1e-4);
        // Degenerate segment
        assert!((distance_sq_to_segment(Point::new(3.0, 4.0), a, a) - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_horizontal_line() {
        let mut surface = CpuSurface::new(50, 20);
        let rect = surface.draw_segment(&segment((10.0, 10.0), (40.0, 10.0), 4));
        assert!(rect.is_some());

        // Along the line
        assert_eq!(surface.get_pixel(25, 10), Some(Color::BLACK.to_rgba()));
        assert_eq!(surface.get_pixel(25, 9), Some(Color::BLACK.to_rgba()));
        // Well away from the line
        assert_eq!(surface.get_pixel(25, 2), Some(Color::WHITE.to_rgba()));
        assert_eq!(surface.get_pixel(45, 10), Some(Color::WHITE.to_rgba()));
    }

    #[test]
    fn test_round_cap_extends_past_endpoint() {
        let mut surface = CpuSurface::new(50, 20);
        surface.draw_segment(&segment((10.0, 10.0), (40.0, 10.0), 8));
        // Cap reaches ~4px past the end
        assert_eq!(surface.get_pixel(42, 10), Some(Color::BLACK.to_rgba()));
        assert_eq!(surface.get_pixel(7, 10), Some(Color::BLACK.to_rgba()));
    }

    #[test]
    fn test_zero_length_segment_marks_pixel() {
        let mut surface = CpuSurface::new(20, 20);
        surface.draw_segment(&segment((10.0, 10.0), (10.0, 10.0), 1));
        assert_eq!(surface.get_pixel(10, 10), Some(Color::BLACK.to_rgba()));
        assert!(surface.painted_pixel_count() >= 1);
    }

    #[test]
    fn test_outside_surface() {
        let mut surface = CpuSurface::new(20, 20);
        let rect = surface.draw_segment(&segment((-50.0, -50.0), (-40.0, -40.0), 4));
        assert!(rect.is_none());
        assert!(surface.is_blank());
    }

    #[test]
    fn test_clipped_at_edges() {
        let mut surface = CpuSurface::new(20, 20);
        let rect = surface.draw_segment(&segment((-10.0, 5.0), (30.0, 5.0), 2));
        assert_eq!(rect, Some((0, 4, 20, 2)));
        assert_eq!(surface.get_pixel(0, 5), Some(Color::BLACK.to_rgba()));
        assert_eq!(surface.get_pixel(19, 5), Some(Color::BLACK.to_rgba()));
    }

    #[test]
    fn test_non_finite_ignored() {
        let mut surface = CpuSurface::new(20, 20);
        assert!(surface
            .draw_segment(&segment((f32::NAN, 1.0), (5.0, 5.0), 3))
            .is_none());
        assert!(surface.is_blank());
    }
}
