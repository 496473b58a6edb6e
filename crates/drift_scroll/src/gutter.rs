//! Gutter detection and scroll velocity
//!
//! A gutter is a band of width `size` along each edge of the container,
//! measured inward. While the pointer is inside a gutter the container
//! scrolls toward that edge, faster the deeper the pointer is:
//!
//! ```text
//!          left edge                                  right edge
//!              |<- size ->|                    |<- size ->|
//!   bounds.left           edge_left    edge_right          bounds.right
//!   scroll left <---------|    (no motion)     |---------> scroll right
//! ```
//!
//! The speed is zero at the inner gutter line and grows linearly with
//! penetration depth, without a cap; it keeps growing when the pointer
//! leaves the container entirely. Axes are independent, so a corner
//! produces motion on both.

use drift_core::{Point, Rect, Size, Vec2};

/// Which gutters a pointer position falls in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GutterHit {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl GutterHit {
    /// True when the pointer is outside every gutter
    pub fn is_empty(&self) -> bool {
        !(self.top || self.bottom || self.left || self.right)
    }

    pub fn horizontal(&self) -> bool {
        self.left || self.right
    }

    pub fn vertical(&self) -> bool {
        self.top || self.bottom
    }
}

/// The four inner gutter lines of a container
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gutter {
    /// `bounds.top + size`
    pub edge_top: f32,
    /// `bounds.bottom - size`
    pub edge_bottom: f32,
    /// `bounds.left + size`
    pub edge_left: f32,
    /// `bounds.right - size`
    pub edge_right: f32,
}

impl Gutter {
    pub fn new(bounds: Rect, size: f32) -> Self {
        Self {
            edge_top: bounds.top() + size,
            edge_bottom: bounds.bottom() - size,
            edge_left: bounds.left() + size,
            edge_right: bounds.right() - size,
        }
    }

    /// Classify a pointer position against all four gutters
    ///
    /// Positions exactly on a gutter line are outside it.
    pub fn hit(&self, pointer: Point) -> GutterHit {
        GutterHit {
            top: pointer.y < self.edge_top,
            bottom: pointer.y > self.edge_bottom,
            left: pointer.x < self.edge_left,
            right: pointer.x > self.edge_right,
        }
    }

    /// Per-frame scroll delta for a pointer position
    ///
    /// Each gutter the pointer is in contributes its penetration depth
    /// times `intensity`, negative toward the left/top.
    pub fn velocity(&self, pointer: Point, intensity: f32) -> Vec2 {
        let hit = self.hit(pointer);
        let mut delta = Vec2::ZERO;

        if hit.left {
            delta.x -= (self.edge_left - pointer.x) * intensity;
        }
        if hit.right {
            delta.x += (pointer.x - self.edge_right) * intensity;
        }
        if hit.top {
            delta.y -= (self.edge_top - pointer.y) * intensity;
        }
        if hit.bottom {
            delta.y += (pointer.y - self.edge_bottom) * intensity;
        }

        delta
    }
}

/// Apply a delta to a scroll offset
///
/// Rounds half up to whole units, then clamps each axis to
/// `[0, scroll_size]`. A zero or negative scroll size collapses the axis
/// to 0.
pub fn corrected_offset(current: Point, delta: Vec2, scroll_size: Size) -> Point {
    Point::new(
        round_half_up(current.x + delta.x).clamp(0.0, scroll_size.width.max(0.0)),
        round_half_up(current.y + delta.y).clamp(0.0, scroll_size.height.max(0.0)),
    )
}

fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gutter() -> Gutter {
        Gutter::new(Rect::from_edges(0.0, 0.0, 500.0, 300.0), 50.0)
    }

    #[test]
    fn test_edges() {
        let g = gutter();
        assert_eq!(g.edge_top, 50.0);
        assert_eq!(g.edge_bottom, 250.0);
        assert_eq!(g.edge_left, 50.0);
        assert_eq!(g.edge_right, 450.0);
    }

    #[test]
    fn test_no_motion_inside_dead_zone() {
        let g = gutter();
        for x in [50.0, 51.0, 250.0, 449.0, 450.0] {
            for y in [50.0, 150.0, 250.0] {
                let p = Point::new(x, y);
                assert!(g.hit(p).is_empty(), "{p:?} should be outside every gutter");
                assert!(g.velocity(p, 0.2).is_zero());
            }
        }
    }

    #[test]
    fn test_right_gutter_past_bounds() {
        let g = gutter();
        let p = Point::new(520.0, 150.0);
        let hit = g.hit(p);
        assert!(hit.right && !hit.left && !hit.vertical());
        assert!((g.velocity(p, 0.2).x - 14.0).abs() < 1e-4);
        assert_eq!(g.velocity(p, 0.2).y, 0.0);
    }

    #[test]
    fn test_left_and_top_scroll_negative() {
        let g = gutter();
        let left = g.velocity(Point::new(10.0, 150.0), 0.2);
        assert!((left.x + 8.0).abs() < 1e-4);

        let top = g.velocity(Point::new(250.0, 0.0), 0.2);
        assert!((top.y + 10.0).abs() < 1e-4);

        let bottom = g.velocity(Point::new(250.0, 290.0), 0.2);
        assert!((bottom.y - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_speed_ramp_is_linear_in_depth() {
        let g = gutter();
        let mut previous = 0.0;
        for depth in 1..=40 {
            let depth = depth as f32;
            let speed = g.velocity(Point::new(450.0 + depth, 150.0), 0.2).x;
            assert!(speed > previous);
            assert!((speed - depth * 0.2).abs() < 1e-4);
            previous = speed;
        }
    }

    #[test]
    fn test_corner_moves_both_axes() {
        let g = gutter();
        let p = Point::new(20.0, 30.0);
        let hit = g.hit(p);
        assert!(hit.left && hit.top);

        let delta = g.velocity(p, 0.2);
        assert!((delta.x + 6.0).abs() < 1e-4);
        assert!((delta.y + 4.0).abs() < 1e-4);

        // Each axis matches what the single-axis gutter gives
        assert_eq!(delta.x, g.velocity(Point::new(20.0, 150.0), 0.2).x);
        assert_eq!(delta.y, g.velocity(Point::new(250.0, 30.0), 0.2).y);
    }

    #[test]
    fn test_overlapping_gutters_sum() {
        // 80 wide with 50 gutters: left and right overlap between 30 and 50
        let g = Gutter::new(Rect::from_edges(0.0, 0.0, 80.0, 300.0), 50.0);
        let p = Point::new(40.0, 150.0);
        let hit = g.hit(p);
        assert!(hit.left && hit.right);
        // -(50 - 40) + (40 - 30) = 0
        assert_eq!(g.velocity(p, 1.0).x, 0.0);
    }

    #[test]
    fn test_corrected_offset_rounds_and_clamps() {
        let size = Size::new(1000.0, 600.0);
        assert_eq!(
            corrected_offset(Point::new(100.0, 100.0), Vec2::new(14.0, -2.5), size),
            Point::new(114.0, 98.0)
        );
        assert_eq!(
            corrected_offset(Point::new(100.0, 100.0), Vec2::new(0.4, 0.5), size),
            Point::new(100.0, 101.0)
        );
        assert_eq!(
            corrected_offset(Point::new(995.0, 3.0), Vec2::new(14.0, -8.0), size),
            Point::new(1000.0, 0.0)
        );
    }

    #[test]
    fn test_corrected_offset_always_in_range() {
        let size = Size::new(300.0, 0.0);
        for delta in [-1e6_f32, -17.3, -0.5, 0.0, 0.49, 12.0, 1e6] {
            let next = corrected_offset(Point::new(150.0, 0.0), Vec2::new(delta, delta), size);
            assert!((0.0..=300.0).contains(&next.x));
            assert_eq!(next.y, 0.0);
        }
    }

    #[test]
    fn test_negative_scroll_size_collapses_axis() {
        let next = corrected_offset(Point::ZERO, Vec2::new(10.0, 10.0), Size::new(-5.0, 20.0));
        assert_eq!(next, Point::new(0.0, 10.0));
    }
}
