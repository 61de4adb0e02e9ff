//! Layout-unit geometry primitives
//!
//! All evasion math runs in abstract f32 layout units; the TUI maps
//! terminal cells into this space before calling in.

/// A point in layout units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An axis-aligned rectangle in layout units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

fn clamp(n: f32, min: f32, max: f32) -> f32 {
    n.max(min).min(max)
}

/// Clamp a control's top-left offset so its full rectangle stays inside the
/// zone, inset by `padding` on all sides.
///
/// Offsets are zone-local. If the zone is too small to hold the control plus
/// padding on an axis, the control is centered on that axis instead; the
/// clamp range never inverts.
pub fn clamp_into_zone(
    pos: Point,
    zone_width: f32,
    zone_height: f32,
    control_width: f32,
    control_height: f32,
    padding: f32,
) -> Point {
    let max_x = zone_width - control_width - padding;
    let max_y = zone_height - control_height - padding;

    let x = if max_x < padding {
        (zone_width - control_width) / 2.0
    } else {
        clamp(pos.x, padding, max_x)
    };
    let y = if max_y < padding {
        (zone_height - control_height) / 2.0
    } else {
        clamp(pos.y, padding, max_y)
    };

    Point::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rect_center() {
        let r = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(r.center(), Point::new(60.0, 40.0));
    }

    #[test]
    fn test_clamp_within_bounds() {
        // Zone 500x180, control 120x50, padding 15 -> valid range [15,15]..[365,115]
        let p = clamp_into_zone(Point::new(-50.0, 400.0), 500.0, 180.0, 120.0, 50.0, 15.0);
        assert_eq!(p, Point::new(15.0, 115.0));

        let p = clamp_into_zone(Point::new(600.0, -20.0), 500.0, 180.0, 120.0, 50.0, 15.0);
        assert_eq!(p, Point::new(365.0, 15.0));
    }

    #[test]
    fn test_clamp_passes_through_interior_positions() {
        let p = clamp_into_zone(Point::new(100.0, 60.0), 500.0, 180.0, 120.0, 50.0, 15.0);
        assert_eq!(p, Point::new(100.0, 60.0));
    }

    #[test]
    fn test_clamp_centers_when_zone_too_small() {
        // Zone narrower than control + padding: never invert, center instead
        let p = clamp_into_zone(Point::new(0.0, 0.0), 100.0, 180.0, 120.0, 50.0, 15.0);
        assert_eq!(p.x, (100.0 - 120.0) / 2.0);
        assert_eq!(p.y, 15.0);
    }
}
