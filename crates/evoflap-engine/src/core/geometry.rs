/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl Circle {
    #[must_use]
    pub const fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self {
            center_x,
            center_y,
            radius,
        }
    }

    /// Returns `true` if the circle's interior overlaps the rectangle.
    ///
    /// Touching edges do not count as an intersection. Empty rectangles never
    /// intersect anything.
    #[must_use]
    pub fn intersects(&self, rect: &Rect) -> bool {
        if rect.is_empty() {
            return false;
        }
        let nearest_x = self.center_x.clamp(rect.x, rect.right());
        let nearest_y = self.center_y.clamp(rect.y, rect.bottom());
        let dx = self.center_x - nearest_x;
        let dy = self.center_y - nearest_y;
        dx * dx + dy * dy < self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_inside_rect() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(Circle::new(5.0, 5.0, 1.0).intersects(&rect));
    }

    #[test]
    fn test_overlapping_edge() {
        let rect = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(Circle::new(8.0, 5.0, 3.0).intersects(&rect));
        assert!(!Circle::new(7.0, 5.0, 3.0).intersects(&rect));
    }

    #[test]
    fn test_corner_uses_euclidean_distance() {
        let rect = Rect::new(10.0, 10.0, 10.0, 10.0);
        // Distance to corner is sqrt(2) * 2 ≈ 2.83
        assert!(!Circle::new(8.0, 8.0, 2.5).intersects(&rect));
        assert!(Circle::new(8.0, 8.0, 3.0).intersects(&rect));
    }

    #[test]
    fn test_empty_rect_never_intersects() {
        let rect = Rect::new(0.0, 0.0, 0.0, 10.0);
        assert!(!Circle::new(0.0, 5.0, 100.0).intersects(&rect));
    }
}
