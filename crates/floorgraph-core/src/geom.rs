use serde::{Deserialize, Serialize};

/// Integer pixel position, `x` growing right and `y` growing down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance. This is the cost metric used by both
    /// search stages; it is kept squared on purpose (no square root), so it
    /// does not satisfy the triangle inequality across multiple hops.
    #[inline]
    pub fn squared_distance(self, other: Self) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx * dx + dy * dy
    }
}

/// Axis-aligned rectangle with inclusive pixel bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub min: PixelPos,
    pub max: PixelPos,
}

impl Rect {
    /// Build a rectangle from two opposite corners in any order.
    pub fn from_corners(a: PixelPos, b: PixelPos) -> Self {
        Self {
            min: PixelPos::new(a.x.min(b.x), a.y.min(b.y)),
            max: PixelPos::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Integer centroid of the rectangle.
    #[inline]
    pub fn center(&self) -> PixelPos {
        PixelPos::new((self.min.x + self.max.x) / 2, (self.min.y + self.max.y) / 2)
    }

    /// Width in pixels (inclusive bounds).
    #[inline]
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    /// Height in pixels (inclusive bounds).
    #[inline]
    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }

    /// Expand the bounds by `margin` pixels on each side.
    pub fn grow(&self, margin: i32) -> Self {
        Self {
            min: PixelPos::new(self.min.x - margin, self.min.y - margin),
            max: PixelPos::new(self.max.x + margin, self.max.y + margin),
        }
    }

    /// Strict interior test: points on the boundary are excluded.
    #[inline]
    pub fn contains_open(&self, p: PixelPos) -> bool {
        self.min.x < p.x && p.x < self.max.x && self.min.y < p.y && p.y < self.max.y
    }

    /// The four corner points, clockwise from the top-left.
    pub fn corners(&self) -> [PixelPos; 4] {
        [
            self.min,
            PixelPos::new(self.max.x, self.min.y),
            self.max,
            PixelPos::new(self.min.x, self.max.y),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_rounds_down() {
        let r = Rect::from_corners(PixelPos::new(18, 8), PixelPos::new(20, 11));
        assert_eq!(r.center(), PixelPos::new(19, 9));
    }

    #[test]
    fn from_corners_normalizes_order() {
        let r = Rect::from_corners(PixelPos::new(9, 2), PixelPos::new(3, 7));
        assert_eq!(r.min, PixelPos::new(3, 2));
        assert_eq!(r.max, PixelPos::new(9, 7));
        assert_eq!(r.width(), 7);
        assert_eq!(r.height(), 6);
    }

    #[test]
    fn contains_open_excludes_boundary() {
        let r = Rect::from_corners(PixelPos::new(0, 0), PixelPos::new(10, 10));
        assert!(r.contains_open(PixelPos::new(5, 5)));
        assert!(!r.contains_open(PixelPos::new(0, 5)));
        assert!(!r.contains_open(PixelPos::new(10, 5)));
        assert!(!r.contains_open(PixelPos::new(5, 10)));
        assert!(!r.contains_open(PixelPos::new(11, 5)));
    }

    #[test]
    fn squared_distance_is_symmetric() {
        let a = PixelPos::new(4, 4);
        let b = PixelPos::new(12, 1);
        assert_eq!(a.squared_distance(b), 64 + 9);
        assert_eq!(a.squared_distance(b), b.squared_distance(a));
    }
}
