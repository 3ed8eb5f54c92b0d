//! Image-space geometry.
//!
//! All coordinates are in image pixels with the origin at the top-left corner
//! of the image and y growing downwards.

/// A 2D point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An axis-aligned rectangle given by its top-left corner and a non-negative size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner X coordinate
    pub x: f32,
    /// Top-left corner Y coordinate
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-size rectangle sitting on a point.
    pub fn at(point: Point) -> Self {
        Self::new(point.x, point.y, 0.0, 0.0)
    }

    /// The rectangle spanned by two corners, whatever their relative position.
    ///
    /// The origin is the component-wise minimum and the size the absolute
    /// difference, so dragging up-left from an anchor gives the same rectangle
    /// as dragging down-right to it.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// A circle in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Point, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.center.distance_to(point) <= self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_down_right() {
        let r = Rect::from_corners(Point::new(10.0, 10.0), Point::new(50.0, 30.0));
        assert_eq!(r, Rect::new(10.0, 10.0, 40.0, 20.0));
    }

    #[test]
    fn test_from_corners_up_left() {
        let r = Rect::from_corners(Point::new(50.0, 30.0), Point::new(10.0, 10.0));
        assert_eq!(r, Rect::new(10.0, 10.0, 40.0, 20.0));
    }

    #[test]
    fn test_from_corners_mixed_directions() {
        // Drag right and up
        let r = Rect::from_corners(Point::new(10.0, 30.0), Point::new(25.0, 5.0));
        assert_eq!(r, Rect::new(10.0, 5.0, 15.0, 25.0));
        assert_eq!(r.bottom_right(), Point::new(25.0, 30.0));
    }

    #[test]
    fn test_zero_size_rect() {
        let r = Rect::at(Point::new(3.0, 4.0));
        assert_eq!((r.width, r.height), (0.0, 0.0));
        assert!(r.contains(&Point::new(3.0, 4.0)));
        assert_eq!(r.origin(), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_circle_contains() {
        let c = Circle::new(Point::new(20.0, 20.0), 10.0);
        assert!(c.contains(&Point::new(26.0, 28.0)));
        assert!(!c.contains(&Point::new(30.0, 30.0)));
    }
}
