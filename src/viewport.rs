//! Mapping between window pixels and image coordinates.
//!
//! The image is fitted into the window keeping its aspect ratio and centered,
//! leaving letterbox bars on two sides. When axes are shown a margin is kept
//! free on every side for the frame and tick marks.

use crate::geometry::{Point, Rect};

/// Letterbox fit of an image into a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Window pixels per image pixel
    scale: f32,
    /// Window position of the image's top-left corner
    offset_x: f32,
    offset_y: f32,
    image_width: f32,
    image_height: f32,
}

impl Viewport {
    /// Fit an image of `image_size` into a window of `window_size`, keeping
    /// `margin` pixels free on every side.
    pub fn fit(window_size: (f32, f32), image_size: (f32, f32), margin: f32) -> Self {
        let (window_w, window_h) = window_size;
        let (image_w, image_h) = image_size;

        let available_w = (window_w - 2.0 * margin).max(0.0);
        let available_h = (window_h - 2.0 * margin).max(0.0);

        let scale = if image_w > 0.0 && image_h > 0.0 {
            (available_w / image_w).min(available_h / image_h)
        } else {
            0.0
        };

        Self {
            scale,
            offset_x: (window_w - image_w * scale) / 2.0,
            offset_y: (window_h - image_h * scale) / 2.0,
            image_width: image_w,
            image_height: image_h,
        }
    }

    /// Window pixels per image pixel.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Whether any part of the image is visible.
    pub fn is_visible(&self) -> bool {
        self.scale > 0.0
    }

    /// The area covered by the image, in window pixels.
    pub fn image_rect(&self) -> Rect {
        Rect::new(
            self.offset_x,
            self.offset_y,
            self.image_width * self.scale,
            self.image_height * self.scale,
        )
    }

    /// Image coordinates under a window position.
    ///
    /// `None` when the position is in the letterbox bars, the margin, or when
    /// the image is not visible at all.
    pub fn to_image(&self, window_x: f32, window_y: f32) -> Option<Point> {
        if !self.is_visible() {
            return None;
        }
        let x = (window_x - self.offset_x) / self.scale;
        let y = (window_y - self.offset_y) / self.scale;
        let inside = (0.0..=self.image_width).contains(&x) && (0.0..=self.image_height).contains(&y);
        inside.then_some(Point::new(x, y))
    }

    /// Window position of an image point.
    pub fn to_window(&self, point: Point) -> (f32, f32) {
        (
            self.offset_x + point.x * self.scale,
            self.offset_y + point.y * self.scale,
        )
    }

    /// An image-space rectangle in window pixels.
    pub fn rect_to_window(&self, rect: &Rect) -> Rect {
        let (x, y) = self.to_window(rect.origin());
        Rect::new(x, y, rect.width * self.scale, rect.height * self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_wide_window_letterboxes_horizontally() {
        let vp = Viewport::fit((800.0, 400.0), (200.0, 200.0), 0.0);
        assert!(approx_eq(vp.scale(), 2.0));
        assert_eq!(vp.image_rect(), Rect::new(200.0, 0.0, 400.0, 400.0));
    }

    #[test]
    fn test_tall_window_letterboxes_vertically() {
        let vp = Viewport::fit((300.0, 900.0), (100.0, 50.0), 0.0);
        assert!(approx_eq(vp.scale(), 3.0));
        assert_eq!(vp.image_rect(), Rect::new(0.0, 375.0, 300.0, 150.0));
    }

    #[test]
    fn test_margin_shrinks_image_area() {
        let vp = Viewport::fit((520.0, 520.0), (100.0, 100.0), 10.0);
        assert!(approx_eq(vp.scale(), 5.0));
        assert_eq!(vp.image_rect(), Rect::new(10.0, 10.0, 500.0, 500.0));
        assert!(vp.to_image(5.0, 260.0).is_none());
    }

    #[test]
    fn test_round_trip() {
        let vp = Viewport::fit((1024.0, 768.0), (640.0, 480.0), 32.0);
        for p in [Point::new(0.0, 0.0), Point::new(320.5, 17.25), Point::new(639.0, 479.0)] {
            let (wx, wy) = vp.to_window(p);
            let back = vp.to_image(wx, wy).unwrap();
            assert!(approx_eq(back.x, p.x), "{:?} -> {:?}", p, back);
            assert!(approx_eq(back.y, p.y), "{:?} -> {:?}", p, back);
        }
    }

    #[test]
    fn test_letterbox_bars_are_undefined() {
        let vp = Viewport::fit((800.0, 400.0), (200.0, 200.0), 0.0);
        assert!(vp.to_image(100.0, 200.0).is_none());
        assert!(vp.to_image(700.0, 200.0).is_none());
        assert_eq!(vp.to_image(400.0, 200.0), Some(Point::new(100.0, 100.0)));
    }

    #[test]
    fn test_degenerate_sizes() {
        let empty_window = Viewport::fit((0.0, 0.0), (100.0, 100.0), 0.0);
        assert!(!empty_window.is_visible());
        assert!(empty_window.to_image(0.0, 0.0).is_none());

        let tiny_window = Viewport::fit((40.0, 40.0), (100.0, 100.0), 32.0);
        assert!(!tiny_window.is_visible());

        let empty_image = Viewport::fit((400.0, 400.0), (0.0, 0.0), 0.0);
        assert!(empty_image.to_image(200.0, 200.0).is_none());
    }

    #[test]
    fn test_rect_to_window_scales_size() {
        let vp = Viewport::fit((400.0, 200.0), (200.0, 100.0), 0.0);
        let r = vp.rect_to_window(&Rect::new(10.0, 10.0, 40.0, 20.0));
        assert_eq!(r, Rect::new(20.0, 20.0, 80.0, 40.0));
    }
}
