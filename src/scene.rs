//! Screen-space draw list for everything drawn on top of the image.

use crate::config::StyleConfig;
use crate::display::ImageDisplay;
use crate::geometry::{Point, Rect};
use crate::overlay::Shape;
use crate::viewport::Viewport;

/// Length of a tick mark, in window pixels.
pub const TICK_LENGTH: f32 = 6.0;

/// Number of ticks [`tick_step`] aims for along one edge.
const TARGET_TICKS: f32 = 8.0;

/// A shape in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    FillRect {
        rect: Rect,
        color: [u8; 3],
    },
    StrokeRect {
        rect: Rect,
        thickness: f32,
        color: [u8; 3],
    },
    FillCircle {
        center: Point,
        radius: f32,
        color: [u8; 3],
    },
}

/// Spacing between tick marks for an axis of `extent` image units.
///
/// Always 1, 2 or 5 times a power of ten, chosen so the axis gets roughly
/// eight ticks.
pub fn tick_step(extent: f32) -> f32 {
    if !extent.is_finite() || extent <= 0.0 {
        return 1.0;
    }
    let raw = extent / TARGET_TICKS;
    let magnitude = 10f32.powi(raw.log10().floor() as i32);
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Positions of the ticks along an axis, from 0 up to and including `extent`.
pub fn tick_positions(extent: f32) -> Vec<f32> {
    let step = tick_step(extent);
    let count = (extent / step).floor().max(0.0) as usize;
    (0..=count).map(|i| i as f32 * step).collect()
}

/// Build the draw list for the displayed image, back to front.
///
/// Empty when no image is displayed or the image has no visible area.
pub fn build_scene(display: &ImageDisplay, viewport: &Viewport, style: &StyleConfig) -> Vec<Primitive> {
    let mut scene = Vec::new();
    let Some(image) = display.image() else {
        return scene;
    };
    if !viewport.is_visible() {
        return scene;
    }

    if display.show_axes() {
        push_axes(&mut scene, viewport, image.width() as f32, image.height() as f32, style);
    }

    for shape in display.overlays().shapes() {
        match shape {
            Shape::Rectangle(rect) => scene.push(Primitive::StrokeRect {
                rect: viewport.rect_to_window(rect),
                thickness: style.stroke_width,
                color: style.rectangle_color,
            }),
            Shape::Circle(circle) => {
                let (x, y) = viewport.to_window(circle.center);
                scene.push(Primitive::FillCircle {
                    center: Point::new(x, y),
                    radius: circle.radius * viewport.scale(),
                    color: style.circle_color,
                });
            }
        }
    }

    if let Some(pending) = display.pending_rect() {
        scene.push(Primitive::StrokeRect {
            rect: viewport.rect_to_window(&pending),
            thickness: style.stroke_width,
            color: style.rectangle_color,
        });
    }

    scene
}

fn push_axes(scene: &mut Vec<Primitive>, viewport: &Viewport, width: f32, height: f32, style: &StyleConfig) {
    let frame = viewport.image_rect();
    scene.push(Primitive::StrokeRect {
        rect: Rect::new(frame.x - 1.0, frame.y - 1.0, frame.width + 2.0, frame.height + 2.0),
        thickness: 1.0,
        color: style.axes_color,
    });

    let bottom = frame.y + frame.height + 1.0;
    for x in tick_positions(width) {
        let (wx, _) = viewport.to_window(Point::new(x, 0.0));
        scene.push(Primitive::FillRect {
            rect: Rect::new(wx - 0.5, bottom, 1.0, TICK_LENGTH),
            color: style.axes_color,
        });
    }

    let left = frame.x - 1.0 - TICK_LENGTH;
    for y in tick_positions(height) {
        let (_, wy) = viewport.to_window(Point::new(0.0, y));
        scene.push(Primitive::FillRect {
            rect: Rect::new(left, wy - 0.5, TICK_LENGTH, 1.0),
            color: style.axes_color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverlayPolicy;
    use crate::dispatch::MouseButton;
    use crate::geometry::Circle;
    use crate::loader::LoadedImage;
    use crate::prompt::Decision;
    use image::RgbaImage;

    fn display_with_image(width: u32, height: u32) -> ImageDisplay {
        let mut display = ImageDisplay::new(OverlayPolicy::Reset, 10.0);
        display.set_image(LoadedImage::new("test.png", RgbaImage::new(width, height)));
        display
    }

    #[test]
    fn test_tick_step_is_one_two_or_five() {
        assert_eq!(tick_step(8.0), 1.0);
        assert_eq!(tick_step(16.0), 2.0);
        assert_eq!(tick_step(30.0), 5.0);
        assert_eq!(tick_step(640.0), 100.0);
        assert_eq!(tick_step(480.0), 100.0);
        assert_eq!(tick_step(1500.0), 200.0);
        assert_eq!(tick_step(0.0), 1.0);
    }

    #[test]
    fn test_tick_positions_include_both_ends() {
        assert_eq!(tick_positions(10.0), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(tick_positions(640.0).len(), 7);
    }

    #[test]
    fn test_no_image_no_scene() {
        let display = ImageDisplay::default();
        let viewport = Viewport::fit((100.0, 100.0), (10.0, 10.0), 0.0);
        assert!(build_scene(&display, &viewport, &StyleConfig::default()).is_empty());
    }

    #[test]
    fn test_overlays_in_insertion_order_then_pending() {
        let mut display = display_with_image(100, 100);
        display.place_circle(Point::new(20.0, 20.0));
        display.begin_rectangle(Point::new(10.0, 10.0), MouseButton::Primary);
        display.drag_rectangle(Some(Point::new(30.0, 40.0)));
        display.finish_rectangle(MouseButton::Primary, &mut |_: &Rect| Decision::Keep);
        display.begin_rectangle(Point::new(50.0, 50.0), MouseButton::Primary);
        display.drag_rectangle(Some(Point::new(60.0, 60.0)));

        let style = StyleConfig::default();
        let viewport = Viewport::fit((200.0, 200.0), (100.0, 100.0), 0.0);
        let scene = build_scene(&display, &viewport, &style);

        assert_eq!(
            scene,
            vec![
                Primitive::FillCircle {
                    center: Point::new(40.0, 40.0),
                    radius: 20.0,
                    color: style.circle_color,
                },
                Primitive::StrokeRect {
                    rect: Rect::new(20.0, 20.0, 40.0, 60.0),
                    thickness: style.stroke_width,
                    color: style.rectangle_color,
                },
                Primitive::StrokeRect {
                    rect: Rect::new(100.0, 100.0, 20.0, 20.0),
                    thickness: style.stroke_width,
                    color: style.rectangle_color,
                },
            ]
        );
    }

    #[test]
    fn test_axes_add_frame_and_ticks_first() {
        let mut display = display_with_image(10, 10);
        display.overlays_mut().add(Shape::Circle(Circle::new(Point::new(5.0, 5.0), 1.0)));
        display.set_show_axes(true);

        let style = StyleConfig::default();
        let viewport = Viewport::fit((120.0, 120.0), (10.0, 10.0), 10.0);
        let scene = build_scene(&display, &viewport, &style);

        // Frame, 6 ticks per axis, then the circle
        assert_eq!(scene.len(), 1 + 6 + 6 + 1);
        assert!(matches!(scene[0], Primitive::StrokeRect { color, .. } if color == style.axes_color));
        assert!(matches!(scene.last(), Some(Primitive::FillCircle { .. })));
    }
}
