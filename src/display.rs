//! The displayed image, its overlays and the active drag session.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::OverlayPolicy;
use crate::dispatch::MouseButton;
use crate::geometry::{Circle, Point, Rect};
use crate::loader::LoadedImage;
use crate::overlay::{OverlayId, OverlaySet, Shape};
use crate::prompt::{ConfirmPrompt, Decision};
use crate::session::AnnotationSession;

/// Default radius of point annotations, in image pixels.
pub const DEFAULT_CIRCLE_RADIUS: f32 = 10.0;

/// Owns everything the canvas shows.
pub struct ImageDisplay {
    image: Option<LoadedImage>,
    overlays: OverlaySet,
    /// Overlays of images that are not displayed, kept under [`OverlayPolicy::PerImage`].
    stashed: HashMap<PathBuf, OverlaySet>,
    session: AnnotationSession,
    policy: OverlayPolicy,
    circle_radius: f32,
    show_axes: bool,
}

impl ImageDisplay {
    pub fn new(policy: OverlayPolicy, circle_radius: f32) -> Self {
        Self {
            image: None,
            overlays: OverlaySet::new(),
            stashed: HashMap::new(),
            session: AnnotationSession::Idle,
            policy,
            circle_radius,
            show_axes: false,
        }
    }

    /// Replace the displayed image.
    ///
    /// Any drag in progress is dropped. Overlays are cleared or swapped
    /// depending on the overlay policy.
    pub fn set_image(&mut self, image: LoadedImage) {
        if self.session.is_dragging() {
            log::debug!("Image changed during a drag; dropping the pending rectangle");
        }
        self.session = AnnotationSession::Idle;

        match self.policy {
            OverlayPolicy::Reset => self.overlays.clear(),
            OverlayPolicy::PerImage => {
                let previous = std::mem::take(&mut self.overlays);
                if let Some(old) = &self.image {
                    if !previous.is_empty() {
                        self.stashed.insert(old.path().to_path_buf(), previous);
                    }
                }
                self.overlays = self.stashed.remove(image.path()).unwrap_or_default();
                if !self.overlays.is_empty() {
                    log::debug!(
                        "Restored {} overlays for {}",
                        self.overlays.len(),
                        image.file_name()
                    );
                }
            }
        }

        self.image = Some(image);
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn overlays(&self) -> &OverlaySet {
        &self.overlays
    }

    pub fn overlays_mut(&mut self) -> &mut OverlaySet {
        &mut self.overlays
    }

    pub fn session(&self) -> AnnotationSession {
        self.session
    }

    /// The rectangle being dragged, not yet committed.
    pub fn pending_rect(&self) -> Option<Rect> {
        self.session.pending()
    }

    pub fn policy(&self) -> OverlayPolicy {
        self.policy
    }

    pub fn circle_radius(&self) -> f32 {
        self.circle_radius
    }

    pub fn show_axes(&self) -> bool {
        self.show_axes
    }

    pub fn set_show_axes(&mut self, show: bool) {
        self.show_axes = show;
    }

    pub fn toggle_axes(&mut self) -> bool {
        self.show_axes = !self.show_axes;
        self.show_axes
    }

    /// Start a rectangle at `anchor`, held by `button`. Returns whether a drag started.
    pub fn begin_rectangle(&mut self, anchor: Point, button: MouseButton) -> bool {
        if self.image.is_none() {
            return false;
        }
        match self.session.begin(anchor, button) {
            Ok(next) => {
                log::debug!("Rectangle drag started at ({:.1}, {:.1})", anchor.x, anchor.y);
                self.session = next;
                true
            }
            Err(e) => {
                log::warn!("Ignoring press: {}", e);
                false
            }
        }
    }

    /// Stretch the pending rectangle. Returns whether its geometry changed.
    pub fn drag_rectangle(&mut self, cursor: Option<Point>) -> bool {
        let next = self.session.drag_to(cursor);
        let changed = next != self.session;
        self.session = next;
        changed
    }

    /// End the drag on release of `button` and ask whether to keep the rectangle.
    ///
    /// The session is back to idle before the prompt is shown. Returns the
    /// rectangle and the answer, or `None` when no drag held by `button` was active.
    pub fn finish_rectangle(
        &mut self,
        button: MouseButton,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Option<(Rect, Decision)> {
        let (next, pending) = self.session.release(button);
        self.session = next;
        let rect = pending?;

        let decision = prompt.confirm_rectangle(&rect);
        match decision {
            Decision::Keep => {
                let id = self.overlays.add(Shape::Rectangle(rect));
                log::info!(
                    "Kept rectangle #{} at ({:.1}, {:.1}) size {:.1}x{:.1}",
                    id,
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height
                );
            }
            Decision::Discard => log::debug!("Rectangle discarded"),
        }
        Some((rect, decision))
    }

    /// Add a filled circle of the configured radius.
    pub fn place_circle(&mut self, center: Point) -> Option<OverlayId> {
        if self.image.is_none() {
            return None;
        }
        let id = self
            .overlays
            .add(Shape::Circle(Circle::new(center, self.circle_radius)));
        log::info!("Placed circle #{} at ({:.1}, {:.1})", id, center.x, center.y);
        Some(id)
    }

    /// Remove all overlays of the current image.
    pub fn clear_overlays(&mut self) {
        self.overlays.clear();
    }
}

impl Default for ImageDisplay {
    fn default() -> Self {
        Self::new(OverlayPolicy::default(), DEFAULT_CIRCLE_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn image(name: &str) -> LoadedImage {
        LoadedImage::new(name, RgbaImage::new(100, 80))
    }

    fn keep(_: &Rect) -> Decision {
        Decision::Keep
    }

    fn discard(_: &Rect) -> Decision {
        Decision::Discard
    }

    #[test]
    fn test_no_image_means_no_annotations() {
        let mut display = ImageDisplay::default();
        assert!(!display.begin_rectangle(Point::new(1.0, 1.0), MouseButton::Primary));
        assert!(display.place_circle(Point::new(1.0, 1.0)).is_none());
        assert!(display.overlays().is_empty());
    }

    #[test]
    fn test_keep_adds_exactly_one_rectangle() {
        let mut display = ImageDisplay::default();
        display.set_image(image("a.png"));

        assert!(display.begin_rectangle(Point::new(10.0, 10.0), MouseButton::Primary));
        assert!(display.drag_rectangle(Some(Point::new(50.0, 30.0))));
        let (rect, decision) = display.finish_rectangle(MouseButton::Primary, &mut keep).unwrap();

        assert_eq!(decision, Decision::Keep);
        assert_eq!(rect, Rect::new(10.0, 10.0, 40.0, 20.0));
        assert_eq!(display.overlays().len(), 1);
        assert_eq!(display.overlays().rectangles().next(), Some(&rect));
        assert!(!display.session().is_dragging());
    }

    #[test]
    fn test_discard_leaves_overlays_unchanged() {
        let mut display = ImageDisplay::default();
        display.set_image(image("a.png"));
        display.place_circle(Point::new(5.0, 5.0));

        display.begin_rectangle(Point::new(10.0, 10.0), MouseButton::Primary);
        display.drag_rectangle(Some(Point::new(50.0, 30.0)));
        display.finish_rectangle(MouseButton::Primary, &mut discard);

        assert_eq!(display.overlays().len(), 1);
        assert_eq!(display.overlays().rectangles().count(), 0);
    }

    #[test]
    fn test_finish_without_drag_does_not_prompt() {
        let mut display = ImageDisplay::default();
        display.set_image(image("a.png"));
        let mut asked = false;
        let mut prompt = |_: &Rect| {
            asked = true;
            Decision::Keep
        };
        assert!(display.finish_rectangle(MouseButton::Primary, &mut prompt).is_none());
        assert!(!asked);
    }

    #[test]
    fn test_circle_uses_configured_radius() {
        let mut display = ImageDisplay::new(OverlayPolicy::Reset, 4.5);
        display.set_image(image("a.png"));
        display.place_circle(Point::new(20.0, 20.0));
        let circle = display.overlays().circles().next().copied().unwrap();
        assert_eq!(circle, Circle::new(Point::new(20.0, 20.0), 4.5));
    }

    #[test]
    fn test_new_image_cancels_drag() {
        let mut display = ImageDisplay::default();
        display.set_image(image("a.png"));
        display.begin_rectangle(Point::new(10.0, 10.0), MouseButton::Primary);
        display.set_image(image("b.png"));
        assert!(display.pending_rect().is_none());
    }

    #[test]
    fn test_reset_policy_clears_overlays() {
        let mut display = ImageDisplay::new(OverlayPolicy::Reset, DEFAULT_CIRCLE_RADIUS);
        display.set_image(image("a.png"));
        display.place_circle(Point::new(1.0, 1.0));
        display.set_image(image("b.png"));
        assert!(display.overlays().is_empty());
        display.set_image(image("a.png"));
        assert!(display.overlays().is_empty());
    }

    #[test]
    fn test_per_image_policy_restores_overlays() {
        let mut display = ImageDisplay::new(OverlayPolicy::PerImage, DEFAULT_CIRCLE_RADIUS);
        display.set_image(image("a.png"));
        display.place_circle(Point::new(1.0, 1.0));

        display.set_image(image("b.png"));
        assert!(display.overlays().is_empty());
        display.place_circle(Point::new(2.0, 2.0));
        display.place_circle(Point::new(3.0, 3.0));

        display.set_image(image("a.png"));
        assert_eq!(display.overlays().len(), 1);
        display.set_image(image("b.png"));
        assert_eq!(display.overlays().len(), 2);
    }

    #[test]
    fn test_toggle_axes() {
        let mut display = ImageDisplay::default();
        assert!(!display.show_axes());
        assert!(display.toggle_axes());
        assert!(!display.toggle_axes());
    }
}
