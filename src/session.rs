//! Rectangle drag state machine.
//!
//! A session is a plain `Copy` value. Every transition takes the current state
//! and returns the next one, so the owner moves it out, applies the event and
//! stores the result:
//!
//! ```text
//! Idle --begin(anchor, button)--> Dragging --drag_to(cursor)*--> Dragging --release(button)--> Idle
//! ```

use thiserror::Error;

use crate::dispatch::MouseButton;
use crate::geometry::{Point, Rect};

/// Why a transition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SessionError {
    /// A second drag was started while one is in progress.
    #[error("a rectangle drag anchored at ({}, {}) is already in progress", .anchor.x, .anchor.y)]
    AlreadyDragging { anchor: Point },
}

/// State of the rectangle drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AnnotationSession {
    #[default]
    Idle,
    Dragging {
        /// Where the drag began, in image coordinates.
        anchor: Point,
        /// Only this button's release ends the drag.
        button: MouseButton,
        /// The rectangle spanned by the anchor and the last valid cursor position.
        pending: Rect,
    },
}

impl AnnotationSession {
    /// Start a drag at `anchor` with a zero-size pending rectangle.
    ///
    /// Refused while another drag is active; the caller keeps its current state.
    pub fn begin(self, anchor: Point, button: MouseButton) -> Result<Self, SessionError> {
        match self {
            AnnotationSession::Idle => Ok(AnnotationSession::Dragging {
                anchor,
                button,
                pending: Rect::at(anchor),
            }),
            AnnotationSession::Dragging { anchor, .. } => {
                Err(SessionError::AlreadyDragging { anchor })
            }
        }
    }

    /// Stretch the pending rectangle to the cursor.
    ///
    /// `None` means the cursor has no image coordinates (outside the image);
    /// the rectangle then stays at its last valid geometry.
    pub fn drag_to(self, cursor: Option<Point>) -> Self {
        match (self, cursor) {
            (AnnotationSession::Dragging { anchor, button, .. }, Some(cursor)) => {
                AnnotationSession::Dragging {
                    anchor,
                    button,
                    pending: Rect::from_corners(anchor, cursor),
                }
            }
            (state, _) => state,
        }
    }

    /// End the drag when `button` is the one that started it. Returns the
    /// rectangle to confirm; any other release leaves the state unchanged.
    pub fn release(self, button: MouseButton) -> (Self, Option<Rect>) {
        match self {
            AnnotationSession::Dragging { button: held, pending, .. } if held == button => {
                (AnnotationSession::Idle, Some(pending))
            }
            state => (state, None),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, AnnotationSession::Dragging { .. })
    }

    pub fn anchor(&self) -> Option<Point> {
        match self {
            AnnotationSession::Dragging { anchor, .. } => Some(*anchor),
            AnnotationSession::Idle => None,
        }
    }

    pub fn button(&self) -> Option<MouseButton> {
        match self {
            AnnotationSession::Dragging { button, .. } => Some(*button),
            AnnotationSession::Idle => None,
        }
    }

    pub fn pending(&self) -> Option<Rect> {
        match self {
            AnnotationSession::Dragging { pending, .. } => Some(*pending),
            AnnotationSession::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_begin_creates_zero_size_rect() {
        let s = AnnotationSession::Idle.begin(p(10.0, 10.0), MouseButton::Primary).unwrap();
        assert!(s.is_dragging());
        assert_eq!(s.anchor(), Some(p(10.0, 10.0)));
        assert_eq!(s.pending(), Some(Rect::new(10.0, 10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_begin_while_dragging_is_rejected() {
        let s = AnnotationSession::Idle
            .begin(p(10.0, 10.0), MouseButton::Primary)
            .unwrap()
            .drag_to(Some(p(20.0, 20.0)));

        let err = s.begin(p(99.0, 99.0), MouseButton::Primary).unwrap_err();
        assert_eq!(err, SessionError::AlreadyDragging { anchor: p(10.0, 10.0) });
        // The dragging session is unchanged
        assert_eq!(s.pending(), Some(Rect::new(10.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_drag_normalizes_every_direction() {
        let s = AnnotationSession::Idle.begin(p(50.0, 50.0), MouseButton::Primary).unwrap();

        let up_left = s.drag_to(Some(p(20.0, 30.0)));
        assert_eq!(up_left.pending(), Some(Rect::new(20.0, 30.0, 30.0, 20.0)));

        let down_left = s.drag_to(Some(p(40.0, 70.0)));
        assert_eq!(down_left.pending(), Some(Rect::new(40.0, 50.0, 10.0, 20.0)));
    }

    #[test]
    fn test_undefined_cursor_freezes_rect() {
        let s = AnnotationSession::Idle
            .begin(p(10.0, 10.0), MouseButton::Primary)
            .unwrap()
            .drag_to(Some(p(50.0, 30.0)));
        let frozen = s.drag_to(None);
        assert_eq!(frozen, s);
    }

    #[test]
    fn test_drag_when_idle_is_noop() {
        let s = AnnotationSession::Idle.drag_to(Some(p(1.0, 1.0)));
        assert_eq!(s, AnnotationSession::Idle);
    }

    #[test]
    fn test_release_uses_last_valid_geometry() {
        let (s, rect) = AnnotationSession::Idle
            .begin(p(10.0, 10.0), MouseButton::Primary)
            .unwrap()
            .drag_to(Some(p(50.0, 30.0)))
            .drag_to(None)
            .release(MouseButton::Primary);
        assert_eq!(s, AnnotationSession::Idle);
        assert_eq!(rect, Some(Rect::new(10.0, 10.0, 40.0, 20.0)));
    }

    #[test]
    fn test_release_of_other_button_keeps_dragging() {
        let s = AnnotationSession::Idle
            .begin(p(10.0, 10.0), MouseButton::Primary)
            .unwrap()
            .drag_to(Some(p(30.0, 40.0)));

        let (after, rect) = s.release(MouseButton::Middle);
        assert_eq!(after, s);
        assert!(rect.is_none());
        assert_eq!(after.button(), Some(MouseButton::Primary));

        let (after, rect) = after.release(MouseButton::Primary);
        assert_eq!(after, AnnotationSession::Idle);
        assert_eq!(rect, Some(Rect::new(10.0, 10.0, 20.0, 30.0)));
    }

    #[test]
    fn test_release_when_idle() {
        let (s, rect) = AnnotationSession::Idle.release(MouseButton::Primary);
        assert_eq!(s, AnnotationSession::Idle);
        assert!(rect.is_none());
    }
}
