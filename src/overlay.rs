//! Overlay shapes attached to the displayed image.

use crate::geometry::{Circle, Rect};

/// Identifier of an overlay, unique within one [`OverlaySet`].
pub type OverlayId = u64;

/// The shape of an overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Outlined rectangle drawn by dragging.
    Rectangle(Rect),
    /// Filled circle placed with the secondary button.
    Circle(Circle),
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Rectangle(_) => "rectangle",
            Shape::Circle(_) => "circle",
        }
    }
}

/// A shape committed to an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    pub id: OverlayId,
    pub shape: Shape,
}

/// Ordered overlays of one image, in insertion (and draw) order.
#[derive(Debug, Clone)]
pub struct OverlaySet {
    overlays: Vec<Overlay>,
    next_id: OverlayId,
    /// Set when overlays change; cleared once the frame has been redrawn.
    dirty: bool,
}

impl OverlaySet {
    pub fn new() -> Self {
        Self {
            overlays: Vec::new(),
            next_id: 1,
            dirty: false,
        }
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Append a shape and return its id.
    pub fn add(&mut self, shape: Shape) -> OverlayId {
        let id = self.next_id;
        self.next_id += 1;
        self.overlays.push(Overlay { id, shape });
        self.dirty = true;
        log::trace!("Added {} #{}", shape.name(), id);
        id
    }

    pub fn remove(&mut self, id: OverlayId) -> Option<Overlay> {
        let index = self.overlays.iter().position(|o| o.id == id)?;
        self.dirty = true;
        Some(self.overlays.remove(index))
    }

    pub fn get(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.id == id)
    }

    /// Remove every overlay. Ids keep increasing afterwards.
    pub fn clear(&mut self) {
        if !self.overlays.is_empty() {
            self.overlays.clear();
            self.dirty = true;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter()
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.overlays.iter().map(|o| &o.shape)
    }

    pub fn rectangles(&self) -> impl Iterator<Item = &Rect> {
        self.shapes().filter_map(|s| match s {
            Shape::Rectangle(r) => Some(r),
            Shape::Circle(_) => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &Circle> {
        self.shapes().filter_map(|s| match s {
            Shape::Circle(c) => Some(c),
            Shape::Rectangle(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

impl Default for OverlaySet {
    fn default() -> Self {
        Self::new()
    }
}
