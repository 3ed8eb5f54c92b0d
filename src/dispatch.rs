//! Pointer event model and the dispatch table that drives [`ImageDisplay`].
//!
//! The native layer translates window events into [`PointerEvent`]s with
//! image-space positions and hands them to [`Dispatcher::dispatch`]. Handlers
//! are looked up by event kind; the no-image guard runs before any handler.

use std::collections::HashMap;

use web_time::{Duration, Instant};

use crate::display::ImageDisplay;
use crate::geometry::Point;
use crate::prompt::ConfirmPrompt;

/// Mouse buttons. `Secondary` is the designated point-annotation button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

impl MouseButton {
    pub fn is_secondary(&self) -> bool {
        matches!(self, MouseButton::Secondary)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Press,
    Move,
    Release,
}

/// A pointer event in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// `None` for moves.
    pub button: Option<MouseButton>,
    /// Image coordinates, `None` when the pointer is outside the image.
    pub position: Option<Point>,
    pub double_click: bool,
}

impl PointerEvent {
    pub fn press(button: MouseButton, position: Option<Point>) -> Self {
        Self {
            kind: PointerEventKind::Press,
            button: Some(button),
            position,
            double_click: false,
        }
    }

    pub fn moved(position: Option<Point>) -> Self {
        Self {
            kind: PointerEventKind::Move,
            button: None,
            position,
            double_click: false,
        }
    }

    pub fn release(button: MouseButton, position: Option<Point>) -> Self {
        Self {
            kind: PointerEventKind::Release,
            button: Some(button),
            position,
            double_click: false,
        }
    }

    pub fn with_double_click(mut self, double_click: bool) -> Self {
        self.double_click = double_click;
        self
    }
}

/// What the caller should do after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed.
    Ignored,
    /// The canvas content changed and must be redrawn.
    Redraw,
}

/// Behavior switches for the handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOptions {
    /// Only place circles on a secondary-button double click.
    pub circle_on_double_click: bool,
}

/// Everything a handler may touch.
pub struct HandlerContext<'a> {
    pub display: &'a mut ImageDisplay,
    pub prompt: &'a mut dyn ConfirmPrompt,
    pub options: DispatchOptions,
}

pub type Handler = fn(&mut HandlerContext<'_>, &PointerEvent) -> Outcome;

/// Routes pointer events to handlers keyed by event kind.
pub struct Dispatcher {
    handlers: HashMap<PointerEventKind, Handler>,
    options: DispatchOptions,
}

impl Dispatcher {
    pub fn new(options: DispatchOptions) -> Self {
        let mut dispatcher = Self {
            handlers: HashMap::new(),
            options,
        };
        dispatcher.register(PointerEventKind::Press, handle_press);
        dispatcher.register(PointerEventKind::Move, handle_move);
        dispatcher.register(PointerEventKind::Release, handle_release);
        dispatcher
    }

    /// Install or replace the handler for an event kind.
    pub fn register(&mut self, kind: PointerEventKind, handler: Handler) {
        self.handlers.insert(kind, handler);
    }

    pub fn options(&self) -> DispatchOptions {
        self.options
    }

    pub fn dispatch(
        &self,
        display: &mut ImageDisplay,
        prompt: &mut dyn ConfirmPrompt,
        event: &PointerEvent,
    ) -> Outcome {
        if !display.has_image() {
            log::trace!("No image loaded, ignoring {:?}", event.kind);
            return Outcome::Ignored;
        }

        let Some(handler) = self.handlers.get(&event.kind) else {
            return Outcome::Ignored;
        };

        let mut ctx = HandlerContext {
            display,
            prompt,
            options: self.options,
        };
        handler(&mut ctx, event)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DispatchOptions::default())
    }
}

fn handle_press(ctx: &mut HandlerContext<'_>, event: &PointerEvent) -> Outcome {
    let (Some(button), Some(position)) = (event.button, event.position) else {
        log::trace!("Press outside the image ignored");
        return Outcome::Ignored;
    };

    if button.is_secondary() {
        if ctx.options.circle_on_double_click && !event.double_click {
            return Outcome::Ignored;
        }
        return match ctx.display.place_circle(position) {
            Some(_) => Outcome::Redraw,
            None => Outcome::Ignored,
        };
    }

    if ctx.display.begin_rectangle(position, button) {
        Outcome::Redraw
    } else {
        Outcome::Ignored
    }
}

fn handle_move(ctx: &mut HandlerContext<'_>, event: &PointerEvent) -> Outcome {
    if !ctx.display.session().is_dragging() {
        return Outcome::Ignored;
    }
    if ctx.display.drag_rectangle(event.position) {
        Outcome::Redraw
    } else {
        Outcome::Ignored
    }
}

fn handle_release(ctx: &mut HandlerContext<'_>, event: &PointerEvent) -> Outcome {
    // The position is irrelevant: a release ends the drag even off-image.
    let Some(button) = event.button else {
        return Outcome::Ignored;
    };
    match ctx.display.finish_rectangle(button, &mut *ctx.prompt) {
        Some(_) => Outcome::Redraw,
        None => Outcome::Ignored,
    }
}

/// Default maximum delay between the two presses of a double click.
pub const DEFAULT_DOUBLE_CLICK_MS: u64 = 400;

/// Default maximum pointer travel between the two presses, in window pixels.
pub const DEFAULT_DOUBLE_CLICK_DISTANCE: f32 = 4.0;

/// Detects double clicks from successive presses.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    max_delay: Duration,
    max_distance: f32,
    last: Option<(MouseButton, (f32, f32), Instant)>,
}

impl ClickTracker {
    pub fn new(max_delay: Duration, max_distance: f32) -> Self {
        Self {
            max_delay,
            max_distance,
            last: None,
        }
    }

    /// Record a press at a window position and report whether it completes a double click.
    pub fn press(&mut self, button: MouseButton, window_pos: (f32, f32)) -> bool {
        self.press_at(button, window_pos, Instant::now())
    }

    pub fn press_at(&mut self, button: MouseButton, window_pos: (f32, f32), at: Instant) -> bool {
        let is_double = match self.last {
            Some((last_button, (x, y), time)) => {
                let dx = window_pos.0 - x;
                let dy = window_pos.1 - y;
                last_button == button
                    && at.saturating_duration_since(time) <= self.max_delay
                    && (dx * dx + dy * dy).sqrt() <= self.max_distance
            }
            None => false,
        };

        // A completed double click does not start the next one
        self.last = if is_double {
            None
        } else {
            Some((button, window_pos, at))
        };
        is_double
    }
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_DOUBLE_CLICK_MS),
            DEFAULT_DOUBLE_CLICK_DISTANCE,
        )
    }
}
