//! annoview - image folder viewer with rectangle and point annotations.
//!
//! A folder of images is listed and the selected image is shown letterboxed
//! in a GPU-rendered window. Dragging with the primary button draws a
//! rectangle that is kept or discarded through a yes/no dialog; the
//! secondary button places a filled circle.
//!
//! The annotation logic ([`session`], [`display`], [`dispatch`]) does not
//! depend on the window or the GPU and can be driven directly:
//!
//! ```
//! use annoview::dispatch::{Dispatcher, MouseButton, PointerEvent};
//! use annoview::display::ImageDisplay;
//! use annoview::geometry::{Point, Rect};
//! use annoview::loader::LoadedImage;
//! use annoview::prompt::Decision;
//!
//! let mut display = ImageDisplay::default();
//! display.set_image(LoadedImage::new("photo.png", image::RgbaImage::new(64, 64)));
//!
//! let dispatcher = Dispatcher::default();
//! let mut keep = |_: &Rect| Decision::Keep;
//! for event in [
//!     PointerEvent::press(MouseButton::Primary, Some(Point::new(10.0, 10.0))),
//!     PointerEvent::moved(Some(Point::new(50.0, 30.0))),
//!     PointerEvent::release(MouseButton::Primary, None),
//! ] {
//!     dispatcher.dispatch(&mut display, &mut keep, &event);
//! }
//! assert_eq!(
//!     display.overlays().rectangles().next(),
//!     Some(&Rect::new(10.0, 10.0, 40.0, 20.0))
//! );
//! ```

pub mod config;
pub mod dispatch;
pub mod display;
pub mod error;
pub mod geometry;
pub mod keybindings;
pub mod library;
pub mod loader;
pub mod native;
pub mod overlay;
pub mod prompt;
pub mod scene;
pub mod session;
pub mod viewport;

pub use config::{AppConfig, LogLevel, OverlayPolicy, StartupConfig};
pub use display::ImageDisplay;
pub use error::{AppError, Result};
pub use native::{LaunchOptions, run};
