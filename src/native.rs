//! Native window, GPU state and event translation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use annoview_gpu::shape::srgb8_to_linear;
use annoview_gpu::{
    ClearColor, ColorPipeline, GpuContext, ImageTexture, ShapeBatch, TexturePipeline,
    TransformUniform, begin_frame_pass,
};
use web_time::Duration;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::AppConfig;
use crate::dispatch::{ClickTracker, DispatchOptions, Dispatcher, MouseButton, Outcome, PointerEvent};
use crate::display::ImageDisplay;
use crate::error::{AppError, Result};
use crate::geometry::{Point, Rect};
use crate::keybindings::{Action, KeyBindings, KeyCode};
use crate::library::ImageLibrary;
use crate::loader::{LoadedImage, load_image};
use crate::prompt::{DialogPrompt, show_error};
use crate::scene::{Primitive, build_scene};
use crate::viewport::Viewport;

const APP_TITLE: &str = "annoview";

/// Startup choices that do not live in the config file.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Folder to open once the window is up
    pub folder: Option<PathBuf>,
    /// Where to save the config on exit. `None` leaves every file alone.
    pub save_path: Option<PathBuf>,
}

/// Run the application until the window is closed.
pub fn run(config: AppConfig, options: LaunchOptions) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config, options);
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct GpuState {
    ctx: GpuContext,
    texture_pipeline: TexturePipeline,
    color_pipeline: ColorPipeline,
    /// Uploaded texture of the displayed image
    image: Option<ImageTexture>,
}

impl GpuState {
    fn new(window: Arc<Window>) -> Result<Self> {
        let ctx = pollster::block_on(GpuContext::new(window))?;
        let texture_pipeline = TexturePipeline::new(&ctx);
        let color_pipeline = ColorPipeline::new(&ctx.device, ctx.surface_config.format);
        log::debug!(
            "GPU ready: {}x{} surface, max texture {}",
            ctx.width(),
            ctx.height(),
            ctx.max_texture_dimension()
        );
        Ok(Self {
            ctx,
            texture_pipeline,
            color_pipeline,
            image: None,
        })
    }

    fn upload(&mut self, image: &LoadedImage) -> Result<()> {
        let (data, width, height) = image.texture_data(self.ctx.max_texture_dimension());
        let mut texture = ImageTexture::from_rgba8(&self.ctx, &data, width, height)?;
        self.texture_pipeline.bind(&self.ctx, &mut texture);
        self.image = Some(texture);
        Ok(())
    }

    fn render(
        &self,
        image_rect: Option<Rect>,
        scene: &[Primitive],
        background: ClearColor,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let shapes = self
            .color_pipeline
            .prepare(&self.ctx.device, &self.tessellate(scene));
        let image = self.image.as_ref().zip(image_rect);
        if let Some((_, rect)) = image {
            self.texture_pipeline.update_transform(
                &self.ctx,
                TransformUniform::for_screen_rect(
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                    self.ctx.width() as f32,
                    self.ctx.height() as f32,
                ),
            );
        }

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });
        {
            let mut pass = begin_frame_pass(&mut encoder, &view, background);
            if let Some((texture, _)) = image {
                self.texture_pipeline.draw(&mut pass, texture);
            }
            if let Some(shapes) = &shapes {
                self.color_pipeline.draw(&mut pass, shapes);
            }
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn tessellate(&self, scene: &[Primitive]) -> ShapeBatch {
        let mut batch = ShapeBatch::new(self.ctx.width(), self.ctx.height());
        for primitive in scene {
            match *primitive {
                Primitive::FillRect { rect, color } => {
                    batch.fill_rect(rect.x, rect.y, rect.width, rect.height, srgb8_to_linear(color, 1.0));
                }
                Primitive::StrokeRect {
                    rect,
                    thickness,
                    color,
                } => batch.stroke_rect(
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                    thickness,
                    srgb8_to_linear(color, 1.0),
                ),
                Primitive::FillCircle {
                    center,
                    radius,
                    color,
                } => {
                    let segments = (radius * 2.0).clamp(16.0, 96.0) as u32;
                    batch.fill_circle(center.x, center.y, radius, segments, srgb8_to_linear(color, 1.0));
                }
            }
        }
        batch
    }
}

struct App {
    config: AppConfig,
    options: LaunchOptions,
    keybindings: KeyBindings,
    library: ImageLibrary,
    display: ImageDisplay,
    dispatcher: Dispatcher,
    prompt: DialogPrompt,
    clicks: ClickTracker,
    /// Last cursor position in window pixels
    cursor: Option<(f32, f32)>,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    /// Startup failure that ends the event loop
    fatal: Option<AppError>,
}

impl App {
    fn new(config: AppConfig, options: LaunchOptions) -> Self {
        let prefs = &config.preferences;
        let mut display = ImageDisplay::new(prefs.overlay_policy, prefs.circle_radius);
        display.set_show_axes(prefs.show_axes);

        let dispatcher = Dispatcher::new(DispatchOptions {
            circle_on_double_click: prefs.circle_on_double_click,
        });
        let clicks = ClickTracker::new(
            Duration::from_millis(prefs.double_click_ms),
            prefs.double_click_distance,
        );

        Self {
            keybindings: config.keybindings.to_keybindings(),
            library: ImageLibrary::new(prefs.extensions.clone()),
            display,
            dispatcher,
            prompt: DialogPrompt::default(),
            clicks,
            cursor: None,
            window: None,
            gpu: None,
            fatal: None,
            config,
            options,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = WindowAttributes::default()
            .with_title(APP_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(1024, 768))
            .with_min_inner_size(winit::dpi::LogicalSize::new(320, 240));
        let window = Arc::new(event_loop.create_window(attributes)?);
        self.gpu = Some(GpuState::new(window.clone())?);
        self.window = Some(window);

        if let Some(folder) = self.options.folder.clone() {
            self.open_folder(&folder);
        }
        Ok(())
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn viewport(&self) -> Option<Viewport> {
        let image = self.display.image()?;
        let size = self.window.as_ref()?.inner_size();
        let margin = if self.display.show_axes() {
            self.config.preferences.axes_margin
        } else {
            0.0
        };
        Some(Viewport::fit(
            (size.width as f32, size.height as f32),
            (image.width() as f32, image.height() as f32),
            margin,
        ))
    }

    /// Image coordinates under the cursor, if it is over the image.
    fn cursor_in_image(&self) -> Option<Point> {
        let (x, y) = self.cursor?;
        self.viewport()?.to_image(x, y)
    }

    fn update_title(&self) {
        if let Some(window) = &self.window {
            window.set_title(&window_title(&self.library, &self.display));
        }
    }

    fn report(&self, title: &str, error: &AppError) {
        log::error!("{}: {}", title, error);
        show_error(title, &error.to_string());
    }

    fn pick_folder(&mut self) {
        let mut dialog = rfd::FileDialog::new().set_title("Open image folder");
        if let Some(last) = self.library.folder().or(self.config.preferences.last_folder.as_deref()) {
            dialog = dialog.set_directory(last);
        }
        match dialog.pick_folder() {
            Some(folder) => self.open_folder(&folder),
            None => log::debug!("Folder selection cancelled"),
        }
    }

    fn open_folder(&mut self, folder: &Path) {
        match self.library.open_folder(folder) {
            Ok(count) => {
                self.config.preferences.last_folder = Some(folder.to_path_buf());
                if count > 0 {
                    self.navigate(ImageLibrary::first);
                } else {
                    self.update_title();
                }
            }
            Err(e) => self.report("Cannot open folder", &e),
        }
    }

    /// Move the library cursor and display the image it lands on.
    fn navigate(&mut self, step: fn(&mut ImageLibrary) -> Option<&Path>) {
        let before = self.library.current_index();
        let Some(path) = step(&mut self.library).map(Path::to_path_buf) else {
            return;
        };
        if self.library.current_index() == before && self.display.has_image() {
            return;
        }
        if !self.show_image(&path) {
            // Keep the cursor on the image that is still displayed
            if let Some(index) = before {
                self.library.select(index);
            }
        }
        self.update_title();
    }

    /// Load and display `path`. Failures are reported and leave the display unchanged.
    fn show_image(&mut self, path: &Path) -> bool {
        let loaded = load_image(path).and_then(|image| {
            if let Some(gpu) = &mut self.gpu {
                gpu.upload(&image)?;
            }
            Ok(image)
        });

        match loaded {
            Ok(image) => {
                log::debug!("Displaying {}", image.file_name());
                self.display.set_image(image);
                self.request_redraw();
                true
            }
            Err(e) => {
                self.report("Cannot open image", &e);
                false
            }
        }
    }

    fn handle_action(&mut self, action: Action, event_loop: &ActiveEventLoop) {
        log::debug!("Key action: {}", action.name());
        match action {
            Action::OpenFolder => self.pick_folder(),
            Action::NextImage => self.navigate(ImageLibrary::next),
            Action::PreviousImage => self.navigate(ImageLibrary::previous),
            Action::FirstImage => self.navigate(ImageLibrary::first),
            Action::LastImage => self.navigate(ImageLibrary::last),
            Action::ToggleAxes => {
                let shown = self.display.toggle_axes();
                self.config.preferences.show_axes = shown;
                self.request_redraw();
            }
            Action::ClearOverlays => self.display.clear_overlays(),
            Action::Quit => event_loop.exit(),
        }
    }

    fn dispatch(&mut self, event: PointerEvent) {
        let outcome = self
            .dispatcher
            .dispatch(&mut self.display, &mut self.prompt, &event);
        if outcome == Outcome::Redraw {
            self.request_redraw();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let scene = match self.viewport() {
            Some(viewport) => build_scene(&self.display, &viewport, &self.config.style),
            None => Vec::new(),
        };
        let image_rect = self
            .viewport()
            .filter(Viewport::is_visible)
            .map(|viewport| viewport.image_rect());
        let background = ClearColor::from_srgb8(self.config.style.background);

        let Some(gpu) = &mut self.gpu else {
            return;
        };
        match gpu.render(image_rect, &scene, background) {
            Ok(()) => self.display.overlays_mut().clear_dirty(),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = (gpu.ctx.width(), gpu.ctx.height());
                gpu.ctx.resize(width, height);
                self.request_redraw();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Skipping frame: {}", e),
        }
    }

    fn save_config(&self) {
        match self.config.save_on_exit(self.options.save_path.as_deref()) {
            Ok(true) => {}
            Ok(false) => log::info!("Configuration not saved"),
            Err(e) => log::warn!("Could not save configuration: {}", e),
        }
    }
}

/// Names the displayed image, not the library cursor, so a failed load
/// never labels the previous picture with the wrong path.
fn window_title(library: &ImageLibrary, display: &ImageDisplay) -> String {
    if let Some(image) = display.image() {
        let path = image.path();
        return match library.entries().iter().position(|entry| entry == path) {
            Some(index) => format!(
                "{} - {} ({}/{})",
                APP_TITLE,
                path.display(),
                index + 1,
                library.len()
            ),
            None => format!("{} - {}", APP_TITLE, path.display()),
        };
    }
    match library.folder() {
        Some(folder) if library.is_empty() => {
            format!("{} - {} (no images)", APP_TITLE, folder.display())
        }
        Some(folder) => format!("{} - {}", APP_TITLE, folder.display()),
        None => APP_TITLE.to_string(),
    }
}

fn convert_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Primary,
        WinitMouseButton::Right => MouseButton::Secondary,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(n) => MouseButton::Other(n),
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("Startup failed: {}", e);
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.ctx.resize(size.width, size.height);
                }
                self.request_redraw();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some((position.x as f32, position.y as f32));
                let position = self.cursor_in_image();
                self.dispatch(PointerEvent::moved(position));
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.dispatch(PointerEvent::moved(None));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = convert_button(button);
                let position = self.cursor_in_image();
                let event = match state {
                    ElementState::Pressed => {
                        let double_click = match self.cursor {
                            Some(window_pos) => self.clicks.press(button, window_pos),
                            None => false,
                        };
                        PointerEvent::press(button, position).with_double_click(double_click)
                    }
                    ElementState::Released => PointerEvent::release(button, position),
                };
                self.dispatch(event);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                let action = KeyCode::from_winit(code).and_then(|key| self.keybindings.action_for_key(key));
                if let Some(action) = action {
                    self.handle_action(action, event_loop);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.display.overlays().is_dirty() {
            self.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.fatal.is_none() {
            self.save_config();
        }
    }
}
