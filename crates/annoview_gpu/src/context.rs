use std::sync::Arc;
use winit::window::Window;

use crate::config::GpuConfig;
use crate::error::{GpuError, Result};

/// Owns the wgpu device, queue and the window surface.
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub config: GpuConfig,
}

impl GpuContext {
    /// Set up the GPU for a window with [`GpuConfig::default`].
    ///
    /// Native callers drive this with `pollster::block_on()`.
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        Self::with_config(window, GpuConfig::default()).await
    }

    pub async fn with_config(window: Arc<Window>, config: GpuConfig) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: config.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        let info = adapter.get_info();
        log::info!("Using GPU adapter {} ({:?})", info.name, info.backend);

        // Large photos need the adapter's real texture limit, not the downlevel one.
        let required_limits = wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits());
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("annoview device"),
                required_features: wgpu::Features::empty(),
                required_limits,
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let capabilities = surface.get_capabilities(&adapter);
        let size = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: pick_format(&capabilities.formats)?,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: pick_present_mode(&capabilities.present_modes, config.present_mode),
            alpha_mode: capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: Vec::new(),
            desired_maximum_frame_latency: config.max_frame_latency,
        };
        surface.configure(&device, &surface_config);
        log::debug!(
            "Surface configured: {:?}, {:?}",
            surface_config.format,
            surface_config.present_mode
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            config,
        })
    }

    /// Reconfigure the surface after a window resize. Zero sizes are clamped to 1.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface_config.width = width.max(1);
        self.surface_config.height = height.max(1);
        self.surface.configure(&self.device, &self.surface_config);
    }

    pub fn width(&self) -> u32 {
        self.surface_config.width
    }

    pub fn height(&self) -> u32 {
        self.surface_config.height
    }

    /// Largest texture edge the device accepts.
    pub fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }
}

/// Prefer an sRGB format so shader output is gamma-encoded by the hardware.
fn pick_format(formats: &[wgpu::TextureFormat]) -> Result<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(wgpu::TextureFormat::is_srgb)
        .or_else(|| formats.first().copied())
        .ok_or(GpuError::NoSurfaceFormat)
}

/// The requested mode when supported, otherwise Fifo (always available).
fn pick_present_mode(supported: &[wgpu::PresentMode], wanted: wgpu::PresentMode) -> wgpu::PresentMode {
    if supported.contains(&wanted) {
        wanted
    } else {
        wgpu::PresentMode::Fifo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_format_prefers_srgb() {
        let formats = [
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        ];
        assert_eq!(pick_format(&formats).unwrap(), wgpu::TextureFormat::Bgra8UnormSrgb);
        assert_eq!(
            pick_format(&formats[..1]).unwrap(),
            wgpu::TextureFormat::Bgra8Unorm
        );
        assert!(matches!(pick_format(&[]), Err(GpuError::NoSurfaceFormat)));
    }

    #[test]
    fn test_present_mode_falls_back_to_fifo() {
        let supported = [wgpu::PresentMode::Fifo, wgpu::PresentMode::Mailbox];
        assert_eq!(
            pick_present_mode(&supported, wgpu::PresentMode::Mailbox),
            wgpu::PresentMode::Mailbox
        );
        assert_eq!(
            pick_present_mode(&supported, wgpu::PresentMode::Immediate),
            wgpu::PresentMode::Fifo
        );
    }
}
