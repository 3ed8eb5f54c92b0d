//! Surface settings and the background color.

/// How [`GpuContext`](crate::GpuContext) picks an adapter and presents frames.
#[derive(Debug, Clone)]
pub struct GpuConfig {
    pub power_preference: wgpu::PowerPreference,
    /// Falls back to Fifo when the surface does not support it.
    pub present_mode: wgpu::PresentMode,
    pub max_frame_latency: u32,
}

impl Default for GpuConfig {
    // The viewer only redraws on input, so the low power adapter is enough
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::LowPower,
            present_mode: wgpu::PresentMode::Fifo,
            max_frame_latency: 2,
        }
    }
}

/// Background behind the letterboxed image, in linear space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ClearColor {
    /// From an sRGB byte triple as stored in config files.
    pub fn from_srgb8(rgb: [u8; 3]) -> Self {
        let [r, g, b, _] = crate::shape::srgb8_to_linear(rgb, 1.0);
        Self {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
        }
    }
}

impl From<ClearColor> for wgpu::Color {
    fn from(c: ClearColor) -> Self {
        wgpu::Color {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 1.0,
        }
    }
}
