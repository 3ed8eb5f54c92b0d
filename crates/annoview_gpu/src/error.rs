/// Failures while setting up the GPU or uploading an image.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("no usable graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("graphics device unavailable: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("cannot draw to the window: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("window surface supports no texture formats")]
    NoSurfaceFormat,

    /// Rejected image upload, with the reason.
    #[error("cannot upload image: {0}")]
    Texture(String),
}

pub type Result<T> = std::result::Result<T, GpuError>;
