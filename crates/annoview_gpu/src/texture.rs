use crate::context::GpuContext;
use crate::error::{GpuError, Result};

/// The displayed image on the GPU, bound for [`TexturePipeline::draw`](crate::TexturePipeline::draw).
pub struct ImageTexture {
    pub width: u32,
    pub height: u32,
    pub(crate) view: wgpu::TextureView,
    pub(crate) sampler: wgpu::Sampler,
    pub(crate) bind_group: Option<wgpu::BindGroup>,
}

impl ImageTexture {
    /// Upload tightly packed RGBA8 pixels.
    ///
    /// Fails without touching the device when the byte count is wrong or an
    /// edge exceeds the device limit; callers downscale before uploading.
    pub fn from_rgba8(ctx: &GpuContext, data: &[u8], width: u32, height: u32) -> Result<Self> {
        check_rgba8(data.len(), width, height, ctx.max_texture_dimension())?;

        let texture = wgpu::util::DeviceExt::create_texture_with_data(
            &ctx.device,
            &ctx.queue,
            &wgpu::TextureDescriptor {
                label: Some("image texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            data,
        );

        // Nearest when magnified so individual pixels stay visible while annotating
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("image sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Ok(Self {
            width,
            height,
            view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
            sampler,
            bind_group: None,
        })
    }
}

fn check_rgba8(len: usize, width: u32, height: u32, max_dimension: u32) -> Result<()> {
    let expected = width as usize * height as usize * 4;
    if width == 0 || height == 0 || len != expected {
        return Err(GpuError::Texture(format!(
            "{width}x{height} RGBA8 needs {expected} bytes, got {len}"
        )));
    }
    if width > max_dimension || height > max_dimension {
        return Err(GpuError::Texture(format!(
            "{width}x{height} exceeds the device texture limit of {max_dimension}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_rgba8() {
        assert!(check_rgba8(16, 2, 2, 8192).is_ok());
        assert!(check_rgba8(15, 2, 2, 8192).is_err());
        assert!(check_rgba8(0, 0, 0, 8192).is_err());
        assert!(check_rgba8(4 * 9000, 9000, 1, 8192).is_err());
    }
}
