//! Render pipelines. Both draw into a single pass per frame: the image first,
//! then the overlay shapes on top.

pub mod builder;
pub mod color;
pub mod texture;

pub use color::{ColorPipeline, ShapeBuffers};
pub use texture::TexturePipeline;

use crate::config::ClearColor;

/// Start the frame's pass, clearing `view` to the background color.
pub fn begin_frame_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    clear: ClearColor,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("frame pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            depth_slice: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear.into()),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    })
}
