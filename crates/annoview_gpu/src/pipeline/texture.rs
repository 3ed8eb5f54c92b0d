//! Draws the displayed image as a quad placed by a transform uniform.

use wgpu::util::DeviceExt;

use super::builder::{self, PipelineDesc};
use crate::context::GpuContext;
use crate::texture::ImageTexture;
use crate::uniform::TransformUniform;
use crate::vertex::{Vertex, VertexLayout};

// Must match the @group/@binding attributes in shaders/texture.wgsl
const TRANSFORM_GROUP: u32 = 0;
const TRANSFORM_BINDING: u32 = 0;
const IMAGE_GROUP: u32 = 1;
const TEXTURE_BINDING: u32 = 0;
const SAMPLER_BINDING: u32 = 1;

/// Full-surface quad; the transform shrinks and moves it onto the image rectangle.
const QUAD: [Vertex; 4] = [
    Vertex { position: [-1.0, -1.0], tex_coords: [0.0, 1.0] },
    Vertex { position: [1.0, -1.0], tex_coords: [1.0, 1.0] },
    Vertex { position: [1.0, 1.0], tex_coords: [1.0, 0.0] },
    Vertex { position: [-1.0, 1.0], tex_coords: [0.0, 0.0] },
];
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

pub struct TexturePipeline {
    pipeline: wgpu::RenderPipeline,
    quad: wgpu::Buffer,
    quad_indices: wgpu::Buffer,
    transform: wgpu::Buffer,
    transform_group: wgpu::BindGroup,
    image_layout: wgpu::BindGroupLayout,
}

impl TexturePipeline {
    pub fn new(ctx: &GpuContext) -> Self {
        let device = &ctx.device;
        let shader = device.create_shader_module(wgpu::include_wgsl!("../shaders/texture.wgsl"));

        let transform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("image transform layout"),
            entries: &[builder::vertex_uniform_entry(TRANSFORM_BINDING)],
        });
        let image_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("image texture layout"),
            entries: &[
                builder::fragment_texture_entry(TEXTURE_BINDING),
                builder::fragment_sampler_entry(SAMPLER_BINDING),
            ],
        });

        let transform = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("image transform"),
            contents: bytemuck::bytes_of(&TransformUniform::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let transform_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("image transform"),
            layout: &transform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: TRANSFORM_BINDING,
                resource: transform.as_entire_binding(),
            }],
        });

        let pipeline = builder::create_pipeline(
            device,
            ctx.surface_config.format,
            PipelineDesc {
                label: "image pipeline",
                shader: &shader,
                vertex_layout: Vertex::layout(),
                bind_group_layouts: &[&transform_layout, &image_layout],
                blend: wgpu::BlendState::REPLACE,
            },
        );

        let quad = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("image quad"),
            contents: bytemuck::cast_slice(&QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("image quad indices"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            pipeline,
            quad,
            quad_indices,
            transform,
            transform_group,
            image_layout,
        }
    }

    /// Bind an uploaded image to this pipeline's layout. Must be done once before drawing it.
    pub fn bind(&self, ctx: &GpuContext, image: &mut ImageTexture) {
        image.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("image texture"),
            layout: &self.image_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: TEXTURE_BINDING,
                    resource: wgpu::BindingResource::TextureView(&image.view),
                },
                wgpu::BindGroupEntry {
                    binding: SAMPLER_BINDING,
                    resource: wgpu::BindingResource::Sampler(&image.sampler),
                },
            ],
        }));
    }

    pub fn update_transform(&self, ctx: &GpuContext, transform: TransformUniform) {
        ctx.queue
            .write_buffer(&self.transform, 0, bytemuck::bytes_of(&transform));
    }

    /// Record the image quad into `pass`. Unbound images are skipped.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, image: &ImageTexture) {
        let Some(bind_group) = &image.bind_group else {
            log::warn!("Skipping draw of an image that was never bound");
            return;
        };
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(TRANSFORM_GROUP, &self.transform_group, &[]);
        pass.set_bind_group(IMAGE_GROUP, bind_group, &[]);
        pass.set_vertex_buffer(0, self.quad.slice(..));
        pass.set_index_buffer(self.quad_indices.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_covers_surface_with_upright_uvs() {
        // Top-left corner of the surface samples the top-left texel
        let top_left = QUAD.iter().find(|v| v.position == [-1.0, 1.0]).unwrap();
        assert_eq!(top_left.tex_coords, [0.0, 0.0]);
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD.len()));
    }
}
