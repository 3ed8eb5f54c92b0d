//! Pipeline for solid-color overlay shapes.

use wgpu::util::DeviceExt;

use super::builder::{self, PipelineDesc};
use crate::shape::ShapeBatch;
use crate::vertex::{ColorVertex, VertexLayout};

/// A [`ShapeBatch`] uploaded for one frame.
pub struct ShapeBuffers {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

pub struct ColorPipeline {
    pipeline: wgpu::RenderPipeline,
}

impl ColorPipeline {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::include_wgsl!("../shaders/color.wgsl"));
        let pipeline = builder::create_pipeline(
            device,
            format,
            PipelineDesc {
                label: "shape pipeline",
                shader: &shader,
                vertex_layout: ColorVertex::layout(),
                bind_group_layouts: &[],
                blend: wgpu::BlendState::ALPHA_BLENDING,
            },
        );
        Self { pipeline }
    }

    /// Upload a batch. `None` when it has nothing to draw.
    pub fn prepare(&self, device: &wgpu::Device, batch: &ShapeBatch) -> Option<ShapeBuffers> {
        if batch.is_empty() {
            return None;
        }
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("shape vertices"),
            contents: bytemuck::cast_slice(batch.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("shape indices"),
            contents: bytemuck::cast_slice(batch.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });
        Some(ShapeBuffers {
            vertices,
            indices,
            index_count: batch.indices().len() as u32,
        })
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, shapes: &ShapeBuffers) {
        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(0, shapes.vertices.slice(..));
        pass.set_index_buffer(shapes.indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..shapes.index_count, 0, 0..1);
    }
}
