//! Vertex formats for the two pipelines. Positions are in NDC.

use bytemuck::{Pod, Zeroable};

/// A vertex type with a fixed attribute list at consecutive shader locations.
pub trait VertexLayout: Pod {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: Self::ATTRIBUTES,
        }
    }
}

/// Corner of the image quad.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl VertexLayout for Vertex {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] =
        &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];
}

/// Overlay shape vertex with a linear RGBA color.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl VertexLayout for ColorVertex {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] =
        &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strides_match_struct_sizes() {
        assert_eq!(Vertex::layout().array_stride, 16);
        assert_eq!(ColorVertex::layout().array_stride, 24);
        assert_eq!(ColorVertex::ATTRIBUTES[1].offset, 8);
    }
}
