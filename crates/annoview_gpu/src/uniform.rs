//! Uniform types shared with the WGSL shaders.

use bytemuck::{Pod, Zeroable};

/// 4x4 column-major transform applied to the image quad.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TransformUniform {
    pub matrix: [[f32; 4]; 4],
}

impl TransformUniform {
    pub fn new() -> Self {
        Self {
            matrix: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Scale the unit quad to `scale_x`/`scale_y` and move its center to the offset (NDC).
    pub fn from_scale_offset(scale_x: f32, scale_y: f32, offset_x: f32, offset_y: f32) -> Self {
        Self {
            matrix: [
                [scale_x, 0.0, 0.0, 0.0],
                [0.0, scale_y, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [offset_x, offset_y, 0.0, 1.0],
            ],
        }
    }

    /// Map the quad onto a window-pixel rectangle on a surface of the given size.
    pub fn for_screen_rect(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        surface_width: f32,
        surface_height: f32,
    ) -> Self {
        let center_x = x + width / 2.0;
        let center_y = y + height / 2.0;
        Self::from_scale_offset(
            width / surface_width,
            height / surface_height,
            center_x / surface_width * 2.0 - 1.0,
            1.0 - center_y / surface_height * 2.0,
        )
    }
}

impl Default for TransformUniform {
    fn default() -> Self {
        Self::new()
    }
}
