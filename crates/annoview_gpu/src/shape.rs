//! CPU-side tessellation of overlay shapes.
//!
//! Shapes are pushed in window pixels (origin top-left, y down) and stored as
//! NDC triangles ready for [`ColorPipeline`](crate::ColorPipeline).

use crate::vertex::ColorVertex;

/// Convert an sRGB byte triple plus alpha into the linear color the surface expects.
pub fn srgb8_to_linear(rgb: [u8; 3], alpha: f32) -> [f32; 4] {
    fn channel(c: u8) -> f32 {
        let c = f32::from(c) / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    [channel(rgb[0]), channel(rgb[1]), channel(rgb[2]), alpha]
}

/// A batch of solid-color triangles for one frame.
#[derive(Debug, Clone)]
pub struct ShapeBatch {
    surface_width: f32,
    surface_height: f32,
    vertices: Vec<ColorVertex>,
    indices: Vec<u32>,
}

impl ShapeBatch {
    pub fn new(surface_width: u32, surface_height: u32) -> Self {
        Self {
            surface_width: surface_width.max(1) as f32,
            surface_height: surface_height.max(1) as f32,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn vertices(&self) -> &[ColorVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn to_ndc(&self, x: f32, y: f32) -> [f32; 2] {
        [
            (x / self.surface_width) * 2.0 - 1.0,
            1.0 - (y / self.surface_height) * 2.0,
        ]
    }

    fn push_quad(&mut self, corners: [(f32, f32); 4], color: [f32; 4]) {
        let base = self.vertices.len() as u32;
        for (x, y) in corners {
            let position = self.to_ndc(x, y);
            self.vertices.push(ColorVertex { position, color });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Filled axis-aligned rectangle.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) {
        self.push_quad(
            [
                (x, y),
                (x + width, y),
                (x + width, y + height),
                (x, y + height),
            ],
            color,
        );
    }

    /// Rectangle outline drawn inside the given bounds as four edge quads.
    ///
    /// A degenerate (zero-size) rectangle still shows as a `thickness` square.
    pub fn stroke_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        thickness: f32,
        color: [f32; 4],
    ) {
        let width = width.max(thickness);
        let height = height.max(thickness);
        let t = thickness.min(width / 2.0).min(height / 2.0).max(0.5);

        // Top, bottom, left, right
        self.fill_rect(x, y, width, t, color);
        self.fill_rect(x, y + height - t, width, t, color);
        self.fill_rect(x, y + t, t, height - 2.0 * t, color);
        self.fill_rect(x + width - t, y + t, t, height - 2.0 * t, color);
    }

    /// Filled circle as a triangle fan around the center.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, segments: u32, color: [f32; 4]) {
        let segments = segments.max(3);
        let center = self.vertices.len() as u32;
        let position = self.to_ndc(cx, cy);
        self.vertices.push(ColorVertex { position, color });

        for i in 0..segments {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            let position = self.to_ndc(cx + radius * angle.cos(), cy + radius * angle.sin());
            self.vertices.push(ColorVertex { position, color });
        }

        for i in 0..segments {
            let current = center + 1 + i;
            let next = center + 1 + (i + 1) % segments;
            self.indices.extend_from_slice(&[center, current, next]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_fill_rect_maps_to_ndc() {
        let mut batch = ShapeBatch::new(200, 100);
        batch.fill_rect(0.0, 0.0, 100.0, 50.0, RED);

        assert_eq!(batch.vertices().len(), 4);
        assert_eq!(batch.indices(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(batch.vertices()[0].position, [-1.0, 1.0]);
        assert_eq!(batch.vertices()[2].position, [0.0, 0.0]);
    }

    #[test]
    fn test_stroke_rect_is_four_quads() {
        let mut batch = ShapeBatch::new(200, 200);
        batch.stroke_rect(10.0, 10.0, 50.0, 40.0, 2.0, RED);
        assert_eq!(batch.vertices().len(), 16);
        assert_eq!(batch.indices().len(), 24);
    }

    #[test]
    fn test_circle_fan_indices_stay_in_range() {
        let mut batch = ShapeBatch::new(100, 100);
        batch.fill_rect(0.0, 0.0, 1.0, 1.0, RED);
        batch.fill_circle(50.0, 50.0, 10.0, 16, RED);

        assert_eq!(batch.vertices().len(), 4 + 17);
        assert_eq!(batch.indices().len(), 6 + 16 * 3);
        let max = *batch.indices().iter().max().unwrap();
        assert!((max as usize) < batch.vertices().len());
        // The fan starts at the circle's center vertex
        assert_eq!(batch.indices()[6], 4);
    }

    #[test]
    fn test_srgb_endpoints() {
        assert_eq!(srgb8_to_linear([0, 0, 0], 1.0), [0.0, 0.0, 0.0, 1.0]);
        let white = srgb8_to_linear([255, 255, 255], 0.5);
        assert!((white[0] - 1.0).abs() < 1e-5);
        assert_eq!(white[3], 0.5);
    }
}
