//! GPU rendering for annoview: a letterboxed image quad and solid overlay shapes.

pub mod config;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod shape;
pub mod texture;
pub mod uniform;
pub mod vertex;

pub use config::{ClearColor, GpuConfig};
pub use context::GpuContext;
pub use error::{GpuError, Result};
pub use pipeline::{ColorPipeline, ShapeBuffers, TexturePipeline, begin_frame_pass};
pub use shape::ShapeBatch;
pub use texture::ImageTexture;
pub use uniform::TransformUniform;
pub use vertex::{ColorVertex, Vertex, VertexLayout};
