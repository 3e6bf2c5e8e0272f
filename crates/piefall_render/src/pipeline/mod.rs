//! Rendering pipeline components

pub mod mesh_pipeline;
pub mod types;

pub use mesh_pipeline::{GpuMesh, MeshPipeline};
pub use types::{InstanceRaw, MeshVertex, RenderUniforms};
