//! Piefall Rendering Library
//!
//! This crate provides the wgpu-based pipeline that draws every falling
//! object as an instance of its template's mesh.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::Camera`] - Fixed perspective camera looking down -Z
//! - [`pipeline::MeshPipeline`] - Instanced mesh rendering with lighting
//! - [`renderable::InstanceBatches`] - Converts the object registry to per-template instance data
//! - [`geometry`] - Procedural meshes for the model and text templates

pub mod camera;
pub mod context;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod renderable;

pub use camera::Camera;
pub use error::RenderError;
pub use geometry::MeshData;
pub use renderable::{InstanceBatches, KindPalette, color_from_hex};

// Re-export simulation types for convenience
pub use piefall_physics::{FallWorld, FallingBody, ObjectKind, TemplateId};
