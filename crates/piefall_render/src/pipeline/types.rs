//! GPU-compatible data types for the instanced mesh pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use piefall_math::mat4::IDENTITY;

/// A mesh vertex in model space
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Position in model space
    pub position: [f32; 3],
    /// Surface normal for lighting
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Per-instance data for one falling object
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    /// Model matrix, column-major
    pub model: [[f32; 4]; 4],
    /// Linear RGBA color
    pub color: [f32; 4],
}

impl Default for InstanceRaw {
    fn default() -> Self {
        Self {
            model: IDENTITY,
            color: [1.0; 4],
        }
    }
}

/// Render uniforms shared by every draw
/// Layout: 160 bytes total (must match instanced.wgsl RenderUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct RenderUniforms {
    /// View matrix (64 bytes)
    pub view_matrix: [[f32; 4]; 4],
    /// Projection matrix (64 bytes)
    pub projection_matrix: [[f32; 4]; 4],
    /// Direction towards the light (normalized) + ambient strength (16 bytes)
    pub light_dir: [f32; 3],
    pub ambient_strength: f32,
    /// Directional light strength + padding (16 bytes)
    pub diffuse_strength: f32,
    pub _padding: [f32; 3],
}

impl Default for RenderUniforms {
    fn default() -> Self {
        Self {
            view_matrix: IDENTITY,
            projection_matrix: IDENTITY,
            light_dir: [0.0, 0.70710677, 0.70710677],
            ambient_strength: 0.5,
            diffuse_strength: 1.0,
            _padding: [0.0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_mesh_vertex_size() {
        // 3 floats position + 3 floats normal = 24 bytes
        assert_eq!(size_of::<MeshVertex>(), 24);
    }

    #[test]
    fn test_instance_size() {
        // 16 floats matrix + 4 floats color = 80 bytes
        assert_eq!(size_of::<InstanceRaw>(), 80);
    }

    #[test]
    fn test_render_uniforms_size() {
        // 16 + 16 floats matrices + 3 light_dir + ambient + diffuse + 3 padding = 40 floats
        assert_eq!(size_of::<RenderUniforms>(), 160);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(std::mem::align_of::<MeshVertex>(), 4);
        assert_eq!(std::mem::align_of::<InstanceRaw>(), 4);
        assert_eq!(std::mem::align_of::<RenderUniforms>(), 4);
    }
}
