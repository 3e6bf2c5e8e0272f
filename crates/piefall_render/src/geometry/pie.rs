//! Pie mesh: a flat disc with one slice cut out
//!
//! Stand-in for the loaded character model. The disc lies in the XZ plane,
//! centered on the origin.

use std::f32::consts::TAU;

use piefall_math::Vec3;

use super::MeshData;

/// Dimensions of a pie mesh
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieShape {
    pub radius: f32,
    pub thickness: f32,
    /// Number of rim segments over the full circle
    pub segments: u32,
    /// Angle of the missing slice in radians (0 for a whole pie)
    pub missing_slice: f32,
}

impl Default for PieShape {
    fn default() -> Self {
        Self {
            radius: 1.5,
            thickness: 0.5,
            segments: 32,
            missing_slice: TAU / 8.0,
        }
    }
}

/// Build a pie mesh
pub fn pie_mesh(shape: &PieShape) -> MeshData {
    let h = shape.thickness * 0.5;
    let r = shape.radius;
    let missing = shape.missing_slice.clamp(0.0, TAU * 0.75);
    let start = missing * 0.5;
    let sweep = TAU - missing;

    // Keep the angular resolution of the full circle
    let steps = ((shape.segments.max(3) as f32) * sweep / TAU).ceil().max(1.0) as u32;

    let top_center = Vec3::new(0.0, h, 0.0);
    let bottom_center = Vec3::new(0.0, -h, 0.0);
    let rim = |theta: f32, y: f32| Vec3::new(r * theta.cos(), y, r * theta.sin());

    let mut mesh = MeshData::with_capacity(steps as usize * 14 + 8, steps as usize * 18 + 12);
    for i in 0..steps {
        let a = start + sweep * i as f32 / steps as f32;
        let b = start + sweep * (i + 1) as f32 / steps as f32;

        mesh.push_triangle(top_center, rim(b, h), rim(a, h));
        mesh.push_triangle(bottom_center, rim(a, -h), rim(b, -h));
        mesh.push_quad(rim(a, -h), rim(a, h), rim(b, h), rim(b, -h));
    }

    // Cut faces where the slice was removed
    if missing > 0.0 {
        let end = start + sweep;
        mesh.push_quad(bottom_center, top_center, rim(start, h), rim(start, -h));
        mesh.push_quad(bottom_center, rim(end, -h), rim(end, h), top_center);
    }

    mesh
}
