//! Procedural template meshes
//!
//! Meshes are flat-shaded triangle lists with outward-facing, counter-clockwise
//! winding.

mod pie;
mod text;

pub use pie::{pie_mesh, PieShape};
pub use text::{glyph_rows, text_mesh, GLYPH_HEIGHT, GLYPH_WIDTH};

use piefall_math::Vec3;

use crate::pipeline::MeshVertex;

/// CPU-side indexed mesh
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with pre-allocated capacity
    pub fn with_capacity(vertex_capacity: usize, index_capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(index_capacity),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Add a flat-shaded triangle; the normal follows the winding
    pub fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        let normal = (b - a).cross(c - a).normalized().to_array();
        let base = self.vertices.len() as u32;
        for p in [a, b, c] {
            self.vertices.push(MeshVertex::new(p.to_array(), normal));
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    /// Add a flat-shaded planar quad with corners in counter-clockwise order
    pub fn push_quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3) {
        let normal = (b - a).cross(c - a).normalized().to_array();
        let base = self.vertices.len() as u32;
        for p in [a, b, c, d] {
            self.vertices.push(MeshVertex::new(p.to_array(), normal));
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Add an axis-aligned box
    pub fn push_box(&mut self, min: Vec3, max: Vec3) {
        let (x0, y0, z0) = (min.x, min.y, min.z);
        let (x1, y1, z1) = (max.x, max.y, max.z);

        // +X, -X
        self.push_quad(
            Vec3::new(x1, y0, z1), Vec3::new(x1, y0, z0),
            Vec3::new(x1, y1, z0), Vec3::new(x1, y1, z1),
        );
        self.push_quad(
            Vec3::new(x0, y0, z0), Vec3::new(x0, y0, z1),
            Vec3::new(x0, y1, z1), Vec3::new(x0, y1, z0),
        );
        // +Y, -Y
        self.push_quad(
            Vec3::new(x0, y1, z1), Vec3::new(x1, y1, z1),
            Vec3::new(x1, y1, z0), Vec3::new(x0, y1, z0),
        );
        self.push_quad(
            Vec3::new(x0, y0, z0), Vec3::new(x1, y0, z0),
            Vec3::new(x1, y0, z1), Vec3::new(x0, y0, z1),
        );
        // +Z, -Z
        self.push_quad(
            Vec3::new(x0, y0, z1), Vec3::new(x1, y0, z1),
            Vec3::new(x1, y1, z1), Vec3::new(x0, y1, z1),
        );
        self.push_quad(
            Vec3::new(x1, y0, z0), Vec3::new(x0, y0, z0),
            Vec3::new(x0, y1, z0), Vec3::new(x1, y1, z0),
        );
    }

    /// Axis-aligned bounds, or `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = Vec3::from(self.vertices.first()?.position);
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            let p = Vec3::from(v.position);
            (
                Vec3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                Vec3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        }))
    }

    /// Move every vertex by `offset`
    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            v.position = (Vec3::from(v.position) + offset).to_array();
        }
    }

    /// Translate so the bounding box is centered on the origin
    pub fn center(&mut self) {
        if let Some((lo, hi)) = self.bounds() {
            self.translate(-(lo + hi) * 0.5);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_counts() {
        let mut mesh = MeshData::new();
        mesh.push_box(Vec3::ZERO, Vec3::ONE);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn test_box_normals_point_outward() {
        let mut mesh = MeshData::new();
        let (min, max) = (Vec3::new(-1.0, -2.0, -0.5), Vec3::new(1.0, 2.0, 0.5));
        mesh.push_box(min, max);
        let center = (min + max) * 0.5;

        for quad in mesh.vertices.chunks(4) {
            let normal = Vec3::from(quad[0].normal);
            let face_center = quad
                .iter()
                .fold(Vec3::ZERO, |acc, v| acc + Vec3::from(v.position))
                * 0.25;
            assert!(normal.dot(face_center - center) > 0.0, "inward normal {:?}", normal);
            assert!((normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_center() {
        let mut mesh = MeshData::new();
        mesh.push_box(Vec3::new(2.0, 2.0, 2.0), Vec3::new(4.0, 6.0, 3.0));
        mesh.center();
        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(lo, Vec3::new(-1.0, -2.0, -0.5));
        assert_eq!(hi, Vec3::new(1.0, 2.0, 0.5));
    }

    #[test]
    fn test_empty_bounds() {
        assert!(MeshData::new().bounds().is_none());
        assert!(MeshData::new().is_empty());
    }
}
