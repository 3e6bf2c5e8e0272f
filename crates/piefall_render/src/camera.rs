//! Fixed perspective camera
//!
//! The scene is viewed from a single static point on +Z looking at the
//! origin. Depth maps to wgpu's `[0, 1]` clip range.

use piefall_math::{Mat4, Vec3};

/// Perspective camera looking at a target point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Camera at z = 30 looking at the origin with a 75° field of view
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 30.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        look_at_matrix(self.position, self.target, self.up)
    }

    /// View-to-clip matrix for the given aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        perspective_matrix(self.fov.to_radians(), aspect, self.near, self.far)
    }
}

/// Right-handed perspective projection with depth in `[0, 1]`
pub fn perspective_matrix(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * nf, -1.0],
        [0.0, 0.0, near * far * nf, 0.0],
    ]
}

/// Right-handed look-at view matrix
pub fn look_at_matrix(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ]
}
