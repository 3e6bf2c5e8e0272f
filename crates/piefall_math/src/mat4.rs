//! 4x4 matrix utilities for 3D model transforms
//!
//! Matrices are column-major (`m[column][row]`), matching WGSL `mat4x4<f32>`
//! so they can be uploaded without transposing.

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Create a rotation matrix in the plane spanned by two axes.
///
/// Rotates axis `p1` toward axis `p2` by `angle` radians (0=X, 1=Y, 2=Z).
/// `plane_rotation(a, 1, 2)` is a rotation about X, `(a, 2, 0)` about Y and
/// `(a, 0, 1)` about Z.
pub fn plane_rotation(angle: f32, p1: usize, p2: usize) -> Mat4 {
    let cs = angle.cos();
    let sn = angle.sin();

    let mut m = IDENTITY;

    m[p1][p1] = cs;
    m[p2][p2] = cs;
    m[p1][p2] = sn;
    m[p2][p1] = -sn;

    m
}

/// Rotation matrix from XYZ Euler angles (radians).
///
/// Composed as `Rx * Ry * Rz`, so Z is applied first.
pub fn euler_xyz(angles: Vec3) -> Mat4 {
    let rx = plane_rotation(angles.x, 1, 2);
    let ry = plane_rotation(angles.y, 2, 0);
    let rz = plane_rotation(angles.z, 0, 1);
    mul(rx, mul(ry, rz))
}

/// Translation matrix
pub fn translation(offset: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = offset.x;
    m[3][1] = offset.y;
    m[3][2] = offset.z;
    m
}

/// Uniform scale matrix
pub fn uniform_scale(scale: f32) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = scale;
    m[1][1] = scale;
    m[2][2] = scale;
    m
}

/// Build a model matrix: scale, then rotate, then translate.
pub fn model_matrix(position: Vec3, rotation: Vec3, scale: f32) -> Mat4 {
    mul(translation(position), mul(euler_xyz(rotation), uniform_scale(scale)))
}

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a point (w = 1) by a 4x4 matrix
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}
