//! Math library for Piefall
//!
//! Small, dependency-light types shared by the simulation and the renderer.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components (also used for Euler angles)
//! - [`Mat4`] - column-major 4x4 matrix for model transforms
//! - [`UniformRange`] - half-open interval that can be sampled uniformly

mod vec3;
pub mod mat4;
pub mod range;

pub use vec3::Vec3;
pub use mat4::Mat4;
pub use range::UniformRange;
