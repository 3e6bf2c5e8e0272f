//! Falling-object simulation for Piefall
//!
//! This crate provides the per-tick motion of decorative falling objects:
//! - Object records with immutable per-object speeds
//! - The object registry ([`FallWorld`])
//! - Motion integration (fall + spin)
//! - Pairwise proximity separation
//! - Recycling of objects that dropped below their kind's bound
//!
//! All speeds are "per tick": the simulation is frame-rate coupled and takes
//! no delta time.

pub mod body;
pub mod config;
pub mod integrate;
pub mod recycle;
pub mod separation;
pub mod world;

// Re-export commonly used types
pub use body::{FallingBody, ObjectKey, ObjectKind, TemplateId, Transform};
pub use config::{FallConfig, KindConfig, KindConfigError};
pub use integrate::integrate_all;
pub use recycle::recycle_all;
pub use separation::separate_all;
pub use world::{FallWorld, StepStats};
