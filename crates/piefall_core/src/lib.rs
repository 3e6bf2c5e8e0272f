//! Core loop for Piefall
//!
//! This crate ties the falling-object simulation to a host:
//!
//! - [`Simulation`] - Object registry, per-kind configuration, RNG and asset templates
//! - [`FrameDriver`] - Runs integrate, separate, recycle and render once per frame
//! - [`Renderer`] - Seam for whatever draws the registry
//! - [`FramePacer`] - Seam for the display refresh signal
//! - [`StopHandle`] - Cloneable signal that ends [`FrameDriver::run`]

mod driver;
mod error;
mod pacer;
mod renderer;
mod simulation;

pub use driver::{FrameDriver, StopHandle, TickReport};
pub use error::PopulateError;
pub use pacer::{FrameLimit, FramePacer, IntervalPacer};
pub use renderer::{NullRenderer, Renderer};
pub use simulation::{Simulation, TemplateInfo};

// Re-export simulation types for convenient access through piefall_core
pub use piefall_physics::{
    FallConfig, FallWorld, FallingBody, KindConfig, KindConfigError, ObjectKey, ObjectKind,
    StepStats, TemplateId, Transform,
};
pub use piefall_math::{UniformRange, Vec3};
