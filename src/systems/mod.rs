//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod headless;
mod render;
mod simulation;
mod window;

pub use headless::{FrameSummary, LogRenderer};
pub use render::{build_uniforms, camera_from_config, RenderSystem};
pub use simulation::SimulationSystem;
pub use window::{WindowError, WindowSystem};
