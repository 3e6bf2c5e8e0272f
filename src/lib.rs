//! Piefall: decorative "coming soon" scene of falling pies and text
//!
//! The simulation lives in the `piefall_*` crates; this crate wires it to a
//! window, a GPU renderer, the template loader, and configuration.

pub mod config;
pub mod loader;
pub mod systems;
