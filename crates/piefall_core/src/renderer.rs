//! Rendering seam
//!
//! The frame driver knows nothing about GPUs or windows. Anything that can
//! draw the registry once per frame implements [`Renderer`].

use std::convert::Infallible;

use piefall_physics::FallWorld;

/// Draws the current state of the registry
pub trait Renderer {
    /// Error returned when a frame cannot be drawn
    type Error: std::error::Error;

    /// Draw one frame. Called exactly once per tick, after recycling.
    fn render(&mut self, world: &FallWorld) -> Result<(), Self::Error>;
}

/// Closures can stand in for a renderer, e.g. in tests or headless runs
impl<F> Renderer for F
where
    F: FnMut(&FallWorld),
{
    type Error = Infallible;

    fn render(&mut self, world: &FallWorld) -> Result<(), Self::Error> {
        self(world);
        Ok(())
    }
}

/// A renderer that draws nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    type Error = Infallible;

    fn render(&mut self, _world: &FallWorld) -> Result<(), Self::Error> {
        Ok(())
    }
}
