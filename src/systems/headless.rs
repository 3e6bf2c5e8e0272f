//! Headless rendering
//!
//! Stands in for the GPU when no window is wanted: each frame is "drawn" by
//! summarizing the registry to the log.

use std::convert::Infallible;

use piefall_core::{FallWorld, ObjectKind, Renderer};

/// What a headless frame looked like
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameSummary {
    pub models: usize,
    pub texts: usize,
    /// Lowest object height, if any objects exist
    pub lowest_y: Option<f32>,
    /// Highest object height, if any objects exist
    pub highest_y: Option<f32>,
}

impl FrameSummary {
    /// Summarize the current registry
    pub fn of(world: &FallWorld) -> Self {
        let mut summary = Self::default();
        for (_, body) in world.iter() {
            match body.kind() {
                ObjectKind::Model => summary.models += 1,
                ObjectKind::Text => summary.texts += 1,
            }
            let y = body.position().y;
            summary.lowest_y = Some(summary.lowest_y.map_or(y, |low| low.min(y)));
            summary.highest_y = Some(summary.highest_y.map_or(y, |high| high.max(y)));
        }
        summary
    }
}

/// Renderer that logs a [`FrameSummary`] every `interval` frames
#[derive(Debug)]
pub struct LogRenderer {
    interval: u64,
    frames: u64,
    last: FrameSummary,
}

impl LogRenderer {
    /// Log every `interval` frames (0 never logs)
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            frames: 0,
            last: FrameSummary::default(),
        }
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Summary of the most recent frame
    pub fn last_summary(&self) -> FrameSummary {
        self.last
    }
}

impl Renderer for LogRenderer {
    type Error = Infallible;

    fn render(&mut self, world: &FallWorld) -> Result<(), Infallible> {
        self.last = FrameSummary::of(world);
        if self.interval > 0 && self.frames % self.interval == 0 {
            log::info!(
                "frame {}: {} models, {} texts, y in [{:.2}, {:.2}]",
                self.frames,
                self.last.models,
                self.last.texts,
                self.last.lowest_y.unwrap_or(0.0),
                self.last.highest_y.unwrap_or(0.0)
            );
        }
        self.frames += 1;
        Ok(())
    }
}
