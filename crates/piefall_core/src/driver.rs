//! Frame driver
//!
//! One tick is: integrate every object, run the separator over all pairs,
//! recycle objects that fell out of view, then render exactly once. The
//! phases never interleave, so the renderer always sees a fully updated
//! registry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use piefall_physics::StepStats;

use crate::pacer::FramePacer;
use crate::renderer::Renderer;
use crate::simulation::Simulation;

/// Cloneable signal that stops [`FrameDriver::run`] before the next frame
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the driver to stop
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Check whether a stop was requested
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// What happened during one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Index of the frame that was just drawn, starting at 0
    pub frame: u64,
    /// Phase counters from the simulation step
    pub stats: StepStats,
}

/// Runs the per-frame update loop over a [`Simulation`]
pub struct FrameDriver {
    simulation: Simulation,
    frame_index: u64,
    stop: StopHandle,
}

impl FrameDriver {
    pub fn new(simulation: Simulation) -> Self {
        Self {
            simulation,
            frame_index: 0,
            stop: StopHandle::new(),
        }
    }

    /// Get a handle that can stop [`run`](Self::run) from anywhere
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Number of ticks completed so far
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    /// Consume the driver and return its simulation
    pub fn into_simulation(self) -> Simulation {
        self.simulation
    }

    /// Run one frame: integrate, separate, recycle, then render once
    ///
    /// With an empty registry the update phases do nothing, but the frame is
    /// still rendered. Only the renderer can fail.
    pub fn tick<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Result<TickReport, R::Error> {
        let stats = self.simulation.step();
        renderer.render(self.simulation.world())?;

        let report = TickReport {
            frame: self.frame_index,
            stats,
        };
        self.frame_index += 1;

        if stats.recycled > 0 {
            log::debug!("frame {}: recycled {} objects", report.frame, stats.recycled);
        }
        log::trace!(
            "frame {}: moved {}, {} separation pushes",
            report.frame,
            stats.moved,
            stats.nudges
        );
        Ok(report)
    }

    /// Tick once per paced frame until the pacer runs out or a stop is requested
    ///
    /// The stop signal is checked before waiting and again after, so a stop
    /// raised while the pacer sleeps never produces another frame. Returns the
    /// number of frames run. A renderer error ends the loop and is returned.
    pub fn run<P, R>(&mut self, pacer: &mut P, renderer: &mut R) -> Result<u64, R::Error>
    where
        P: FramePacer + ?Sized,
        R: Renderer + ?Sized,
    {
        self.run_with(pacer, renderer, |_| {})
    }

    /// Like [`run`](Self::run), calling `before_tick` ahead of every tick
    ///
    /// The hook may register templates and populate them; objects it adds are
    /// updated and drawn in the same frame.
    pub fn run_with<P, R, F>(
        &mut self,
        pacer: &mut P,
        renderer: &mut R,
        mut before_tick: F,
    ) -> Result<u64, R::Error>
    where
        P: FramePacer + ?Sized,
        R: Renderer + ?Sized,
        F: FnMut(&mut Simulation),
    {
        let mut frames = 0;
        while !self.stop.is_stopped() && pacer.wait_for_frame() {
            if self.stop.is_stopped() {
                break;
            }
            before_tick(&mut self.simulation);
            self.tick(renderer)?;
            frames += 1;
        }
        log::info!("Frame driver stopped after {} frames", frames);
        Ok(frames)
    }
}
