//! Frame pacing
//!
//! A [`FramePacer`] blocks until the host is ready for the next frame. In a
//! windowed build the display refresh does this; headless runs and tests use
//! the pacers here.

use std::time::{Duration, Instant};

/// Source of the "draw the next frame now" signal
pub trait FramePacer {
    /// Wait for the next frame. Returns `false` once the host is gone and no
    /// more frames will come.
    fn wait_for_frame(&mut self) -> bool;
}

/// Sleeps so frames start at a fixed interval
///
/// A frame that runs long is not made up for: the next deadline is measured
/// from when the late frame started.
#[derive(Debug)]
pub struct IntervalPacer {
    interval: Duration,
    next: Option<Instant>,
    remaining: Option<u64>,
}

impl IntervalPacer {
    /// Pace at `interval`, forever
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
            remaining: None,
        }
    }

    /// Pace at a target refresh rate in Hz
    pub fn from_hz(hz: f64) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / hz.max(1.0)))
    }

    /// Stop after `frames` frames
    pub fn with_limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }

    /// Target interval between frames
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FramePacer for IntervalPacer {
    fn wait_for_frame(&mut self) -> bool {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return false;
            }
            *remaining -= 1;
        }

        let now = Instant::now();
        if let Some(next) = self.next {
            if next > now {
                std::thread::sleep(next - now);
            }
        }
        self.next = Some(Instant::now() + self.interval);
        true
    }
}

/// Yields a fixed number of frames without sleeping
#[derive(Clone, Copy, Debug)]
pub struct FrameLimit {
    remaining: u64,
}

impl FrameLimit {
    pub fn new(frames: u64) -> Self {
        Self { remaining: frames }
    }

    /// Frames still to be yielded
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl FramePacer for FrameLimit {
    fn wait_for_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}
