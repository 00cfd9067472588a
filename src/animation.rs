//! Frame timing.
//!
//! [`Clock`] measures wall-clock time since its first use; [`FrameScheduler`]
//! is the host's "call me before the next paint" primitive, implemented by
//! the winit window.

use instant::{Duration, Instant};

/// Elapsed-time clock that starts the first time it is read.
#[derive(Debug, Default)]
pub struct Clock {
    start: Option<Instant>,
}

impl Clock {
    pub fn new() -> Self {
        Self { start: None }
    }

    pub fn is_running(&self) -> bool {
        self.start.is_some()
    }

    pub fn elapsed(&mut self) -> Duration {
        self.start.get_or_insert_with(Instant::now).elapsed()
    }

    /// Seconds since the first read; monotonically non-decreasing.
    pub fn elapsed_secs(&mut self) -> f32 {
        self.elapsed().as_secs_f32()
    }
}

/// Something that can schedule one more frame.
pub trait FrameScheduler {
    fn request_frame(&self);
}

impl FrameScheduler for winit::window::Window {
    fn request_frame(&self) {
        self.request_redraw();
    }
}
