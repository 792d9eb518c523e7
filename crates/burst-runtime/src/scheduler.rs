//! Frame scheduler — requests display frames only while a system is busy.
//!
//! Two states: `Paused` (no frames requested) and `Active` (one tick per
//! display refresh). Impulse delivery goes through [`FrameScheduler::deliver`]
//! so that a spawn flips the scheduler to `Active` before the next frame
//! boundary; the tick that empties the system flips it back to `Paused`.

use crate::clock::FrameClock;
use crate::system::FrameSystem;

/// Host hook that starts and stops frame delivery (a display link, a
/// requestAnimationFrame loop, a winit redraw request, ...).
pub trait DisplayLink {
    /// Begin requesting a frame on every display refresh
    fn start(&mut self);

    /// Stop requesting frames
    fn stop(&mut self);
}

/// A display link that does nothing, for hosts that poll `is_active` instead
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLink;

impl DisplayLink for NullLink {
    fn start(&mut self) {}
    fn stop(&mut self) {}
}

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Nothing to animate; no frames requested
    Paused,
    /// At least one live particle; ticking every frame
    Active,
}

/// Drives a [`FrameSystem`] from host frame timestamps.
pub struct FrameScheduler<S: FrameSystem, L: DisplayLink = NullLink> {
    system: S,
    link: L,
    clock: FrameClock,
    state: SchedulerState,
}

impl<S: FrameSystem> FrameScheduler<S, NullLink> {
    /// Create a scheduler without a display link
    pub fn new(system: S) -> Self {
        Self::with_link(system, NullLink)
    }
}

impl<S: FrameSystem, L: DisplayLink> FrameScheduler<S, L> {
    /// Create a scheduler that toggles `link` on state transitions.
    ///
    /// A system that is already busy starts the scheduler `Active`.
    pub fn with_link(system: S, link: L) -> Self {
        let mut scheduler = Self {
            system,
            link,
            clock: FrameClock::new(),
            state: SchedulerState::Paused,
        };
        scheduler.resume_if_busy();
        scheduler
    }

    /// Replace the clock (e.g. one with a different clamp ceiling)
    pub fn with_clock(mut self, clock: FrameClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SchedulerState::Active
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    /// Mutable access to the system. [`Self::deliver`] resumes immediately;
    /// work added through here is picked up on the next [`Self::on_frame`].
    pub fn system_mut(&mut self) -> &mut S {
        &mut self.system
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    /// Run an impulse-delivery closure against the system, then resume
    /// frame delivery if the system now has work.
    pub fn deliver<R>(&mut self, f: impl FnOnce(&mut S) -> R) -> R {
        let result = f(&mut self.system);
        self.resume_if_busy();
        result
    }

    /// Handle one display frame at host `timestamp` (seconds).
    ///
    /// A paused scheduler whose system gained work outside [`Self::deliver`]
    /// resumes here, and this frame becomes the zero-length first frame.
    ///
    /// Returns whether the scheduler is still active afterwards.
    pub fn on_frame(&mut self, timestamp: f64) -> bool {
        self.resume_if_busy();
        if self.state == SchedulerState::Paused {
            return false;
        }

        let dt = self.clock.advance(timestamp);
        self.system.tick(dt);

        if self.system.is_idle() {
            self.state = SchedulerState::Paused;
            self.link.stop();
            log::debug!(
                "[{}] idle after {} frame(s), pausing",
                self.system.name(),
                self.clock.frame_count
            );
        }
        self.is_active()
    }

    /// Split the scheduler back into its system and link
    pub fn into_parts(self) -> (S, L) {
        (self.system, self.link)
    }

    fn resume_if_busy(&mut self) {
        if self.state == SchedulerState::Paused && !self.system.is_idle() {
            self.state = SchedulerState::Active;
            self.clock.reset();
            self.link.start();
            log::debug!("[{}] work pending, resuming frames", self.system.name());
        }
    }
}
