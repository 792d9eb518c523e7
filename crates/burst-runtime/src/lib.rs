//! Burst Runtime - Frame scheduling infrastructure
//!
//! Provides the building blocks for driving a simulation from a host's
//! display refresh:
//! - `FrameClock` — timestamp-to-delta conversion with a clamped step
//! - `FrameScheduler` — Paused/Active state machine that only requests frames
//!   while the simulation has work to do
//! - `DisplayLink` — host hook for starting and stopping frame delivery
//! - `FrameSystem` — trait for systems ticked by the scheduler

mod clock;
mod scheduler;
mod system;

pub use clock::{FrameClock, DEFAULT_MAX_DELTA};
pub use scheduler::{DisplayLink, FrameScheduler, NullLink, SchedulerState};
pub use system::FrameSystem;
