//! Frame-driven animation around a [`FluidCore`](crate::simulation::FluidCore)
//!
//! The host supplies a monotonic clock through `frame(now_ms)`; seed and
//! ambient splashes are scheduled against that clock.

mod frame_loop;
mod timers;

pub use frame_loop::{AnimationLoop, LoopState};
pub use timers::{TimerId, TimerKind, TimerQueue};
