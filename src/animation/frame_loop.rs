use tracing::debug;

use crate::simulation::FluidCore;

use super::timers::{TimerKind, TimerQueue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Drives a [`FluidCore`] from host frame callbacks.
///
/// `start` schedules the seed splashes and the ambient interval, `frame`
/// runs one animation tick (timers, pointer force, step, render) and `stop`
/// cancels everything still pending. Frames delivered while not running are
/// ignored, so a callback that races teardown cannot touch the field.
pub struct AnimationLoop {
    core: FluidCore,
    timers: TimerQueue,
    state: LoopState,
    due: Vec<TimerKind>,
    frames: u64,
}

impl AnimationLoop {
    pub fn new(core: FluidCore) -> Self {
        Self {
            core,
            timers: TimerQueue::new(),
            state: LoopState::Idle,
            due: Vec::new(),
            frames: 0,
        }
    }

    /// Begin animating at host time `now_ms`. No-op while already running.
    pub fn start(&mut self, now_ms: f64) {
        if self.state == LoopState::Running {
            return;
        }
        let ambient = self.core.config().ambient.clone();

        self.timers.clear();
        for i in 0..ambient.seed_count {
            let due = now_ms + f64::from(i) * ambient.seed_spacing_ms;
            self.timers.schedule_once(due, TimerKind::Seed);
        }
        if ambient.interval_ms > 0.0 {
            self.timers.schedule_every(
                now_ms + ambient.interval_ms,
                ambient.interval_ms,
                TimerKind::Ambient,
            );
        }
        self.state = LoopState::Running;
        debug!(
            seeds = ambient.seed_count,
            interval_ms = ambient.interval_ms,
            "animation started"
        );
    }

    /// Run one tick at host time `now_ms`. Returns `false` (and does
    /// nothing) unless the loop is running.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if self.state != LoopState::Running {
            return false;
        }

        self.due.clear();
        self.timers.fire_due(now_ms, &mut self.due);
        for kind in self.due.drain(..) {
            match kind {
                TimerKind::Seed => self.core.seed_impulse(),
                TimerKind::Ambient => self.core.ambient_impulse(),
            }
        }

        self.core.apply_pointer_force();
        self.core.step();
        self.core.render();
        self.frames += 1;
        true
    }

    /// Cancel all pending timers and ignore further frames until `start`.
    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            debug!(frames = self.frames, pending = self.timers.len(), "animation stopped");
        }
        self.timers.clear();
        self.state = LoopState::Stopped;
    }

    pub fn state(&self) -> LoopState { self.state }

    pub fn is_running(&self) -> bool { self.state == LoopState::Running }

    pub fn pending_timers(&self) -> usize { self.timers.len() }

    pub fn frames_rendered(&self) -> u64 { self.frames }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.core.pointer_move(x, y);
    }

    /// Resize the field. Pending timers keep their schedule.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.core.resize(width, height);
    }

    pub fn core(&self) -> &FluidCore { &self.core }

    pub fn core_mut(&mut self) -> &mut FluidCore { &mut self.core }

    pub fn into_core(self) -> FluidCore { self.core }
}
