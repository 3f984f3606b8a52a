use std::f32::consts::TAU;

use rand::Rng;

use crate::core::{FluidFields, GridDims};
use crate::systems::fluid;

use super::init::create_render_buffers;
use super::FluidCore;

/// Current and previous pointer position in display pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub px: f32,
    pub py: f32,
}

impl PointerState {
    pub fn delta(&self) -> (f32, f32) {
        (self.x - self.px, self.y - self.py)
    }
}

pub(super) fn resize(core: &mut FluidCore, width: u32, height: u32) {
    let dims = GridDims::for_viewport(width, height, core.config.sim_scale);
    core.fields = FluidFields::new(dims);
    core.render = create_render_buffers(dims, width, height);
    core.display_width = width;
    core.display_height = height;
    core.frame = 0;
    core.injections = 0;
    tracing::debug!(
        width,
        height,
        grid_w = dims.width(),
        grid_h = dims.height(),
        "fluid grid resized"
    );
}

pub(super) fn inject_force(core: &mut FluidCore, px: f32, py: f32, fx: f32, fy: f32) {
    let scale = core.config.sim_scale as f32;
    let touched = fluid::splat(
        &mut core.fields,
        px / scale,
        py / scale,
        fx,
        fy,
        &core.config.injection,
    );
    if touched > 0 {
        core.injections = core.injections.saturating_add(1);
    }
}

pub(super) fn pointer_move(core: &mut FluidCore, x: f32, y: f32) {
    core.pointer.x = x;
    core.pointer.y = y;
}

pub(super) fn apply_pointer_force(core: &mut FluidCore) -> bool {
    let (dx, dy) = core.pointer.delta();
    let threshold = core.config.injection.pointer_threshold;
    let moved = dx.abs() > threshold || dy.abs() > threshold;
    if moved {
        let (x, y) = (core.pointer.x, core.pointer.y);
        inject_force(core, x, y, dx, dy);
    }
    core.pointer.px = core.pointer.x;
    core.pointer.py = core.pointer.y;
    moved
}

pub(super) fn ambient_impulse(core: &mut FluidCore) {
    let ambient = &core.config.ambient;
    let (speed_min, speed_max) = (ambient.speed_min, ambient.speed_max);

    let ax = core.rng.random::<f32>() * core.display_width as f32;
    let ay = core.rng.random::<f32>() * core.display_height as f32;
    let angle = core.rng.random::<f32>() * TAU;
    let speed = speed_min + core.rng.random::<f32>() * (speed_max - speed_min);

    inject_force(core, ax, ay, angle.cos() * speed, angle.sin() * speed);
}

pub(super) fn seed_impulse(core: &mut FluidCore) {
    let ambient = &core.config.ambient;
    let (margin, speed) = (ambient.seed_margin, ambient.seed_speed);
    let band = 1.0 - 2.0 * margin;

    let ax = core.display_width as f32 * (margin + core.rng.random::<f32>() * band);
    let ay = core.display_height as f32 * (margin + core.rng.random::<f32>() * band);
    let angle = core.rng.random::<f32>() * TAU;

    inject_force(core, ax, ay, angle.cos() * speed, angle.sin() * speed);
}

pub(super) fn clear(core: &mut FluidCore) {
    core.fields.clear();
    core.render.pixels.fill(0);
    core.render.display.fill(0);
    core.frame = 0;
    core.injections = 0;
}
