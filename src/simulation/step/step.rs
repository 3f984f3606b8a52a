use crate::systems::fluid;

use super::{FluidCore, PerfTimer};

#[inline]
fn timed<R>(enabled: bool, slot: &mut f64, f: impl FnOnce() -> R) -> R {
    if enabled {
        let t0 = PerfTimer::start();
        let out = f();
        *slot += t0.elapsed_ms();
        out
    } else {
        f()
    }
}

/// One simulation frame.
///
/// Velocity: diffuse -> project -> advect -> project.
/// Dye: diffuse -> advect (by the new velocity) -> cap to the pre-pass
/// total -> fade.
/// Finally the velocity is damped so injected energy bleeds away.
pub(super) fn step(core: &mut FluidCore, dt: f32) {
    let perf_on = core.perf_enabled;
    let FluidCore {
        config,
        fields,
        perf_stats: stats,
        injections,
        frame,
        ..
    } = core;

    if perf_on {
        stats.reset();
        stats.grid_cells = fields.dims().cells() as u32;
        stats.memory_bytes = fields.memory_bytes() as u32;
        stats.injections = *injections;
    }
    *injections = 0;
    let step_start = perf_on.then(PerfTimer::start);

    let w = fields.dims().width();
    let h = fields.dims().height();

    // === VELOCITY ===
    timed(perf_on, &mut stats.diffuse_ms, || {
        fields.snapshot_velocity();
        fluid::diffuse(&mut fields.vx, &fields.vx0, config.viscosity, dt, config.diffuse_iterations, w, h);
        fluid::diffuse(&mut fields.vy, &fields.vy0, config.viscosity, dt, config.diffuse_iterations, w, h);
    });

    timed(perf_on, &mut stats.project_ms, || {
        fluid::project(
            &mut fields.vx,
            &mut fields.vy,
            &mut fields.pressure,
            &mut fields.divergence,
            config.pressure_iterations,
            w,
            h,
        );
    });

    // Both components sample the same pre-advection snapshot.
    timed(perf_on, &mut stats.advect_ms, || {
        fields.snapshot_velocity();
        fluid::advect(&mut fields.vx, &fields.vx0, &fields.vx0, &fields.vy0, dt, w, h);
        fluid::advect(&mut fields.vy, &fields.vy0, &fields.vx0, &fields.vy0, dt, w, h);
    });

    timed(perf_on, &mut stats.project_ms, || {
        fluid::project(
            &mut fields.vx,
            &mut fields.vy,
            &mut fields.pressure,
            &mut fields.divergence,
            config.pressure_iterations,
            w,
            h,
        );
    });

    // === DYE ===
    // The dye passes may redistribute dye but never create it.
    timed(perf_on, &mut stats.dye_ms, || {
        let budget = fluid::dye_totals(&fields.dye);
        for _ in 0..config.dye_diffuse_passes {
            fields.snapshot_dye();
            fluid::diffuse_dye(&mut fields.dye, &fields.dye0, config.dye_diffusion, dt, w, h);
        }
        fields.snapshot_dye();
        fluid::advect_dye(&mut fields.dye, &fields.dye0, &fields.vx, &fields.vy, dt, w, h);
        fluid::cap_dye_totals(&mut fields.dye, &budget);
    });

    timed(perf_on, &mut stats.decay_ms, || {
        fluid::fade_dye(&mut fields.dye, config.dye_fade);
        fluid::damp_velocity(&mut fields.vx, &mut fields.vy, config.velocity_damping);
    });

    *frame += 1;

    if let Some(start) = step_start {
        stats.step_ms = start.elapsed_ms();
    }
}
