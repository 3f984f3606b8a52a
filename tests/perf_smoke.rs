use fluidfield_engine::FluidField;

#[test]
fn perf_smoke_step() {
    let mut field = FluidField::new(640, 360);
    field.enable_perf_metrics(true);
    for i in 0..20 {
        field.inject_force(32.0 * i as f32, 180.0, 40.0, -25.0);
    }
    field.step();
    field.render();
    let stats = field.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert!(stats.render_ms() >= 0.0 && stats.upscale_ms() >= 0.0);
    assert_eq!(stats.grid_cells(), 160 * 90);
    assert_eq!(stats.display_pixels(), 640 * 360);
    assert_eq!(stats.injections(), 20);
}

#[test]
fn perf_smoke_many_frames() {
    let mut field = FluidField::new(1280, 720);
    field.enable_perf_metrics(true);
    for frame in 0..30 {
        if frame % 10 == 0 {
            field.ambient_impulse();
        }
        field.step();
        field.render();
    }
    assert_eq!(field.frame(), 30);
    assert!(field.get_perf_stats().step_ms().is_finite());
}
