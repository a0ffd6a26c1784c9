//! Frame update invariants over a long mock telemetry sequence.

mod common;

use std::f32::consts::FRAC_PI_4;

use approx::assert_relative_eq;
use hvac_viz_core::units::Seconds;
use hvac_viz_core::{
    FrameUpdater, HeadlessSurface, MockTelemetry, SceneBootstrapper, TelemetrySource, VizConfig,
};

#[test]
fn test_indicator_stays_within_scaled_range() {
    let config = VizConfig::default();
    let mut scene = SceneBootstrapper::new(&config)
        .bootstrap(&mut HeadlessSurface::new(), config.viewport)
        .unwrap();
    let updater = FrameUpdater::from_config(&config);
    let mut source = MockTelemetry::seeded(2024);

    let mut spin = 0.0_f32;
    for _ in 0..5_000 {
        let sample = source.next_sample();
        updater.apply(&mut scene, Seconds::new(1.0 / 60.0), &sample);
        spin += 0.2 / 60.0;

        let x = scene.indicator.transform.position.x;
        assert!((0.0..5.0).contains(&x), "indicator x out of range: {x}");
        assert_eq!(scene.indicator.transform.rotation.z.abs(), FRAC_PI_4);
    }

    // Spin is monotonic and tracks accumulated time
    assert_relative_eq!(scene.duct.transform.rotation.y, spin, epsilon = 1e-3);
}

#[test]
fn test_updates_leave_static_objects_alone() {
    let config = VizConfig::default();
    let mut scene = SceneBootstrapper::new(&config)
        .bootstrap(&mut HeadlessSurface::new(), config.viewport)
        .unwrap();
    let before = scene.clone();
    let updater = FrameUpdater::from_config(&config);
    let mut source = MockTelemetry::seeded(5);

    for _ in 0..100 {
        updater.apply(&mut scene, Seconds::new(0.1), &source.next_sample());
    }

    assert_eq!(scene.camera, before.camera);
    assert_eq!(scene.light, before.light);
    assert_eq!(scene.duct.transform.position, before.duct.transform.position);
    assert_eq!(scene.duct.geometry, before.duct.geometry);
    assert_eq!(scene.indicator.material, before.indicator.material);
}
