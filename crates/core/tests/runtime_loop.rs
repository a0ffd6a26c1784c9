//! End-to-end runs of the telemetry and render tasks on a paused clock.

mod common;

use std::time::Duration;

use approx::assert_relative_eq;
use hvac_viz_core::{
    AirflowSample, HeadlessSurface, MockTelemetry, RenderSurface, TelemetrySource, Viewport,
    Visualization, VizConfig, VizError,
};
use tokio::time;

#[tokio::test(start_paused = true)]
async fn test_two_telemetry_periods() {
    let viz = common::headless(common::seeded_config(7));
    let handle = viz.spawn(MockTelemetry::seeded(7));

    time::sleep(Duration::from_millis(4100)).await;

    let mut expected = MockTelemetry::seeded(7);
    let _first = expected.next_sample();
    let second = expected.next_sample();
    assert_eq!(handle.latest_sample(), second);

    let report = handle.shutdown().await.unwrap();
    assert_eq!(report.telemetry_ticks, 2);
    assert_eq!(report.stats.fresh_samples, 2);
    // ~246 frames at 60 fps
    assert!(report.stats.frames > 200, "frames = {}", report.stats.frames);
    assert_eq!(report.surface.frames_rendered(), report.stats.frames);

    let elapsed = *report.stats.elapsed;
    assert!(elapsed > 4.0 && elapsed < 4.2, "elapsed = {elapsed}");
    assert_relative_eq!(
        report.scene.duct.transform.rotation.y,
        0.2 * elapsed,
        epsilon = 1e-4
    );

    assert_relative_eq!(
        report.scene.indicator.transform.position.x,
        second.speed * 5.0
    );
    assert_relative_eq!(
        report.scene.indicator.transform.rotation.z,
        *second.direction.tilt()
    );
}

#[tokio::test(start_paused = true)]
async fn test_initial_sample_before_first_tick() {
    let viz = common::headless(common::seeded_config(1));
    let handle = viz.spawn(MockTelemetry::seeded(1));

    time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(handle.latest_sample(), AirflowSample::default());

    let report = handle.shutdown().await.unwrap();
    assert_eq!(report.telemetry_ticks, 0);
    assert_eq!(report.stats.fresh_samples, 0);
    assert_relative_eq!(report.scene.indicator.transform.position.x, 2.5);
    assert_relative_eq!(
        report.scene.indicator.transform.rotation.z,
        -std::f32::consts::FRAC_PI_4
    );
}

#[tokio::test(start_paused = true)]
async fn test_resize_mid_run() {
    let viz = common::headless(common::seeded_config(3));
    assert_eq!(viz.surface().size(), Viewport::new(1024, 768));
    let handle = viz.spawn(MockTelemetry::seeded(3));

    time::sleep(Duration::from_millis(100)).await;
    handle.resize(Viewport::new(1920, 1080)).unwrap();
    time::sleep(Duration::from_millis(100)).await;

    let report = handle.shutdown().await.unwrap();
    assert_eq!(report.stats.resizes, 1);
    assert_eq!(report.surface.size(), Viewport::new(1920, 1080));
    assert_relative_eq!(report.scene.camera.aspect(), 1920.0 / 1080.0);
    assert_relative_eq!(report.last_frame.camera_aspect, 1920.0 / 1080.0);
    assert_eq!(report.last_frame.surface, Viewport::new(1920, 1080));
}

#[tokio::test(start_paused = true)]
async fn test_zero_resize_is_rejected() {
    let viz = common::headless(common::seeded_config(3));
    let handle = viz.spawn(MockTelemetry::seeded(3));

    let err = handle.resize(Viewport::new(0, 600)).unwrap_err();
    assert!(matches!(
        err,
        VizError::InvalidViewport {
            width: 0,
            height: 600
        }
    ));

    time::sleep(Duration::from_millis(50)).await;
    let report = handle.shutdown().await.unwrap();
    assert_eq!(report.stats.resizes, 0);
    assert_eq!(report.surface.size(), Viewport::new(1024, 768));
    assert_relative_eq!(report.scene.camera.aspect(), 1024.0 / 768.0);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_every_publish() {
    let viz = common::headless(common::seeded_config(11));
    let handle = viz.spawn(MockTelemetry::seeded(11));
    let mut rx = handle.subscribe();

    let mut expected = MockTelemetry::seeded(11);
    for _ in 0..3 {
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), expected.next_sample());
    }

    let report = handle.shutdown().await.unwrap();
    assert_eq!(report.telemetry_ticks, 3);
}

#[tokio::test(start_paused = true)]
async fn test_every_accepted_timer_config_runs() {
    let mut configs = Vec::new();
    for fps in [1.0e-4, 1.0, 60.0, 1.0e6, 1.0e8, 1.0e9, 1.0e10, f32::MAX] {
        configs.push(VizConfig {
            fps,
            ..VizConfig::default()
        });
    }
    for telemetry_interval_ms in [1, 86_400_000, 86_400_001, u64::MAX] {
        configs.push(VizConfig {
            telemetry_interval_ms,
            ..VizConfig::default()
        });
    }
    for (width, height) in [(1, 10_000_000), (1, u32::MAX), (u32::MAX, 1)] {
        configs.push(VizConfig {
            viewport: Viewport::new(width, height),
            ..VizConfig::default()
        });
    }

    let mut accepted = 0;
    for config in configs {
        if config.validate().is_err() {
            continue;
        }
        accepted += 1;

        let viewport = config.viewport;
        let viz = Visualization::new(config, HeadlessSurface::new()).unwrap();
        let handle = viz.spawn(MockTelemetry::seeded(0));
        tokio::task::yield_now().await;

        let report = handle.shutdown().await.unwrap();
        assert_eq!(report.surface.size(), viewport);
    }
    assert!(accepted >= 10, "only {accepted} configs accepted");
}

#[tokio::test]
async fn test_viewport_tall_enough_to_vanish_aspect() {
    let config = VizConfig {
        viewport: Viewport::new(1, 10_000_000),
        ..VizConfig::default()
    };
    let viz = Visualization::new(config, HeadlessSurface::new()).unwrap();
    assert_relative_eq!(viz.scene().camera.aspect(), 1.0e-7);

    let handle = viz.spawn(MockTelemetry::seeded(0));
    handle.resize(Viewport::new(1, u32::MAX)).unwrap();
    time::sleep(Duration::from_millis(50)).await;

    let report = handle.shutdown().await.unwrap();
    assert_eq!(report.stats.resizes, 1);
    assert_eq!(report.surface.size(), Viewport::new(1, u32::MAX));
}
