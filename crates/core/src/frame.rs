//! Per-frame scene update and the render loop.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::VizConfig;
use crate::core_types::{AirflowSample, RadiansPerSecond, Seconds};
use crate::error::VizResult;
use crate::render::RenderSurface;
use crate::runtime::Shutdown;
use crate::scene::HvacScene;
use crate::viewport::{Viewport, ViewportAdapter};

/// Measures time between successive frames.
///
/// The first reading is zero; every later reading is the time since the
/// previous one.
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call.
    pub fn delta(&mut self) -> Seconds {
        self.delta_at(Instant::now())
    }

    /// Seconds between the previous reading and `now`. Never negative.
    pub fn delta_at(&mut self, now: Instant) -> Seconds {
        let dt = self
            .last
            .replace(now)
            .map_or(Duration::ZERO, |prev| now.saturating_duration_since(prev));
        Seconds::from(dt)
    }
}

/// Maps the current airflow sample onto the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUpdater {
    angular_rate: RadiansPerSecond,
    speed_scale: f32,
}

impl FrameUpdater {
    pub fn new(angular_rate: RadiansPerSecond, speed_scale: f32) -> Self {
        Self {
            angular_rate,
            speed_scale,
        }
    }

    pub fn from_config(config: &VizConfig) -> Self {
        Self::new(config.duct_angular_rate, config.speed_scale)
    }

    /// Advance the scene by `dt`.
    ///
    /// - duct spins about y by `angular_rate * dt`
    /// - indicator sits at `x = speed * speed_scale`
    /// - indicator tilts about z by the direction's fixed angle
    ///
    /// No smoothing: a new sample shows up in full on the next frame.
    pub fn apply(&self, scene: &mut HvacScene, dt: Seconds, sample: &AirflowSample) {
        scene.duct.transform.rotation.y += *(self.angular_rate * dt);

        let indicator = &mut scene.indicator.transform;
        indicator.position.x = sample.speed * self.speed_scale;
        indicator.rotation.z = *sample.direction.tilt();
    }
}

/// Counters collected by the render loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FrameStats {
    /// Frames submitted to the surface
    pub frames: u64,
    /// Frames that picked up a sample not seen before
    pub fresh_samples: u64,
    /// Resize events applied
    pub resizes: u64,
    /// Sum of all frame deltas
    pub elapsed: Seconds,
}

/// What the render loop hands back when it stops.
#[derive(Debug)]
pub struct FrameLoopOutput<S> {
    pub scene: HvacScene,
    pub surface: S,
    pub stats: FrameStats,
}

/// Channels and timing the render loop runs against.
pub struct FrameLoop {
    pub updater: FrameUpdater,
    pub period: Duration,
    pub samples: watch::Receiver<AirflowSample>,
    pub resizes: mpsc::UnboundedReceiver<Viewport>,
    pub shutdown: Shutdown,
}

impl FrameLoop {
    /// Update and draw once per `period` until shutdown.
    ///
    /// Resize events are applied as they arrive, between frames. Frames that
    /// fall behind are skipped rather than replayed.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by the surface.
    pub async fn run<S: RenderSurface>(
        self,
        mut scene: HvacScene,
        mut surface: S,
    ) -> VizResult<FrameLoopOutput<S>> {
        let Self {
            updater,
            period,
            mut samples,
            mut resizes,
            mut shutdown,
        } = self;

        info!(
            "Render loop started, frame period {:?}, duct spin {}",
            period, updater.angular_rate
        );

        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut clock = FrameClock::new();
        let mut stats = FrameStats::default();

        loop {
            tokio::select! {
                biased;
                () = shutdown.recv() => break,
                Some(viewport) = resizes.recv() => {
                    match ViewportAdapter::apply(&mut scene.camera, &mut surface, viewport) {
                        Ok(()) => stats.resizes += 1,
                        Err(e) => warn!("Ignoring resize: {}", e),
                    }
                }
                _ = ticker.tick() => {
                    let dt = clock.delta();
                    // A closed sender still leaves the last sample readable
                    if samples.has_changed().unwrap_or(false) {
                        stats.fresh_samples += 1;
                    }
                    let sample = *samples.borrow_and_update();

                    updater.apply(&mut scene, dt, &sample);
                    surface.render(&scene)?;

                    stats.frames += 1;
                    stats.elapsed = stats.elapsed + dt;
                }
            }
        }

        info!(
            "Render loop stopped: {} frames over {}, {} fresh samples, {} resizes",
            stats.frames, stats.elapsed, stats.fresh_samples, stats.resizes
        );
        debug!(
            "Final duct rotation {:.4} rad, indicator x {:.3}",
            scene.duct.transform.rotation.y, scene.indicator.transform.position.x
        );

        Ok(FrameLoopOutput {
            scene,
            surface,
            stats,
        })
    }
}
