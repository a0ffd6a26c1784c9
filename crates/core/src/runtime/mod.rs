//! Task runtime for a live visualization
//!
//! A running visualization is two tokio tasks:
//! - the telemetry task publishes samples into a single-slot `watch` channel
//! - the render task reads the latest sample every frame and draws
//!
//! They share nothing else. Both listen to one [`Shutdown`] signal and are
//! joined by [`VisualizationHandle::shutdown`].

mod shutdown;

pub use shutdown::{shutdown_channel, Shutdown, ShutdownTrigger};

use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::VizConfig;
use crate::core_types::AirflowSample;
use crate::error::{VizError, VizResult};
use crate::frame::{FrameLoop, FrameLoopOutput, FrameStats, FrameUpdater};
use crate::render::{FrameSnapshot, RenderSurface};
use crate::scene::{HvacScene, SceneBootstrapper};
use crate::telemetry::{run_telemetry, MockTelemetry, TelemetrySource};
use crate::viewport::Viewport;

/// A bootstrapped scene and surface, ready to be animated.
pub struct Visualization<S> {
    config: VizConfig,
    frame_period: Duration,
    scene: HvacScene,
    surface: S,
}

impl<S: RenderSurface + 'static> Visualization<S> {
    /// Validate `config`, build the scene and size `surface` to the configured viewport.
    pub fn new(config: VizConfig, mut surface: S) -> VizResult<Self> {
        config.validate()?;
        let frame_period = config.frame_interval()?;
        let scene = SceneBootstrapper::new(&config).bootstrap(&mut surface, config.viewport)?;
        Ok(Self {
            config,
            frame_period,
            scene,
            surface,
        })
    }

    pub fn config(&self) -> &VizConfig {
        &self.config
    }

    pub fn scene(&self) -> &HvacScene {
        &self.scene
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mock telemetry seeded from the configuration.
    pub fn mock_source(&self) -> MockTelemetry {
        MockTelemetry::from_seed_option(self.config.seed)
    }

    /// Start the telemetry and render tasks on the current tokio runtime.
    pub fn spawn<T>(self, source: T) -> VisualizationHandle<S>
    where
        T: TelemetrySource + 'static,
    {
        let (trigger, shutdown) = shutdown_channel();
        let (sample_tx, sample_rx) = watch::channel(AirflowSample::default());
        let (resize_tx, resize_rx) = mpsc::unbounded_channel();

        let telemetry = tokio::spawn(run_telemetry(
            source,
            self.config.telemetry_interval(),
            sample_tx,
            shutdown.clone(),
        ));

        let frame_loop = FrameLoop {
            updater: FrameUpdater::from_config(&self.config),
            period: self.frame_period,
            samples: sample_rx.clone(),
            resizes: resize_rx,
            shutdown,
        };
        let frames = tokio::spawn(frame_loop.run(self.scene, self.surface));

        info!("Visualization running");

        VisualizationHandle {
            trigger,
            resize_tx,
            samples: sample_rx,
            telemetry,
            frames,
        }
    }
}

/// Control handle for a running visualization.
pub struct VisualizationHandle<S> {
    trigger: ShutdownTrigger,
    resize_tx: mpsc::UnboundedSender<Viewport>,
    samples: watch::Receiver<AirflowSample>,
    telemetry: JoinHandle<u64>,
    frames: JoinHandle<VizResult<FrameLoopOutput<S>>>,
}

impl<S: RenderSurface> VisualizationHandle<S> {
    /// Queue a window resize for the render task.
    ///
    /// # Errors
    ///
    /// `InvalidViewport` for a zero dimension, `TaskFailed` if the render
    /// task has already stopped.
    pub fn resize(&self, viewport: Viewport) -> VizResult<()> {
        viewport.validate()?;
        self.resize_tx
            .send(viewport)
            .map_err(|_| VizError::TaskFailed("render loop has stopped".to_string()))
    }

    /// Most recently published sample.
    pub fn latest_sample(&self) -> AirflowSample {
        *self.samples.borrow()
    }

    /// Independent receiver for the sample channel.
    pub fn subscribe(&self) -> watch::Receiver<AirflowSample> {
        self.samples.clone()
    }

    /// Stop both tasks and collect what they produced.
    ///
    /// # Errors
    ///
    /// `TaskFailed` if a task panicked, or the render error that stopped the loop.
    pub async fn shutdown(self) -> VizResult<RunReport<S>> {
        info!("Shutting down visualization");
        self.trigger.fire();

        let telemetry_ticks = self.telemetry.await?;
        let output = self.frames.await??;

        Ok(RunReport {
            telemetry_ticks,
            stats: output.stats,
            last_frame: FrameSnapshot::capture(&output.scene, output.surface.size()),
            scene: output.scene,
            surface: output.surface,
        })
    }
}

/// Outcome of a finished run.
#[derive(Debug)]
pub struct RunReport<S> {
    pub telemetry_ticks: u64,
    pub stats: FrameStats,
    pub last_frame: FrameSnapshot,
    pub scene: HvacScene,
    pub surface: S,
}

/// Serializable part of a [`RunReport`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunSummary {
    pub telemetry_ticks: u64,
    pub stats: FrameStats,
    pub last_frame: FrameSnapshot,
}

impl<S> RunReport<S> {
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            telemetry_ticks: self.telemetry_ticks,
            stats: self.stats,
            last_frame: self.last_frame,
        }
    }
}
