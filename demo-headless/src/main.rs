use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use hvac_viz_core::{
    HeadlessSurface, ScenePage, Viewport, Visualization, VisualizationHandle, VizConfig,
};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{info, warn};

/// Headless duct airflow visualization with mock telemetry
#[derive(Parser, Debug)]
#[command(name = "hvac-viz")]
#[command(about = "Animates an air duct from mock airflow telemetry", long_about = None)]
struct Args {
    /// Run duration in seconds
    #[arg(short, long, default_value_t = 10.0)]
    duration: f32,

    /// JSON configuration file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target frame rate
    #[arg(long)]
    fps: Option<f32>,

    /// Milliseconds between telemetry samples
    #[arg(short, long)]
    telemetry_interval_ms: Option<u64>,

    /// Initial viewport width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Initial viewport height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Seed for the mock telemetry generator
    #[arg(short, long)]
    seed: Option<u64>,

    /// Resize the viewport half-way through the run (e.g. 1920x1080)
    #[arg(long)]
    resize: Option<Viewport>,

    /// Write a standalone Three.js page of the scene to this path
    #[arg(long)]
    export_html: Option<PathBuf>,

    /// Report interval in seconds
    #[arg(short, long, default_value_t = 1.0)]
    report_interval: f32,
}

impl Args {
    fn build_config(&self) -> Result<VizConfig> {
        let mut config = match &self.config {
            Some(path) => VizConfig::load(path)?,
            None => VizConfig::default(),
        };

        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(ms) = self.telemetry_interval_ms {
            config.telemetry_interval_ms = ms;
        }
        if let Some(width) = self.width {
            config.viewport.width = width;
        }
        if let Some(height) = self.height {
            config.viewport.height = height;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }

    /// Convert the run duration and report interval to timer periods.
    fn timing(&self) -> Result<RunTiming> {
        let duration = seconds_arg("duration", self.duration)?;
        let report_interval = seconds_arg("report interval", self.report_interval)?;
        anyhow::ensure!(
            !report_interval.is_zero(),
            "report interval must be at least 1 ns, got {}",
            self.report_interval
        );
        Ok(RunTiming {
            duration,
            report_interval,
        })
    }
}

/// Longest run or report period the CLI accepts (one year)
const MAX_RUN_PERIOD: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Debug, Clone, Copy)]
struct RunTiming {
    duration: Duration,
    report_interval: Duration,
}

fn seconds_arg(name: &str, value: f32) -> Result<Duration> {
    let period = Duration::try_from_secs_f32(value)
        .with_context(|| format!("{name} must be a non-negative number of seconds, got {value}"))?;
    anyhow::ensure!(
        period <= MAX_RUN_PERIOD,
        "{name} must be at most {} s, got {value}",
        MAX_RUN_PERIOD.as_secs()
    );
    Ok(period)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let timing = args.timing()?;

    let config = args.build_config()?;
    info!(
        "Viewport {}, {} fps, telemetry every {} ms",
        config.viewport, config.fps, config.telemetry_interval_ms
    );

    let viz = Visualization::new(config, HeadlessSurface::new())?;

    if let Some(path) = &args.export_html {
        ScenePage::new(viz.scene(), viz.config())
            .write_to(path)
            .with_context(|| format!("exporting scene page to {}", path.display()))?;
    }

    let speed_scale = viz.config().speed_scale;
    let source = viz.mock_source();
    let handle = viz.spawn(source);

    println!("Time(s) | Speed | Direction | Indicator x");
    println!("--------|-------|-----------|------------");

    tokio::select! {
        result = drive(&handle, &timing, args.resize, speed_scale) => result?,
        result = tokio::signal::ctrl_c() => {
            result.context("listening for ctrl-c")?;
            warn!("Interrupted, stopping early");
        }
    }

    let report = handle.shutdown().await?;

    println!("\n=== Run Complete ===");
    println!("{}", serde_json::to_string_pretty(&report.summary())?);

    Ok(())
}

/// Print the latest sample every report interval and apply the optional
/// resize half-way through.
async fn drive(
    handle: &VisualizationHandle<HeadlessSurface>,
    timing: &RunTiming,
    resize: Option<Viewport>,
    speed_scale: f32,
) -> Result<()> {
    let start = Instant::now();
    let halfway = start + timing.duration / 2;
    let deadline = start + timing.duration;
    let mut pending_resize = resize;

    let mut ticker = time::interval(timing.report_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            () = time::sleep_until(halfway), if pending_resize.is_some() => {
                if let Some(viewport) = pending_resize.take() {
                    info!("Resizing viewport to {}", viewport);
                    handle.resize(viewport)?;
                }
            }
            () = time::sleep_until(deadline) => break,
            _ = ticker.tick() => {
                let sample = handle.latest_sample();
                println!(
                    "{:7.1} | {:5.3} | {:>9} | {:11.3}",
                    start.elapsed().as_secs_f32(),
                    sample.speed,
                    sample.direction,
                    sample.speed * speed_scale,
                );
            }
        }
    }

    Ok(())
}
