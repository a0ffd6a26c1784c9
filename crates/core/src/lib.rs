//! HVAC Airflow Visualization Core Library
//!
//! Animates a single air duct and an airflow indicator from a stream of
//! telemetry samples.
//!
//! ## Pieces
//!
//! - [`scene`]: bootstraps the camera, duct, indicator and light
//! - [`telemetry`]: mock sensor feed published every couple of seconds
//! - [`frame`]: per-frame update and the render loop
//! - [`viewport`]: keeps camera aspect and surface size in step with resizes
//! - [`runtime`]: runs telemetry and rendering as two cancellable tasks
//! - [`export`]: writes the scene out as a standalone Three.js page

// Core types and utilities
pub mod config;
pub mod core_types;
pub mod error;

// Scene and frame pipeline
pub mod frame;
pub mod render;
pub mod scene;
pub mod viewport;

// Live data and task runtime
pub mod runtime;
pub mod telemetry;

pub mod export;

// Re-export core types
pub use config::{CameraConfig, VizConfig};
pub use core_types::{units, AirflowDirection, AirflowSample, Vec3};
pub use error::{VizError, VizResult};

// Re-export pipeline types
pub use export::ScenePage;
pub use frame::{FrameClock, FrameStats, FrameUpdater};
pub use render::{FrameSnapshot, HeadlessSurface, RenderSurface};
pub use runtime::{RunReport, RunSummary, Visualization, VisualizationHandle};
pub use scene::{HvacScene, SceneBootstrapper};
pub use telemetry::{MockTelemetry, TelemetrySource};
pub use viewport::{Viewport, ViewportAdapter};
