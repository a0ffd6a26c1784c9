//! Runtime configuration.
//!
//! All tunables of the visualization live in [`VizConfig`]. The defaults are a
//! 2 s telemetry period, 60 fps, a duct turning at 0.2 rad/s and an indicator
//! offset of `speed * 5`. Configuration files are
//! JSON; any field left out takes its default.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core_types::{Degrees, RadiansPerSecond, Vec3};
use crate::error::{VizError, VizResult};
use crate::viewport::Viewport;

/// Three.js build referenced by exported pages
pub const DEFAULT_THREE_JS_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/three.js/r128/three.min.js";

/// Longest period accepted for the telemetry and frame timers
pub const MAX_TIMER_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// Perspective camera parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view
    pub fov: Degrees,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
    /// Camera position in world space
    pub position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: Degrees::new(75.0),
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 0.0, 10.0),
        }
    }
}

/// Top-level configuration for a visualization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    /// Period between mock telemetry samples, in milliseconds
    pub telemetry_interval_ms: u64,
    /// Target frame rate of the render loop
    pub fps: f32,
    /// Constant spin rate of the duct around its y axis
    pub duct_angular_rate: RadiansPerSecond,
    /// Indicator x offset per unit of normalized airflow speed
    pub speed_scale: f32,
    /// Camera parameters
    pub camera: CameraConfig,
    /// Initial viewport
    pub viewport: Viewport,
    /// Seed for the mock telemetry generator; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Script URL for the Three.js library in exported pages
    pub three_js_url: String,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            telemetry_interval_ms: 2000,
            fps: 60.0,
            duct_angular_rate: RadiansPerSecond::new(0.2),
            speed_scale: 5.0,
            camera: CameraConfig::default(),
            viewport: Viewport::new(1024, 768),
            seed: None,
            three_js_url: DEFAULT_THREE_JS_URL.to_string(),
        }
    }
}

impl VizConfig {
    /// Parse a JSON document. Missing fields fall back to defaults.
    pub fn from_json_str(json: &str) -> VizResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> VizResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| VizError::io(path, e))?;
        let config = Self::from_json_str(&text)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check every field for values the runtime cannot work with.
    pub fn validate(&self) -> VizResult<()> {
        let telemetry = self.telemetry_interval();
        if telemetry.is_zero() || telemetry > MAX_TIMER_PERIOD {
            return Err(VizError::invalid_config(
                "telemetry_interval_ms",
                &format!(
                    "must be between 1 and {} ms, got {}",
                    MAX_TIMER_PERIOD.as_millis(),
                    self.telemetry_interval_ms
                ),
            ));
        }
        self.frame_interval()?;
        if !self.duct_angular_rate.is_finite() {
            return Err(VizError::invalid_config(
                "duct_angular_rate",
                "must be finite",
            ));
        }
        if !self.speed_scale.is_finite() {
            return Err(VizError::invalid_config("speed_scale", "must be finite"));
        }

        let camera = &self.camera;
        let tan_half_fov = (*camera.fov.to_radians() * 0.5).tan();
        if !(*camera.fov > 0.0 && *camera.fov < 180.0 && tan_half_fov.is_normal()) {
            return Err(VizError::invalid_config(
                "camera.fov",
                &format!("must be in (0, 180) degrees, got {}", *camera.fov),
            ));
        }
        if !(camera.near.is_finite() && camera.near > 0.0) {
            return Err(VizError::invalid_config(
                "camera.near",
                &format!("must be finite and positive, got {}", camera.near),
            ));
        }
        // The depth range must survive f32 rounding
        if !(camera.far.is_finite() && camera.far - camera.near > f32::EPSILON * camera.far) {
            return Err(VizError::invalid_config(
                "camera.far",
                &format!("must be greater than near ({}), got {}", camera.near, camera.far),
            ));
        }

        self.viewport.validate()
    }

    /// Telemetry period as a `Duration`.
    pub fn telemetry_interval(&self) -> Duration {
        Duration::from_millis(self.telemetry_interval_ms)
    }

    /// Frame period derived from `fps`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` unless the period is non-zero and at most [`MAX_TIMER_PERIOD`].
    pub fn frame_interval(&self) -> VizResult<Duration> {
        Duration::try_from_secs_f32(1.0 / self.fps)
            .ok()
            .filter(|period| !period.is_zero() && *period <= MAX_TIMER_PERIOD)
            .ok_or_else(|| {
                VizError::invalid_config(
                    "fps",
                    &format!("must give a frame period between 1 ns and 24 h, got {}", self.fps),
                )
            })
    }
}
