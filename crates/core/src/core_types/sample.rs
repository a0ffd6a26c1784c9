//! Airflow telemetry sample.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::units::Radians;

/// Direction the air is moving through the duct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AirflowDirection {
    Left,
    Right,
}

impl AirflowDirection {
    /// Indicator tilt around the z axis: +π/4 for left, −π/4 for right.
    #[must_use]
    pub fn tilt(self) -> Radians {
        match self {
            Self::Left => Radians::FRAC_PI_4,
            Self::Right => -Radians::FRAC_PI_4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for AirflowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One airflow reading.
///
/// Samples are replaced wholesale on every telemetry tick and are never
/// mutated field by field, so a reader always sees a matching pair.
/// `speed` is a normalized value in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirflowSample {
    pub speed: f32,
    pub direction: AirflowDirection,
}

impl AirflowSample {
    pub const fn new(speed: f32, direction: AirflowDirection) -> Self {
        Self { speed, direction }
    }
}

impl Default for AirflowSample {
    /// Reading shown before the first telemetry tick arrives.
    fn default() -> Self {
        Self {
            speed: 0.5,
            direction: AirflowDirection::Right,
        }
    }
}

impl fmt::Display for AirflowSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "speed={:.3} direction={}", self.speed, self.direction)
    }
}
