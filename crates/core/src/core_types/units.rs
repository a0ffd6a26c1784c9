//! Semantic unit types for frame timing and object orientation
//!
//! Newtype wrappers keep elapsed time, angles and angular rates from being
//! mixed up in the frame update. All types are `f32`, matching the precision
//! of the transform vectors they feed.
//!
//! # Usage
//! ```
//! use hvac_viz_core::core_types::units::{RadiansPerSecond, Seconds};
//!
//! let rate = RadiansPerSecond::new(0.2);
//! let turned = rate * Seconds::new(0.5);
//! assert!((*turned - 0.1).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Deref, Mul, Neg};

// ============================================================================
// TIME
// ============================================================================

/// Duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Seconds(f32);

impl Deref for Seconds {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl Seconds {
    /// No elapsed time
    pub const ZERO: Seconds = Seconds(0.0);

    /// Create a new duration in seconds. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f32) -> Self {
        assert!(value >= 0.0, "Seconds::new: negative duration is invalid");
        Seconds(value)
    }
}

impl From<std::time::Duration> for Seconds {
    fn from(d: std::time::Duration) -> Self {
        Seconds(d.as_secs_f32())
    }
}

impl Add for Seconds {
    type Output = Seconds;
    fn add(self, rhs: Seconds) -> Seconds {
        Seconds(self.0 + rhs.0)
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} s", self.0)
    }
}

// ============================================================================
// ANGLE TYPES
// ============================================================================

/// Angle in degrees (camera field of view is expressed in degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Degrees(f32);

impl Deref for Degrees {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl Degrees {
    /// Create a new angle in degrees
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Degrees(value)
    }

    /// Convert to radians
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> Radians {
        Radians(self.0.to_radians())
    }
}

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Radians(f32);

impl Deref for Radians {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl Radians {
    /// Indicator tilt magnitude
    pub const FRAC_PI_4: Radians = Radians(std::f32::consts::FRAC_PI_4);

    /// Lays the indicator cylinder along the duct axis
    pub const FRAC_PI_2: Radians = Radians(std::f32::consts::FRAC_PI_2);
}

impl Neg for Radians {
    type Output = Radians;
    fn neg(self) -> Radians {
        Radians(-self.0)
    }
}

// ============================================================================
// ANGULAR RATE
// ============================================================================

/// Angular velocity in radians per second
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct RadiansPerSecond(f32);

impl Deref for RadiansPerSecond {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl RadiansPerSecond {
    /// Create a new angular rate
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        RadiansPerSecond(value)
    }
}

/// Rate × time = angle swept
impl Mul<Seconds> for RadiansPerSecond {
    type Output = Radians;
    fn mul(self, rhs: Seconds) -> Radians {
        Radians(self.0 * rhs.0)
    }
}

impl fmt::Display for RadiansPerSecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} rad/s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rate_times_duration() {
        let swept = RadiansPerSecond::new(0.2) * Seconds::new(3.0);
        assert_relative_eq!(*swept, 0.6, epsilon = 1e-6);
    }

    #[test]
    fn test_degrees_to_radians() {
        let fov = Degrees::new(180.0);
        assert_relative_eq!(*fov.to_radians(), std::f32::consts::PI, epsilon = 1e-6);
        assert_relative_eq!(*Degrees::new(90.0).to_radians(), *Radians::FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn test_negated_tilt() {
        assert_eq!(*(-Radians::FRAC_PI_4), -std::f32::consts::FRAC_PI_4);
    }

    #[test]
    fn test_seconds_from_duration() {
        let s: Seconds = std::time::Duration::from_millis(250).into();
        assert_eq!(*s, 0.25);
        assert_eq!(s + Seconds::new(0.75), Seconds::new(1.0));
    }

    #[test]
    #[should_panic(expected = "negative duration")]
    fn test_negative_seconds_rejected() {
        let _ = Seconds::new(-1.0);
    }
}
