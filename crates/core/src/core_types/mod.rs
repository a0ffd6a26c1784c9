//! Core types and utilities

pub mod sample;
pub mod units;
pub mod vec3;

pub use sample::{AirflowDirection, AirflowSample};
pub use units::*;
pub use vec3::Vec3;
