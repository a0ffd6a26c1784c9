//! Vector type alias for 3D positions and rotations.

use nalgebra::Vector3;

/// 3D vector type for positions, Euler rotations and scales.
///
/// This is a simple alias for `nalgebra::Vector3<f32>`, used throughout
/// the scene for object transforms and the camera position.
pub type Vec3 = Vector3<f32>;
