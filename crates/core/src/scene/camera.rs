//! Perspective camera.

use nalgebra::Matrix4;

use crate::config::CameraConfig;
use crate::core_types::{Degrees, Vec3};

/// Perspective camera with a cached projection matrix.
///
/// Changing the aspect ratio does not touch the projection until
/// [`update_projection_matrix`](Self::update_projection_matrix) is called,
/// mirroring the graphics library's contract.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    fov: Degrees,
    aspect: f32,
    near: f32,
    far: f32,
    pub position: Vec3,
    projection: Matrix4<f32>,
}

impl PerspectiveCamera {
    pub fn new(fov: Degrees, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            position: Vec3::zeros(),
            projection: Matrix4::identity(),
        };
        camera.update_projection_matrix();
        camera
    }

    /// Build from configuration for the given aspect ratio.
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::new(config.fov, aspect, config.near, config.far);
        camera.position = config.position;
        camera
    }

    pub fn fov(&self) -> Degrees {
        self.fov
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Recompute the projection from fov, aspect and clip planes.
    ///
    /// Same right-handed layout as `nalgebra::Perspective3`, written out
    /// because `Perspective3::new` panics on aspect ratios near zero, which a
    /// very tall viewport produces.
    pub fn update_projection_matrix(&mut self) {
        let tan_half_fov = (*self.fov.to_radians() * 0.5).tan();
        let depth = self.near - self.far;

        let mut m = Matrix4::zeros();
        m[(0, 0)] = 1.0 / (self.aspect * tan_half_fov);
        m[(1, 1)] = 1.0 / tan_half_fov;
        m[(2, 2)] = (self.far + self.near) / depth;
        m[(2, 3)] = 2.0 * self.far * self.near / depth;
        m[(3, 2)] = -1.0;
        self.projection = m;
    }

    pub fn projection_matrix(&self) -> &Matrix4<f32> {
        &self.projection
    }
}
