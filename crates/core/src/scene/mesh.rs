//! Mesh primitives: geometry, material and transform.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core_types::Vec3;

/// 24-bit RGB colour, written `0xRRGGBB` like the graphics library expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(u32);

impl Color {
    pub const WHITE: Color = Color(0xffffff);

    pub const fn from_hex(hex: u32) -> Self {
        Color(hex & 0x00ff_ffff)
    }

    pub fn hex(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:06x}", self.0)
    }
}

/// Object placement in world space.
///
/// `rotation` holds Euler angles in radians applied in XYZ order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Primitive shape of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Axis-aligned box centred on the origin
    Box { width: f32, height: f32, depth: f32 },
    /// Cylinder along the local y axis
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
}

/// Surface shading model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Material {
    /// Diffuse, responds to lights
    Lambert { color: Color },
    /// Unlit, optionally see-through
    Basic {
        color: Color,
        opacity: f32,
        transparent: bool,
    },
}

impl Material {
    pub fn color(&self) -> Color {
        match *self {
            Self::Lambert { color } | Self::Basic { color, .. } => color,
        }
    }
}

/// A named drawable object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub name: String,
    pub geometry: Geometry,
    pub material: Material,
    pub transform: Transform,
}

impl Mesh {
    pub fn new(name: &str, geometry: Geometry, material: Material) -> Self {
        Self {
            name: name.to_string(),
            geometry,
            material,
            transform: Transform::default(),
        }
    }
}
