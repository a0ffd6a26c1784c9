//! Scene graph for the duct visualization
//!
//! The scene is deliberately flat: one camera, one light and two meshes that
//! live for the whole run. Only the two mesh transforms and the camera aspect
//! change after bootstrap.

mod bootstrap;
pub mod camera;
pub mod light;
pub mod mesh;

pub use bootstrap::SceneBootstrapper;
pub use camera::PerspectiveCamera;
pub use light::PointLight;
pub use mesh::{Color, Geometry, Material, Mesh, Transform};

/// Everything drawn each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HvacScene {
    pub camera: PerspectiveCamera,
    /// Box representing the conduit
    pub duct: Mesh,
    /// Cylinder whose transform encodes the current airflow sample
    pub indicator: Mesh,
    pub light: PointLight,
}

impl HvacScene {
    /// Meshes in draw order.
    pub fn meshes(&self) -> [&Mesh; 2] {
        [&self.duct, &self.indicator]
    }
}
