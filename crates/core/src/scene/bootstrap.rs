//! One-time scene construction.

use tracing::{debug, info};

use super::{Color, Geometry, HvacScene, Material, Mesh, PerspectiveCamera, PointLight};
use crate::config::VizConfig;
use crate::core_types::{Radians, Vec3};
use crate::error::VizResult;
use crate::render::RenderSurface;
use crate::viewport::Viewport;

// Duct: long grey box along x
const DUCT_LENGTH: f32 = 5.0;
const DUCT_SECTION: f32 = 0.5;
const DUCT_COLOR: Color = Color::from_hex(0x8b_8b8b);

// Indicator: translucent green cylinder laid along the duct
const INDICATOR_RADIUS: f32 = 0.2;
const INDICATOR_LENGTH: f32 = 5.0;
const INDICATOR_SEGMENTS: u32 = 32;
const INDICATOR_COLOR: Color = Color::from_hex(0x00_ff00);
const INDICATOR_OPACITY: f32 = 0.5;

const LIGHT_INTENSITY: f32 = 1.0;
const LIGHT_DISTANCE: f32 = 100.0;
const LIGHT_POSITION: [f32; 3] = [10.0, 10.0, 10.0];

/// Builds the scene and sizes the render surface.
pub struct SceneBootstrapper<'a> {
    config: &'a VizConfig,
}

impl<'a> SceneBootstrapper<'a> {
    pub fn new(config: &'a VizConfig) -> Self {
        Self { config }
    }

    /// Create camera, meshes and light for `viewport`, and size `surface` to match.
    ///
    /// # Errors
    ///
    /// `VizError::InvalidViewport` if either dimension is zero.
    pub fn bootstrap<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        viewport: Viewport,
    ) -> VizResult<HvacScene> {
        viewport.validate()?;

        let camera = PerspectiveCamera::from_config(&self.config.camera, viewport.aspect());
        surface.set_size(viewport);

        let scene = HvacScene {
            camera,
            duct: Self::duct(),
            indicator: Self::indicator(),
            light: PointLight::new(Color::WHITE, LIGHT_INTENSITY, LIGHT_DISTANCE)
                .at(Vec3::from(LIGHT_POSITION)),
        };

        info!(
            "Scene ready: {}x{} viewport, aspect {:.3}, camera at ({:.1}, {:.1}, {:.1})",
            viewport.width,
            viewport.height,
            scene.camera.aspect(),
            scene.camera.position.x,
            scene.camera.position.y,
            scene.camera.position.z
        );
        debug!(
            "Meshes: '{}' {:?}, '{}' {:?}",
            scene.duct.name, scene.duct.geometry, scene.indicator.name, scene.indicator.geometry
        );

        Ok(scene)
    }

    fn duct() -> Mesh {
        Mesh::new(
            "duct",
            Geometry::Box {
                width: DUCT_LENGTH,
                height: DUCT_SECTION,
                depth: DUCT_SECTION,
            },
            Material::Lambert { color: DUCT_COLOR },
        )
    }

    fn indicator() -> Mesh {
        let mut mesh = Mesh::new(
            "airflow",
            Geometry::Cylinder {
                radius_top: INDICATOR_RADIUS,
                radius_bottom: INDICATOR_RADIUS,
                height: INDICATOR_LENGTH,
                radial_segments: INDICATOR_SEGMENTS,
            },
            Material::Basic {
                color: INDICATOR_COLOR,
                opacity: INDICATOR_OPACITY,
                transparent: true,
            },
        );
        // Cylinders stand on y; tip it over so it runs horizontally
        mesh.transform.rotation.x = *Radians::FRAC_PI_2;
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VizError;
    use crate::render::HeadlessSurface;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_bootstrap_sizes_surface_and_camera() {
        let config = VizConfig::default();
        let mut surface = HeadlessSurface::new();
        let scene = SceneBootstrapper::new(&config)
            .bootstrap(&mut surface, Viewport::new(1280, 720))
            .unwrap();

        assert_eq!(surface.size(), Viewport::new(1280, 720));
        assert_relative_eq!(scene.camera.aspect(), 1280.0 / 720.0);
        assert_eq!(scene.camera.position, Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn test_bootstrap_meshes_and_light() {
        let config = VizConfig::default();
        let mut surface = HeadlessSurface::new();
        let scene = SceneBootstrapper::new(&config)
            .bootstrap(&mut surface, config.viewport)
            .unwrap();

        assert_eq!(
            scene.duct.geometry,
            Geometry::Box {
                width: 5.0,
                height: 0.5,
                depth: 0.5
            }
        );
        assert_eq!(scene.duct.material.color().hex(), 0x8b8b8b);
        assert_eq!(scene.duct.transform.rotation, Vec3::zeros());

        assert!(matches!(
            scene.indicator.material,
            Material::Basic {
                opacity,
                transparent: true,
                ..
            } if opacity == 0.5
        ));
        assert_eq!(scene.indicator.transform.rotation.x, FRAC_PI_2);

        assert_eq!(scene.light.position, Vec3::new(10.0, 10.0, 10.0));
        assert_eq!(scene.light.distance, 100.0);
        assert_eq!(scene.meshes().len(), 2);
    }

    #[test]
    fn test_zero_viewport_rejected() {
        let config = VizConfig::default();
        let mut surface = HeadlessSurface::new();
        let result = SceneBootstrapper::new(&config).bootstrap(&mut surface, Viewport::new(800, 0));
        assert!(matches!(
            result,
            Err(VizError::InvalidViewport {
                width: 800,
                height: 0
            })
        ));
        assert_eq!(surface.frames_rendered(), 0);
    }
}
