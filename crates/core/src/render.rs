//! Render surface abstraction.
//!
//! Rasterization belongs to an external graphics library. The core only needs
//! a place to size and submit frames to; [`RenderSurface`] is that seam.
//! [`HeadlessSurface`] keeps a record of what was submitted, which is what the
//! headless demo and the tests observe.

use serde::Serialize;

use crate::core_types::Vec3;
use crate::error::VizResult;
use crate::scene::HvacScene;
use crate::viewport::Viewport;

/// Target that frames are drawn to.
pub trait RenderSurface: Send {
    /// Resize the drawable area.
    fn set_size(&mut self, viewport: Viewport);

    /// Current drawable area.
    fn size(&self) -> Viewport;

    /// Draw the scene as seen from its camera.
    fn render(&mut self, scene: &HvacScene) -> VizResult<()>;
}

/// State of the animated objects at the moment a frame was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub duct_rotation: Vec3,
    pub indicator_position: Vec3,
    pub indicator_rotation: Vec3,
    pub camera_aspect: f32,
    pub surface: Viewport,
}

impl FrameSnapshot {
    pub fn capture(scene: &HvacScene, surface: Viewport) -> Self {
        Self {
            duct_rotation: scene.duct.transform.rotation,
            indicator_position: scene.indicator.transform.position,
            indicator_rotation: scene.indicator.transform.rotation,
            camera_aspect: scene.camera.aspect(),
            surface,
        }
    }
}

/// Surface that draws nothing and remembers the last frame.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    size: Option<Viewport>,
    frames: u64,
    last: Option<FrameSnapshot>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> Option<&FrameSnapshot> {
        self.last.as_ref()
    }
}

impl RenderSurface for HeadlessSurface {
    fn set_size(&mut self, viewport: Viewport) {
        self.size = Some(viewport);
    }

    /// Reports the default viewport until the surface has been sized.
    fn size(&self) -> Viewport {
        self.size.unwrap_or_default()
    }

    fn render(&mut self, scene: &HvacScene) -> VizResult<()> {
        self.frames += 1;
        self.last = Some(FrameSnapshot::capture(scene, self.size()));
        Ok(())
    }
}

impl<S: RenderSurface + ?Sized> RenderSurface for Box<S> {
    fn set_size(&mut self, viewport: Viewport) {
        (**self).set_size(viewport);
    }

    fn size(&self) -> Viewport {
        (**self).size()
    }

    fn render(&mut self, scene: &HvacScene) -> VizResult<()> {
        (**self).render(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VizConfig;
    use crate::scene::SceneBootstrapper;

    #[test]
    fn test_headless_records_frames() {
        let config = VizConfig::default();
        let mut surface = HeadlessSurface::new();
        let mut scene = SceneBootstrapper::new(&config)
            .bootstrap(&mut surface, Viewport::new(800, 600))
            .unwrap();
        assert!(surface.last_frame().is_none());

        scene.indicator.transform.position.x = 2.5;
        surface.render(&scene).unwrap();
        surface.render(&scene).unwrap();

        assert_eq!(surface.frames_rendered(), 2);
        let frame = surface.last_frame().unwrap();
        assert_eq!(frame.indicator_position.x, 2.5);
        assert_eq!(frame.surface, Viewport::new(800, 600));
        assert_eq!(frame.camera_aspect, 800.0 / 600.0);
    }

    #[test]
    fn test_boxed_surface_forwards() {
        let mut surface: Box<dyn RenderSurface> = Box::new(HeadlessSurface::new());
        surface.set_size(Viewport::new(320, 200));
        assert_eq!(surface.size(), Viewport::new(320, 200));
    }
}
