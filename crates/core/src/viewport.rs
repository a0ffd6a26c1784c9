//! Viewport size and resize handling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{VizError, VizResult};
use crate::render::RenderSurface;
use crate::scene::PerspectiveCamera;

/// Drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both dimensions must be non-zero for the aspect ratio to exist.
    pub fn validate(&self) -> VizResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(VizError::invalid_viewport(self.width, self.height));
        }
        Ok(())
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1024, 768)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `WIDTHxHEIGHT`, e.g. `1920x1080`.
impl FromStr for Viewport {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VizError::invalid_config("viewport", &format!("expected WxH, got '{s}'"));
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(invalid)?;
        let width = w.trim().parse().map_err(|_| invalid())?;
        let height = h.trim().parse().map_err(|_| invalid())?;
        let viewport = Viewport::new(width, height);
        viewport.validate()?;
        Ok(viewport)
    }
}

/// Keeps the camera and the render surface in step with the window size.
pub struct ViewportAdapter;

impl ViewportAdapter {
    /// Apply a resize: camera aspect becomes `W / H`, projection is refreshed,
    /// and the surface is resized to `W x H`.
    ///
    /// Every call applies immediately; there is no debouncing.
    ///
    /// # Errors
    ///
    /// `VizError::InvalidViewport` for a zero dimension. Camera and surface
    /// are left untouched in that case.
    pub fn apply<S: RenderSurface + ?Sized>(
        camera: &mut PerspectiveCamera,
        surface: &mut S,
        viewport: Viewport,
    ) -> VizResult<()> {
        viewport.validate()?;

        camera.set_aspect(viewport.aspect());
        camera.update_projection_matrix();
        surface.set_size(viewport);

        debug!("Viewport resized to {} (aspect {:.4})", viewport, camera.aspect());
        Ok(())
    }
}
