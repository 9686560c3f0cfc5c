use std::path::PathBuf;

use glam::Vec3;

use crate::math::ProjectionKind;

/// Scene and camera parameters fixed at startup.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub projection: ProjectionKind,
    /// Vertical field of view; unused by orthographic projection.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,

    /// Image for the textured cube and sphere. Without one (or when it fails
    /// to decode) they sample plain white.
    pub texture_path: Option<PathBuf>,

    pub light_position: Vec3,

    /// Draw the primitive gallery (pixel, lines, triangles) along the top.
    pub show_gallery: bool,

    /// Tint the background from the cursor position as it moves.
    pub cursor_tints_background: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionKind::Perspective,
            fov_deg: 60.0,
            near: 0.1,
            far: 100.0,
            texture_path: None,
            light_position: Vec3::new(1.2, 1.0, 2.0),
            show_gallery: true,
            cursor_tints_background: false,
        }
    }
}
