//! Transform and projection math.
//!
//! Conventions:
//! - `glam::Mat4`, column-major, column vectors (`M * v`)
//! - right-handed view space, camera looks down -Z
//! - clip space follows wgpu (depth in `0..1`)

mod camera;
mod projection;
mod transform;

pub use camera::Camera;
pub use projection::{set_projection, ProjectionKind};
pub use transform::Transform;
