//! Small value types shared by the render and runtime layers.

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
