//! Drawable shapes: a [`Transform`] plus a [`Drawable`].
//!
//! Capabilities are split into small traits so the engine can hold any
//! shape as `Box<dyn Shape>`.

mod lit;
mod primitives;

pub use lit::{Cube, LightCube, LitCube, TexturedCube, TexturedSphere};
pub use primitives::{Line, LineLoop, LineStripe, Pixel, Triangle, TriangleFan, TriangleStrip};

use glam::{Mat4, Vec3};

use crate::math::Transform;
use crate::render::Drawable;

/// Per-frame matrices and lighting shared by every draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawContext {
    pub projection: Mat4,
    pub view: Mat4,
    /// Camera eye in world space.
    pub view_pos: Vec3,
    pub light_pos: Vec3,
    pub light_color: Vec3,
}

impl DrawContext {
    /// `projection × view × model`.
    #[inline]
    pub fn mvp(&self, model: Mat4) -> Mat4 {
        self.projection * self.view * model
    }
}

impl Default for DrawContext {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            view_pos: Vec3::ZERO,
            light_pos: Vec3::ZERO,
            light_color: Vec3::ONE,
        }
    }
}

pub trait HasTransform {
    fn transform(&self) -> &Transform;
    fn transform_mut(&mut self) -> &mut Transform;

    fn set_transform(&mut self, transform: Transform) {
        *self.transform_mut() = transform;
    }
}

pub trait Draw {
    fn draw(&self, ctx: &DrawContext);
}

/// Per-frame tick.
pub trait Updatable {
    fn update(&mut self);
    /// Ticks since construction.
    fn updates(&self) -> u64;
}

/// Everything the frame loop needs from a shape.
pub trait Shape: HasTransform + Draw + Updatable {
    fn drawable(&self) -> &Drawable;
}

/// State every shape embeds.
pub(crate) struct ShapeCore {
    pub transform: Transform,
    pub drawable: Drawable,
    pub updates: u64,
}

impl ShapeCore {
    pub fn new(drawable: Drawable) -> Self {
        Self {
            transform: Transform::new(),
            drawable,
            updates: 0,
        }
    }
}

/// Implements the shared capability traits by delegating to `self.core`.
macro_rules! impl_shape_core {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::shapes::HasTransform for $ty {
            fn transform(&self) -> &$crate::math::Transform {
                &self.core.transform
            }

            fn transform_mut(&mut self) -> &mut $crate::math::Transform {
                &mut self.core.transform
            }
        }

        impl $crate::shapes::Updatable for $ty {
            fn update(&mut self) {
                self.core.updates += 1;
            }

            fn updates(&self) -> u64 {
                self.core.updates
            }
        }

        impl $crate::shapes::Shape for $ty {
            fn drawable(&self) -> &$crate::render::Drawable {
                &self.core.drawable
            }
        }
    )+};
}
pub(crate) use impl_shape_core;
