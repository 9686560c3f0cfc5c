use glam::{Mat4, Vec3};

/// Model matrix of a single shape.
///
/// Every operation right-multiplies the current matrix by an elementary
/// matrix, so calls compound in order: `t.translate(..); t.scale(..)` yields
/// `T · S`, which scales a vertex first and translates it second.
///
/// Nothing resets the matrix except constructing a new `Transform`. Callers
/// that hold absolute pose parameters build a fresh value each frame instead
/// of feeding deltas into a long-lived one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    #[inline]
    pub const fn new() -> Self {
        Self { matrix: Mat4::IDENTITY }
    }

    /// Uniform scale by `s` on all three axes.
    pub fn scale(&mut self, s: f32) {
        self.matrix *= Mat4::from_scale(Vec3::splat(s));
    }

    /// Rotates about X, then Y, then Z. Angles are in degrees.
    ///
    /// The three rotations are applied as separate right-multiplications,
    /// not folded into a single Euler rotation.
    pub fn rotate(&mut self, angle_x: f32, angle_y: f32, angle_z: f32) {
        self.matrix *= Mat4::from_rotation_x(angle_x.to_radians());
        self.matrix *= Mat4::from_rotation_y(angle_y.to_radians());
        self.matrix *= Mat4::from_rotation_z(angle_z.to_radians());
    }

    /// Translates in the XY plane. Z translation is not exposed here.
    pub fn translate(&mut self, x: f32, y: f32) {
        self.matrix *= Mat4::from_translation(Vec3::new(x, y, 0.0));
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Applies the model matrix to a point (w = 1).
    #[inline]
    pub fn apply_point(&self, p: Vec3) -> Vec3 {
        self.matrix.transform_point3(p)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
