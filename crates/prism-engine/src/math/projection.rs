use glam::Mat4;

/// Projection mode.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ProjectionKind {
    #[default]
    Perspective,
    /// Symmetric ortho box: `x ∈ [-aspect, aspect]`, `y ∈ [-1, 1]`.
    Orthographic,
}

impl ProjectionKind {
    /// Maps the numeric type flag used by startup parameters: `1` selects
    /// perspective, anything else selects orthographic.
    pub fn from_flag(flag: i32) -> Self {
        if flag == 1 {
            Self::Perspective
        } else {
            Self::Orthographic
        }
    }
}

/// Builds a projection matrix. Pure; independent of any camera state.
///
/// `fov_deg` is the vertical field of view and is ignored for orthographic
/// projections. The ortho box keeps a fixed `±1` vertical extent regardless
/// of `aspect`.
pub fn set_projection(fov_deg: f32, aspect: f32, near: f32, far: f32, kind: ProjectionKind) -> Mat4 {
    match kind {
        ProjectionKind::Perspective => Mat4::perspective_rh(fov_deg.to_radians(), aspect, near, far),
        ProjectionKind::Orthographic => Mat4::orthographic_rh(-aspect, aspect, -1.0, 1.0, near, far),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn flag_one_is_perspective() {
        assert_eq!(ProjectionKind::from_flag(1), ProjectionKind::Perspective);
        assert_eq!(ProjectionKind::from_flag(0), ProjectionKind::Orthographic);
        assert_eq!(ProjectionKind::from_flag(2), ProjectionKind::Orthographic);
    }

    #[test]
    fn perspective_depth_range_is_zero_to_one() {
        let p = set_projection(60.0, 1.6, 0.1, 100.0, ProjectionKind::Perspective);

        let near = p * Vec4::new(0.0, 0.0, -0.1, 1.0);
        let far = p * Vec4::new(0.0, 0.0, -100.0, 1.0);

        assert!((near.z / near.w).abs() < 1e-4);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn ortho_uses_aspect_horizontally_and_unit_vertically() {
        let p = set_projection(60.0, 2.0, 0.1, 10.0, ProjectionKind::Orthographic);

        let right = p.project_point3(Vec3::new(2.0, 0.0, -1.0));
        let top = p.project_point3(Vec3::new(0.0, 1.0, -1.0));

        assert!((right.x - 1.0).abs() < 1e-5);
        assert!((top.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn ortho_ignores_fov() {
        let a = set_projection(30.0, 1.5, 0.1, 10.0, ProjectionKind::Orthographic);
        let b = set_projection(90.0, 1.5, 0.1, 10.0, ProjectionKind::Orthographic);
        assert_eq!(a, b);
    }
}
