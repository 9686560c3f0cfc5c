use glam::{Mat4, Vec3};

/// Look-at camera.
///
/// The view matrix is cached and recomputed whenever `eye` or `target` move,
/// so `view()` is always `look_at(eye, target, up)`.
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Vec3,
    target: Vec3,
    up: Vec3,
    view: Mat4,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            eye,
            target,
            up,
            view: Mat4::look_at_rh(eye, target, up),
        }
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    #[inline]
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Pans the camera: eye and target shift by the same `delta`.
    ///
    /// The viewing direction `target - eye` is preserved; this is not an orbit.
    pub fn move_by(&mut self, delta: Vec3) {
        self.eye += delta;
        self.target += delta;
        self.update_view();
    }

    fn update_view(&mut self) {
        self.view = Mat4::look_at_rh(self.eye, self.target, self.up);
    }
}

impl Default for Camera {
    /// Eye at `(0, 0, 3)` looking at the origin, +Y up.
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_matches_look_at() {
        let cam = Camera::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y);
        let expected = Mat4::look_at_rh(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y);
        assert!(cam.view().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn target_maps_to_negative_z_axis() {
        let cam = Camera::default();
        let p = cam.view().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(0.0, 0.0, -3.0)).length() < 1e-5);
    }

    #[test]
    fn move_preserves_view_direction() {
        let mut cam = Camera::new(Vec3::new(0.0, 1.0, 5.0), Vec3::new(0.5, 0.0, 0.0), Vec3::Y);
        let before = cam.target() - cam.eye();

        for delta in [
            Vec3::new(0.1, 0.0, 0.0),
            Vec3::new(0.0, -0.1, 0.0),
            Vec3::new(3.0, 2.0, -7.5),
        ] {
            cam.move_by(delta);
            let after = cam.target() - cam.eye();
            assert!((after - before).length() < 1e-5);
        }
    }

    #[test]
    fn move_recomputes_view() {
        let mut cam = Camera::default();
        cam.move_by(Vec3::new(1.0, 0.0, 0.0));
        let expected = Mat4::look_at_rh(Vec3::new(1.0, 0.0, 3.0), Vec3::new(1.0, 0.0, 0.0), Vec3::Y);
        assert!(cam.view().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn pan_shifts_world_opposite_in_view_space() {
        let mut cam = Camera::default();
        cam.move_by(Vec3::new(0.5, 0.0, 0.0));
        let p = cam.view().transform_point3(Vec3::ZERO);
        assert!((p.x + 0.5).abs() < 1e-5);
    }
}
