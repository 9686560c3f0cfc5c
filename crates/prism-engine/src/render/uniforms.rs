use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Typed uniform upload.
///
/// Every pipeline shares one uniform block ([`ShapeUniforms`]); a variant
/// selects the field it writes. Shaders that do not read a field ignore it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Uniform {
    Mvp(Mat4),
    Model(Mat4),
    LightPos(Vec3),
    LightColor(Vec3),
    ObjectColor(Vec3),
    ViewPos(Vec3),
    /// Ambient light strength (`1f`).
    Ambient(f32),
}

impl Uniform {
    /// Field name as it appears in the WGSL uniform block.
    pub fn name(&self) -> &'static str {
        match self {
            Uniform::Mvp(_) => "mvp",
            Uniform::Model(_) => "model",
            Uniform::LightPos(_) => "light_pos",
            Uniform::LightColor(_) => "light_color",
            Uniform::ObjectColor(_) => "object_color",
            Uniform::ViewPos(_) => "view_pos",
            Uniform::Ambient(_) => "ambient",
        }
    }
}

/// CPU mirror of the WGSL `ShapeUniforms` block.
///
/// WGSL layout: two `mat4x4<f32>` (64 bytes each) followed by four
/// `vec4<f32>`. Vec3 values ride in `xyz`; `light_pos.w` carries `ambient`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ShapeUniforms {
    pub mvp: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub light_pos: [f32; 4],
    pub light_color: [f32; 4],
    pub object_color: [f32; 4],
    pub view_pos: [f32; 4],
}

impl ShapeUniforms {
    pub const SIZE: u64 = std::mem::size_of::<ShapeUniforms>() as u64;

    pub fn apply(&mut self, uniform: Uniform) {
        match uniform {
            Uniform::Mvp(m) => self.mvp = m.to_cols_array_2d(),
            Uniform::Model(m) => self.model = m.to_cols_array_2d(),
            Uniform::LightPos(v) => {
                let ambient = self.light_pos[3];
                self.light_pos = v.extend(ambient).to_array();
            }
            Uniform::LightColor(v) => self.light_color = v.extend(1.0).to_array(),
            Uniform::ObjectColor(v) => self.object_color = v.extend(1.0).to_array(),
            Uniform::ViewPos(v) => self.view_pos = v.extend(1.0).to_array(),
            Uniform::Ambient(a) => self.light_pos[3] = a,
        }
    }
}

impl Default for ShapeUniforms {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY.to_cols_array_2d(),
            model: Mat4::IDENTITY.to_cols_array_2d(),
            light_pos: [0.0, 0.0, 0.0, 0.1],
            light_color: [1.0; 4],
            object_color: [1.0; 4],
            view_pos: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_size_matches_wgsl() {
        assert_eq!(ShapeUniforms::SIZE, 192);
    }

    #[test]
    fn light_pos_keeps_ambient() {
        let mut u = ShapeUniforms::default();
        u.apply(Uniform::Ambient(0.25));
        u.apply(Uniform::LightPos(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(u.light_pos, [1.0, 2.0, 3.0, 0.25]);
    }

    #[test]
    fn mvp_is_column_major() {
        let mut u = ShapeUniforms::default();
        u.apply(Uniform::Mvp(Mat4::from_translation(Vec3::new(4.0, 5.0, 6.0))));
        assert_eq!(u.mvp[3], [4.0, 5.0, 6.0, 1.0]);
    }
}
