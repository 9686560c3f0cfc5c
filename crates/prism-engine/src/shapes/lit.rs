//! Cubes, the light marker and the textured sphere.

use glam::{Mat4, Vec3};

use crate::mesh::{self, Mesh, LIGHT_CUBE_SCALE, SPHERE_RADIUS, SPHERE_SECTORS, SPHERE_STACKS};
use crate::render::{BackendRef, Drawable, ShaderError, ShaderSource, TextureHandle, Uniform};

use super::{impl_shape_core, Draw, DrawContext, ShapeCore};

fn build(backend: &BackendRef, mesh: &Mesh, shaders: &ShaderSource, name: &str) -> Result<ShapeCore, ShaderError> {
    let drawable = Drawable::new(backend, mesh, shaders)?;
    log::debug!(
        "{name} built: {} vertices, {} indices",
        mesh.vertex_count(),
        mesh.indices.as_ref().map_or(0, Vec::len)
    );
    Ok(ShapeCore::new(drawable))
}

/// Uniforms for the lit pipelines.
fn lighting(ctx: &DrawContext, model: Mat4, object_color: Vec3) -> [Uniform; 6] {
    [
        Uniform::Mvp(ctx.mvp(model)),
        Uniform::Model(model),
        Uniform::LightPos(ctx.light_pos),
        Uniform::LightColor(ctx.light_color),
        Uniform::ObjectColor(object_color),
        Uniform::ViewPos(ctx.view_pos),
    ]
}

// ── Cube ──────────────────────────────────────────────────────────────────

/// Unlit cube over 8 shared corners.
pub struct Cube {
    core: ShapeCore,
    color: Vec3,
}

impl Cube {
    pub fn new(backend: &BackendRef, shaders: &ShaderSource) -> Result<Self, ShaderError> {
        Ok(Self {
            core: build(backend, &mesh::cube(), shaders, "Cube")?,
            color: Vec3::ONE,
        })
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }
}

impl Draw for Cube {
    fn draw(&self, ctx: &DrawContext) {
        let model = self.core.transform.matrix();
        self.core
            .drawable
            .draw(&[Uniform::Mvp(ctx.mvp(model)), Uniform::ObjectColor(self.color)], None);
    }
}

// ── LitCube ───────────────────────────────────────────────────────────────

/// Cube with per-face normals, lit per vertex.
pub struct LitCube {
    core: ShapeCore,
    color: Vec3,
}

impl LitCube {
    /// Orange-ish object color unless overridden.
    pub const DEFAULT_COLOR: Vec3 = Vec3::new(1.0, 0.5, 0.31);

    pub fn new(backend: &BackendRef, shaders: &ShaderSource) -> Result<Self, ShaderError> {
        Ok(Self {
            core: build(backend, &mesh::lit_cube(), shaders, "LitCube")?,
            color: Self::DEFAULT_COLOR,
        })
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }
}

impl Draw for LitCube {
    fn draw(&self, ctx: &DrawContext) {
        let uniforms = lighting(ctx, self.core.transform.matrix(), self.color);
        self.core.drawable.draw(&uniforms, None);
    }
}

// ── LightCube ─────────────────────────────────────────────────────────────

/// Small unlit cube marking the light position.
///
/// The model matrix is `translate(light_pos) × transform`, so the marker
/// follows the light without anyone updating its transform.
pub struct LightCube {
    core: ShapeCore,
}

impl LightCube {
    pub fn new(backend: &BackendRef, shaders: &ShaderSource) -> Result<Self, ShaderError> {
        Ok(Self {
            core: build(backend, &mesh::light_cube(LIGHT_CUBE_SCALE), shaders, "LightCube")?,
        })
    }

    pub fn model(&self, light_pos: Vec3) -> Mat4 {
        Mat4::from_translation(light_pos) * self.core.transform.matrix()
    }
}

impl Draw for LightCube {
    fn draw(&self, ctx: &DrawContext) {
        let model = self.model(ctx.light_pos);
        self.core.drawable.draw(
            &[
                Uniform::Mvp(ctx.mvp(model)),
                Uniform::Model(model),
                Uniform::LightColor(ctx.light_color),
            ],
            None,
        );
    }
}

// ── textured ──────────────────────────────────────────────────────────────

/// Lit cube sampling a texture on every face.
///
/// The texture belongs to the [`TextureCache`](crate::render::TextureCache);
/// without one the backend's white fallback is sampled.
pub struct TexturedCube {
    core: ShapeCore,
    texture: Option<TextureHandle>,
}

impl TexturedCube {
    pub fn new(
        backend: &BackendRef,
        shaders: &ShaderSource,
        texture: Option<TextureHandle>,
    ) -> Result<Self, ShaderError> {
        Ok(Self {
            core: build(backend, &mesh::textured_cube(), shaders, "TexturedCube")?,
            texture,
        })
    }

    #[inline]
    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }
}

impl Draw for TexturedCube {
    fn draw(&self, ctx: &DrawContext) {
        let uniforms = lighting(ctx, self.core.transform.matrix(), Vec3::ONE);
        self.core.drawable.draw(&uniforms, self.texture);
    }
}

/// Textured UV-sphere.
pub struct TexturedSphere {
    core: ShapeCore,
    texture: Option<TextureHandle>,
}

impl TexturedSphere {
    /// Sphere with the default radius and tessellation.
    pub fn new(
        backend: &BackendRef,
        shaders: &ShaderSource,
        texture: Option<TextureHandle>,
    ) -> Result<Self, ShaderError> {
        Self::with_detail(backend, shaders, texture, SPHERE_RADIUS, SPHERE_SECTORS, SPHERE_STACKS)
    }

    pub fn with_detail(
        backend: &BackendRef,
        shaders: &ShaderSource,
        texture: Option<TextureHandle>,
        radius: f32,
        sectors: u32,
        stacks: u32,
    ) -> Result<Self, ShaderError> {
        let mesh = mesh::uv_sphere(radius, sectors, stacks);
        Ok(Self {
            core: build(backend, &mesh, shaders, "TexturedSphere")?,
            texture,
        })
    }

    #[inline]
    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }
}

impl Draw for TexturedSphere {
    fn draw(&self, ctx: &DrawContext) {
        let uniforms = lighting(ctx, self.core.transform.matrix(), Vec3::ONE);
        self.core.drawable.draw(&uniforms, self.texture);
    }
}

impl_shape_core!(Cube, LitCube, LightCube, TexturedCube, TexturedSphere);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{BuiltinShader, Command, ImageRgba8, RenderBackend, ShaderError, Topology};
    use crate::shapes::test_support::backend;
    use crate::shapes::{HasTransform, Shape};

    fn uniforms(cmds: &[Command]) -> Vec<Uniform> {
        cmds.iter()
            .filter_map(|c| match c {
                Command::SetUniform(u) => Some(*u),
                _ => None,
            })
            .collect()
    }

    // ── cube ──────────────────────────────────────────────────────────────

    #[test]
    fn cube_draws_twelve_indexed_triangles_with_identity_matrices() {
        let (rec, backend) = backend();
        let cube = Cube::new(&backend, &BuiltinShader::Flat.source()).unwrap();

        cube.draw(&DrawContext::default());

        let rec = rec.borrow();
        let draws: Vec<_> = rec.draws().cloned().collect();
        assert_eq!(draws, vec![Command::DrawElements { topology: Topology::Triangles, count: 36 }]);
        assert_eq!(Topology::Triangles.primitive_count(36), 12);
        assert_eq!(uniforms(rec.commands())[0], Uniform::Mvp(Mat4::IDENTITY));
        assert!(rec.errors().is_empty(), "{:?}", rec.errors());
    }

    #[test]
    fn cube_with_broken_shader_fails_and_leaks_nothing() {
        let (rec, backend) = backend();
        let shaders = ShaderSource::new(
            BuiltinShader::Flat.source().vertex,
            "@fragment fn fs_main() -> @location(0) vec4<f32> { return undefined_fn(); }",
        );

        let err = Cube::new(&backend, &shaders).err().unwrap();

        assert!(matches!(err, ShaderError::Compile { .. }));
        assert_eq!(rec.borrow().live_objects(), 0);
    }

    // ── lighting ──────────────────────────────────────────────────────────

    #[test]
    fn lit_cube_uploads_full_lighting_set() {
        let (rec, backend) = backend();
        let mut cube = LitCube::new(&backend, &BuiltinShader::Lit.source()).unwrap();
        cube.transform_mut().scale(2.0);

        let ctx = DrawContext {
            view_pos: Vec3::new(0.0, 0.0, 3.0),
            light_pos: Vec3::new(1.2, 1.0, 2.0),
            ..Default::default()
        };
        cube.draw(&ctx);

        let model = Mat4::from_scale(Vec3::splat(2.0));
        assert_eq!(
            uniforms(rec.borrow().commands()),
            vec![
                Uniform::Mvp(model),
                Uniform::Model(model),
                Uniform::LightPos(Vec3::new(1.2, 1.0, 2.0)),
                Uniform::LightColor(Vec3::ONE),
                Uniform::ObjectColor(LitCube::DEFAULT_COLOR),
                Uniform::ViewPos(Vec3::new(0.0, 0.0, 3.0)),
            ]
        );
        assert_eq!(cube.drawable().count(), 36);
    }

    #[test]
    fn light_cube_follows_light_position() {
        let (rec, backend) = backend();
        let lamp = LightCube::new(&backend, &BuiltinShader::Lamp.source()).unwrap();

        let ctx = DrawContext {
            light_pos: Vec3::new(1.2, 1.0, 2.0),
            ..Default::default()
        };
        lamp.draw(&ctx);

        let rec = rec.borrow();
        let expected = Mat4::from_translation(Vec3::new(1.2, 1.0, 2.0));
        assert!(uniforms(rec.commands()).contains(&Uniform::Model(expected)));
        assert_eq!(
            rec.draws().last(),
            Some(&Command::DrawArrays { topology: Topology::Triangles, first: 0, count: 36 })
        );
    }

    // ── textured ──────────────────────────────────────────────────────────

    #[test]
    fn textured_shapes_bind_their_texture() {
        let (rec, backend) = backend();
        let tex = rec.borrow_mut().create_texture(&ImageRgba8::white());
        let shaders = BuiltinShader::Textured.source();

        let cube = TexturedCube::new(&backend, &shaders, Some(tex)).unwrap();
        let sphere = TexturedSphere::new(&backend, &shaders, Some(tex)).unwrap();
        cube.draw(&DrawContext::default());
        sphere.draw(&DrawContext::default());

        let rec = rec.borrow();
        let binds = rec
            .commands()
            .iter()
            .filter(|c| matches!(c, Command::BindTexture { unit: 0, .. }))
            .count();
        assert_eq!(binds, 2);
        assert_eq!(
            rec.draws().last(),
            Some(&Command::DrawElements { topology: Topology::Triangles, count: 6 * 32 * 16 })
        );
        assert!(rec.errors().is_empty(), "{:?}", rec.errors());
    }

    #[test]
    fn missing_texture_skips_bind() {
        let (rec, backend) = backend();
        let cube = TexturedCube::new(&backend, &BuiltinShader::Textured.source(), None).unwrap();
        cube.draw(&DrawContext::default());
        assert!(!rec
            .borrow()
            .commands()
            .iter()
            .any(|c| matches!(c, Command::BindTexture { .. })));
    }
}
