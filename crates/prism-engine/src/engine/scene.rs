use glam::Vec3;

use crate::render::{BackendRef, BuiltinShader, ShaderError, TextureCache};
use crate::shapes::{
    Draw, DrawContext, LightCube, Line, LineLoop, LineStripe, LitCube, Pixel, Shape, TexturedCube,
    TexturedSphere, Triangle, TriangleFan, TriangleStrip, Updatable,
};

use super::config::EngineConfig;
use super::state::{EngineState, OBJECT_COUNT};

/// Every shape the engine draws, built once at startup.
///
/// Draw order: tracked objects (by mode), the light marker, then the
/// primitive gallery.
pub struct Scene {
    tracked: Vec<Box<dyn Shape>>,
    light: LightCube,
    gallery: Vec<Box<dyn Shape>>,
    // Owns the texture the tracked shapes sample.
    textures: TextureCache,
}

impl Scene {
    pub fn new(backend: &BackendRef, config: &EngineConfig) -> Result<Self, ShaderError> {
        Self::with_textures(backend, config, TextureCache::new(backend.clone()))
    }

    pub fn with_textures(
        backend: &BackendRef,
        config: &EngineConfig,
        mut textures: TextureCache,
    ) -> Result<Self, ShaderError> {
        let texture = config.texture_path.as_ref().and_then(|p| textures.load(p));

        let textured = BuiltinShader::Textured.source();
        let tracked: Vec<Box<dyn Shape>> = vec![
            Box::new(LitCube::new(backend, &BuiltinShader::Lit.source())?),
            Box::new(TexturedCube::new(backend, &textured, texture)?),
            Box::new(TexturedSphere::new(backend, &textured, texture)?),
        ];
        debug_assert_eq!(tracked.len(), OBJECT_COUNT);

        let light = LightCube::new(backend, &BuiltinShader::Lamp.source())?;

        let gallery = if config.show_gallery {
            gallery(backend)?
        } else {
            Vec::new()
        };

        log::info!(
            "scene ready: {} tracked, {} gallery shapes, texture {}",
            tracked.len(),
            gallery.len(),
            if texture.is_some() { "loaded" } else { "none" }
        );

        Ok(Self {
            tracked,
            light,
            gallery,
            textures,
        })
    }

    /// Shapes drawn per frame, light marker included.
    pub fn shape_count(&self) -> usize {
        self.tracked.len() + 1 + self.gallery.len()
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    /// Places each tracked shape from `state`, then draws everything.
    pub fn draw(&mut self, ctx: &DrawContext, state: &EngineState) {
        for (shape, params) in self.tracked.iter_mut().zip(state.objects()) {
            shape.set_transform(params.transform());
            shape.update();
            shape.draw(ctx);
        }

        self.light.update();
        self.light.draw(ctx);

        for shape in &mut self.gallery {
            shape.update();
            shape.draw(ctx);
        }
    }
}

/// One of each flat primitive, in a row above the tracked objects.
fn gallery(backend: &BackendRef) -> Result<Vec<Box<dyn Shape>>, ShaderError> {
    let flat = BuiltinShader::Flat.source();
    const Y: f32 = 1.3;

    Ok(vec![
        Box::new(Pixel::new(backend, [-2.4, Y, 0.0], &flat)?.with_color(Vec3::new(1.0, 1.0, 0.0))),
        Box::new(
            Line::new(backend, [-2.2, Y - 0.2, 0.0], [-1.8, Y + 0.2, 0.0], &flat)?
                .with_color(Vec3::new(1.0, 0.3, 0.3)),
        ),
        Box::new(
            LineLoop::new(
                backend,
                &[
                    [-1.5, Y - 0.2, 0.0],
                    [-1.1, Y - 0.2, 0.0],
                    [-1.1, Y + 0.2, 0.0],
                    [-1.5, Y + 0.2, 0.0],
                ],
                &flat,
            )?
            .with_color(Vec3::new(0.3, 1.0, 0.3)),
        ),
        Box::new(
            LineStripe::new(
                backend,
                &[
                    [-0.8, Y - 0.2, 0.0],
                    [-0.65, Y + 0.2, 0.0],
                    [-0.5, Y - 0.2, 0.0],
                    [-0.35, Y + 0.2, 0.0],
                ],
                &flat,
            )?
            .with_color(Vec3::new(0.3, 0.6, 1.0)),
        ),
        Box::new(
            Triangle::new(
                backend,
                &[[-0.1, Y - 0.2, 0.0], [0.3, Y - 0.2, 0.0], [0.1, Y + 0.2, 0.0]],
                &flat,
            )?
            .with_color(Vec3::new(1.0, 0.6, 0.0)),
        ),
        Box::new(
            TriangleStrip::new(
                backend,
                &[
                    [0.6, Y - 0.2, 0.0],
                    [0.6, Y + 0.2, 0.0],
                    [0.9, Y - 0.2, 0.0],
                    [0.9, Y + 0.2, 0.0],
                    [1.2, Y - 0.2, 0.0],
                ],
                &flat,
            )?
            .with_color(Vec3::new(0.8, 0.3, 1.0)),
        ),
        Box::new(
            TriangleFan::new(
                backend,
                &[
                    [1.7, Y, 0.0],
                    [1.95, Y, 0.0],
                    [1.8, Y + 0.22, 0.0],
                    [1.6, Y + 0.22, 0.0],
                    [1.45, Y, 0.0],
                    [1.6, Y - 0.22, 0.0],
                    [1.8, Y - 0.22, 0.0],
                    [1.95, Y, 0.0],
                ],
                &flat,
            )?
            .with_color(Vec3::new(0.2, 1.0, 0.9)),
        ),
    ])
}
