//! Position-only primitives drawn with one flat color.

use glam::Vec3;

use crate::mesh::Mesh;
use crate::render::{BackendRef, Drawable, ShaderError, ShaderSource, Topology, Uniform};

use super::{impl_shape_core, Draw, DrawContext, ShapeCore};

fn draw_flat(core: &ShapeCore, color: Vec3, ctx: &DrawContext) {
    core.drawable.draw(
        &[
            Uniform::Mvp(ctx.mvp(core.transform.matrix())),
            Uniform::ObjectColor(color),
        ],
        None,
    );
}

macro_rules! flat_shape {
    ($(#[$meta:meta])* $name:ident, $topology:expr) => {
        $(#[$meta])*
        pub struct $name {
            core: ShapeCore,
            color: Vec3,
        }

        impl $name {
            fn build(backend: &BackendRef, points: &[[f32; 3]], shaders: &ShaderSource) -> Result<Self, ShaderError> {
                let mesh = Mesh::from_points(points, $topology);
                let drawable = Drawable::new(backend, &mesh, shaders)?;
                log::debug!("{} built with {} vertices", stringify!($name), mesh.vertex_count());
                Ok(Self {
                    core: ShapeCore::new(drawable),
                    color: Vec3::ONE,
                })
            }

            /// Flat color (linear RGB). White by default.
            pub fn with_color(mut self, color: Vec3) -> Self {
                self.color = color;
                self
            }

            #[inline]
            pub fn color(&self) -> Vec3 {
                self.color
            }
        }

        impl Draw for $name {
            fn draw(&self, ctx: &DrawContext) {
                draw_flat(&self.core, self.color, ctx);
            }
        }

        impl_shape_core!($name);
    };
}

flat_shape!(
    /// A single point.
    Pixel,
    Topology::Points
);
flat_shape!(
    /// One segment between two points.
    Line,
    Topology::Lines
);
flat_shape!(
    /// Closed polyline: the last point connects back to the first.
    LineLoop,
    Topology::LineLoop
);
flat_shape!(
    /// Open polyline through consecutive points.
    LineStripe,
    Topology::LineStrip
);
flat_shape!(
    /// Independent triangles, three points each.
    Triangle,
    Topology::Triangles
);
flat_shape!(TriangleStrip, Topology::TriangleStrip);
flat_shape!(
    /// Triangles sharing the first point.
    TriangleFan,
    Topology::TriangleFan
);

impl Pixel {
    pub fn new(backend: &BackendRef, position: [f32; 3], shaders: &ShaderSource) -> Result<Self, ShaderError> {
        Self::build(backend, &[position], shaders)
    }
}

impl Line {
    pub fn new(
        backend: &BackendRef,
        start: [f32; 3],
        end: [f32; 3],
        shaders: &ShaderSource,
    ) -> Result<Self, ShaderError> {
        Self::build(backend, &[start, end], shaders)
    }
}

impl LineLoop {
    pub fn new(backend: &BackendRef, points: &[[f32; 3]], shaders: &ShaderSource) -> Result<Self, ShaderError> {
        Self::build(backend, points, shaders)
    }
}

impl LineStripe {
    pub fn new(backend: &BackendRef, points: &[[f32; 3]], shaders: &ShaderSource) -> Result<Self, ShaderError> {
        Self::build(backend, points, shaders)
    }
}

impl Triangle {
    pub fn new(backend: &BackendRef, vertices: &[[f32; 3]], shaders: &ShaderSource) -> Result<Self, ShaderError> {
        Self::build(backend, vertices, shaders)
    }
}

impl TriangleStrip {
    pub fn new(backend: &BackendRef, points: &[[f32; 3]], shaders: &ShaderSource) -> Result<Self, ShaderError> {
        Self::build(backend, points, shaders)
    }
}

impl TriangleFan {
    pub fn new(backend: &BackendRef, points: &[[f32; 3]], shaders: &ShaderSource) -> Result<Self, ShaderError> {
        Self::build(backend, points, shaders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{BuiltinShader, Command};
    use crate::shapes::test_support::backend;
    use crate::shapes::{HasTransform, Shape, Updatable};

    const SQUARE: [[f32; 3]; 4] = [
        [-0.5, -0.5, 0.0],
        [0.5, -0.5, 0.0],
        [0.5, 0.5, 0.0],
        [-0.5, 0.5, 0.0],
    ];

    fn last_draw(rec: &crate::render::RecordingBackend) -> Command {
        rec.draws().last().cloned().unwrap()
    }

    // ── counts ────────────────────────────────────────────────────────────

    #[test]
    fn draw_counts_follow_point_counts() {
        let (rec, backend) = backend();
        let flat = BuiltinShader::Flat.source();
        let ctx = DrawContext::default();

        let shapes: Vec<(Box<dyn Shape>, Topology, u32)> = vec![
            (Box::new(Pixel::new(&backend, [0.0; 3], &flat).unwrap()), Topology::Points, 1),
            (
                Box::new(Line::new(&backend, [0.0; 3], [1.0, 0.0, 0.0], &flat).unwrap()),
                Topology::Lines,
                2,
            ),
            (Box::new(LineLoop::new(&backend, &SQUARE, &flat).unwrap()), Topology::LineLoop, 4),
            (Box::new(LineStripe::new(&backend, &SQUARE, &flat).unwrap()), Topology::LineStrip, 4),
            (Box::new(Triangle::new(&backend, &SQUARE[..3], &flat).unwrap()), Topology::Triangles, 3),
            (Box::new(TriangleStrip::new(&backend, &SQUARE, &flat).unwrap()), Topology::TriangleStrip, 4),
            (Box::new(TriangleFan::new(&backend, &SQUARE, &flat).unwrap()), Topology::TriangleFan, 4),
        ];

        for (shape, topology, count) in &shapes {
            shape.draw(&ctx);
            assert_eq!(last_draw(&rec.borrow()), Command::DrawArrays { topology: *topology, first: 0, count: *count });
        }
        assert!(rec.borrow().errors().is_empty(), "{:?}", rec.borrow().errors());
    }

    // ── uniforms ──────────────────────────────────────────────────────────

    #[test]
    fn flat_draw_uploads_mvp_and_color() {
        let (rec, backend) = backend();
        let mut line = Line::new(&backend, [0.0; 3], [1.0; 3], &BuiltinShader::Flat.source())
            .unwrap()
            .with_color(Vec3::new(1.0, 0.0, 0.0));
        line.transform_mut().translate(2.0, 0.0);

        let ctx = DrawContext::default();
        line.draw(&ctx);

        let uniforms: Vec<Uniform> = rec
            .borrow()
            .commands()
            .iter()
            .filter_map(|c| match c {
                Command::SetUniform(u) => Some(*u),
                _ => None,
            })
            .collect();
        assert_eq!(
            uniforms,
            vec![
                Uniform::Mvp(line.transform().matrix()),
                Uniform::ObjectColor(Vec3::new(1.0, 0.0, 0.0)),
            ]
        );
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn update_counts_ticks() {
        let (_rec, backend) = backend();
        let mut p = Pixel::new(&backend, [0.0; 3], &BuiltinShader::Flat.source()).unwrap();
        p.update();
        p.update();
        assert_eq!(p.updates(), 2);
    }

    #[test]
    fn dropping_shapes_releases_gpu_objects() {
        let (rec, backend) = backend();
        {
            let _fan = TriangleFan::new(&backend, &SQUARE, &BuiltinShader::Flat.source()).unwrap();
            assert!(rec.borrow().live_objects() > 0);
        }
        assert_eq!(rec.borrow().live_objects(), 0);
    }
}
