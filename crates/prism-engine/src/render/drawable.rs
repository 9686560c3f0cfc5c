use crate::mesh::Mesh;

use super::backend::{
    BackendRef, BufferHandle, BufferKind, Command, ProgramHandle, TextureHandle, VertexArrayDesc,
    VertexArrayHandle,
};
use super::layout::VertexLayout;
use super::shader::{self, ShaderError, ShaderSource};
use super::topology::Topology;
use super::uniforms::Uniform;

/// GPU-resident mesh plus the program that draws it.
///
/// Owns its buffers, vertex array and program; all are released on drop,
/// each exactly once.
pub struct Drawable {
    backend: BackendRef,

    vertex_buffer: Option<BufferHandle>,
    index_buffer: Option<BufferHandle>,
    vertex_array: Option<VertexArrayHandle>,
    program: Option<ProgramHandle>,

    layout: VertexLayout,
    topology: Topology,
    count: u32,
    indexed: bool,
}

impl Drawable {
    /// Uploads `mesh`, then compiles and links `shaders` against its layout.
    ///
    /// On shader failure the already uploaded buffers are released before
    /// the error is returned.
    pub fn new(backend: &BackendRef, mesh: &Mesh, shaders: &ShaderSource) -> Result<Self, ShaderError> {
        debug_assert!(mesh.is_well_formed(), "malformed mesh");

        let mut drawable = {
            let mut b = backend.borrow_mut();
            let vertex_buffer = b.create_buffer(BufferKind::Vertex, bytemuck::cast_slice(&mesh.vertices));
            let index_buffer = mesh
                .indices
                .as_ref()
                .map(|indices| b.create_buffer(BufferKind::Index, bytemuck::cast_slice(indices)));
            let vertex_array = b.create_vertex_array(&VertexArrayDesc {
                vertex_buffer,
                index_buffer,
                layout: mesh.layout,
            });

            Self {
                backend: backend.clone(),
                vertex_buffer: Some(vertex_buffer),
                index_buffer,
                vertex_array: Some(vertex_array),
                program: None,
                layout: mesh.layout,
                topology: mesh.topology,
                count: mesh.draw_count(),
                indexed: mesh.is_indexed(),
            }
        };

        let compiled = shader::link(shaders, mesh.layout)?;
        let program = backend
            .borrow_mut()
            .create_program(&compiled, mesh.layout, mesh.topology);
        drawable.program = Some(program);

        Ok(drawable)
    }

    #[inline]
    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Indices drawn for indexed meshes, vertices otherwise.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Records one draw: use program, upload uniforms, bind texture unit 0,
    /// bind vertex array, draw, unbind.
    pub fn draw(&self, uniforms: &[Uniform], texture: Option<TextureHandle>) {
        let (Some(program), Some(vertex_array)) = (self.program, self.vertex_array) else {
            return;
        };

        let mut b = self.backend.borrow_mut();
        b.record(Command::UseProgram(program));
        for u in uniforms {
            b.record(Command::SetUniform(*u));
        }
        if let Some(texture) = texture {
            b.record(Command::BindTexture { unit: 0, texture });
        }
        b.record(Command::BindVertexArray(vertex_array));
        if self.indexed {
            b.record(Command::DrawElements {
                topology: self.topology,
                count: self.count,
            });
        } else {
            b.record(Command::DrawArrays {
                topology: self.topology,
                first: 0,
                count: self.count,
            });
        }
        b.record(Command::UnbindVertexArray);
    }
}

impl Drop for Drawable {
    fn drop(&mut self) {
        let mut b = self.backend.borrow_mut();
        if let Some(vao) = self.vertex_array.take() {
            b.delete_vertex_array(vao);
        }
        if let Some(buffer) = self.vertex_buffer.take() {
            b.delete_buffer(buffer);
        }
        if let Some(buffer) = self.index_buffer.take() {
            b.delete_buffer(buffer);
        }
        if let Some(program) = self.program.take() {
            b.delete_program(program);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{self, Mesh};
    use crate::render::backend::RenderBackend;
    use crate::render::recording::RecordingBackend;
    use crate::render::texture::ImageRgba8;
    use crate::render::shader::BuiltinShader;
    use glam::Mat4;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn backend() -> (Rc<RefCell<RecordingBackend>>, BackendRef) {
        let rec = Rc::new(RefCell::new(RecordingBackend::new()));
        let backend: BackendRef = rec.clone();
        (rec, backend)
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn indexed_mesh_allocates_index_buffer() {
        let (rec, backend) = backend();
        let d = Drawable::new(&backend, &mesh::cube(), &BuiltinShader::Flat.source()).unwrap();

        assert!(d.is_indexed());
        assert_eq!(d.count(), 36);
        assert_eq!(rec.borrow().live_buffers(), 2);
        assert_eq!(rec.borrow().live_vertex_arrays(), 1);
        assert_eq!(rec.borrow().live_programs(), 1);
    }

    #[test]
    fn shader_failure_releases_uploaded_buffers() {
        let (rec, backend) = backend();
        let broken = ShaderSource::new("not wgsl", BuiltinShader::Flat.source().fragment);

        let result = Drawable::new(&backend, &mesh::cube(), &broken);

        assert!(matches!(result, Err(ShaderError::Compile { .. })));
        assert_eq!(rec.borrow().live_objects(), 0);
        assert!(rec.borrow().errors().is_empty());
    }

    #[test]
    fn layout_mismatch_is_a_link_error() {
        let (_rec, backend) = backend();
        let result = Drawable::new(&backend, &mesh::cube(), &BuiltinShader::Lit.source());
        assert!(matches!(result, Err(ShaderError::Link { .. })));
    }

    // ── draw ──────────────────────────────────────────────────────────────

    #[test]
    fn draw_records_bind_sequence() {
        let (rec, backend) = backend();
        let m = Mesh::from_points(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]], Topology::Lines);
        let d = Drawable::new(&backend, &m, &BuiltinShader::Flat.source()).unwrap();

        d.draw(&[Uniform::Mvp(Mat4::IDENTITY)], None);

        let rec = rec.borrow();
        let cmds = rec.commands();
        assert_eq!(cmds.len(), 5);
        assert!(matches!(cmds[0], Command::UseProgram(_)));
        assert_eq!(cmds[1], Command::SetUniform(Uniform::Mvp(Mat4::IDENTITY)));
        assert!(matches!(cmds[2], Command::BindVertexArray(_)));
        assert_eq!(
            cmds[3],
            Command::DrawArrays {
                topology: Topology::Lines,
                first: 0,
                count: 2
            }
        );
        assert_eq!(cmds[4], Command::UnbindVertexArray);
        assert!(rec.errors().is_empty());
    }

    #[test]
    fn textured_draw_binds_unit_zero_before_vertex_array() {
        let (rec, backend) = backend();
        let d = Drawable::new(&backend, &mesh::textured_cube(), &BuiltinShader::Textured.source()).unwrap();
        let tex = rec.borrow_mut().create_texture(&ImageRgba8::white());

        d.draw(&[], Some(tex));

        let rec = rec.borrow();
        let cmds = rec.commands();
        assert_eq!(cmds[1], Command::BindTexture { unit: 0, texture: tex });
        assert!(matches!(cmds[2], Command::BindVertexArray(_)));
        assert!(rec.errors().is_empty());
    }

    // ── teardown ──────────────────────────────────────────────────────────

    #[test]
    fn drop_releases_every_handle_once() {
        let (rec, backend) = backend();
        let d = Drawable::new(&backend, &mesh::textured_cube(), &BuiltinShader::Textured.source()).unwrap();
        assert_eq!(rec.borrow().live_objects(), 4);

        drop(d);

        assert_eq!(rec.borrow().live_objects(), 0);
        assert!(rec.borrow().errors().is_empty());
    }
}
