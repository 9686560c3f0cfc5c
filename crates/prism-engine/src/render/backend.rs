use std::cell::RefCell;
use std::rc::Rc;

use crate::coords::ColorRgba;

use super::layout::VertexLayout;
use super::shader::CompiledProgram;
use super::texture::ImageRgba8;
use super::topology::Topology;
use super::uniforms::Uniform;

/// Shared, single-threaded handle to the active backend.
///
/// Shapes keep a clone so they can release their GPU objects on drop. Borrows
/// must stay scoped to one call.
pub type BackendRef = Rc<RefCell<dyn RenderBackend>>;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn from_raw(id: u32) -> Self {
                Self(id)
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }
    };
}

handle!(
    /// GPU buffer (vertex or index data).
    BufferHandle
);
handle!(
    /// Vertex buffer + optional index buffer + attribute layout.
    VertexArrayHandle
);
handle!(
    /// Linked shader program specialised for one layout and topology.
    ProgramHandle
);
handle!(
    /// RGBA8 2D texture.
    TextureHandle
);

/// Monotonic handle id source. Ids are never reused, so a stale handle can
/// not alias a newer object.
#[derive(Debug, Default)]
pub struct HandleIds {
    next: u32,
}

impl HandleIds {
    pub fn next(&mut self) -> u32 {
        self.next += 1;
        self.next
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferKind {
    Vertex,
    /// `u32` indices.
    Index,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexArrayDesc {
    pub vertex_buffer: BufferHandle,
    pub index_buffer: Option<BufferHandle>,
    pub layout: VertexLayout,
}

/// Per-frame state command.
///
/// Binding state is explicit: a draw uses whatever program, uniforms,
/// texture and vertex array were last recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Physical-pixel viewport.
    Viewport { width: u32, height: u32 },
    /// Clears color and depth.
    Clear(ColorRgba),
    UseProgram(ProgramHandle),
    SetUniform(Uniform),
    BindTexture { unit: u32, texture: TextureHandle },
    BindVertexArray(VertexArrayHandle),
    DrawArrays { topology: Topology, first: u32, count: u32 },
    DrawElements { topology: Topology, count: u32 },
    UnbindVertexArray,
}

/// GPU command surface used by drawables.
///
/// Creation returns an opaque handle; every handle is released with the
/// matching `delete_*` call exactly once.
pub trait RenderBackend {
    fn create_buffer(&mut self, kind: BufferKind, data: &[u8]) -> BufferHandle;
    fn delete_buffer(&mut self, buffer: BufferHandle);

    fn create_vertex_array(&mut self, desc: &VertexArrayDesc) -> VertexArrayHandle;
    fn delete_vertex_array(&mut self, vao: VertexArrayHandle);

    /// Builds a pipeline for an already compiled and linked program.
    fn create_program(
        &mut self,
        program: &CompiledProgram,
        layout: VertexLayout,
        topology: Topology,
    ) -> ProgramHandle;
    fn delete_program(&mut self, program: ProgramHandle);

    fn create_texture(&mut self, image: &ImageRgba8) -> TextureHandle;
    fn delete_texture(&mut self, texture: TextureHandle);

    fn record(&mut self, command: Command);
}
