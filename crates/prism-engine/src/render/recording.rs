use std::collections::HashMap;

use super::backend::{
    BufferHandle, BufferKind, Command, HandleIds, ProgramHandle, RenderBackend, TextureHandle,
    VertexArrayDesc, VertexArrayHandle,
};
use super::layout::VertexLayout;
use super::shader::CompiledProgram;
use super::texture::ImageRgba8;
use super::topology::Topology;

#[derive(Debug, Copy, Clone)]
struct ProgramInfo {
    layout: VertexLayout,
    topology: Topology,
}

/// In-memory backend: keeps a command log and validates handle usage.
///
/// Used for tests and headless runs. Misuse (unknown or double-deleted
/// handles, draws without bound state, out-of-range counts) is collected in
/// [`errors`](Self::errors) instead of panicking.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    ids: HandleIds,
    commands: Vec<Command>,
    errors: Vec<String>,

    buffers: HashMap<BufferHandle, (BufferKind, usize)>,
    vertex_arrays: HashMap<VertexArrayHandle, VertexArrayDesc>,
    programs: HashMap<ProgramHandle, ProgramInfo>,
    textures: HashMap<TextureHandle, (u32, u32)>,

    bound_program: Option<ProgramHandle>,
    bound_vertex_array: Option<VertexArrayHandle>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Drains the command log; live objects and bound state are kept.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Draw commands only, in order.
    pub fn draws(&self) -> impl Iterator<Item = &Command> {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::DrawArrays { .. } | Command::DrawElements { .. }))
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub fn live_vertex_arrays(&self) -> usize {
        self.vertex_arrays.len()
    }

    pub fn live_programs(&self) -> usize {
        self.programs.len()
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn live_objects(&self) -> usize {
        self.live_buffers() + self.live_vertex_arrays() + self.live_programs() + self.live_textures()
    }

    fn error(&mut self, msg: String) {
        log::debug!("recording backend: {msg}");
        self.errors.push(msg);
    }

    fn check_draw(&mut self, topology: Topology, vertices: Option<(u32, u32)>, indices: Option<u32>) {
        let Some(program) = self.bound_program else {
            return self.error("draw without a program".into());
        };
        let Some(vao) = self.bound_vertex_array else {
            return self.error("draw without a vertex array".into());
        };
        let (Some(info), Some(desc)) = (self.programs.get(&program).copied(), self.vertex_arrays.get(&vao).copied())
        else {
            return self.error("draw with deleted state".into());
        };

        if info.layout != desc.layout {
            self.error(format!("program layout {:?} != vertex array layout {:?}", info.layout, desc.layout));
        }
        if info.topology != topology {
            self.error(format!("draw topology {topology:?} != program topology {:?}", info.topology));
        }

        if let Some((first, count)) = vertices {
            let available = self
                .buffers
                .get(&desc.vertex_buffer)
                .map_or(0, |&(_, bytes)| (bytes as u64 / desc.layout.stride_bytes()) as u32);
            if first + count > available {
                self.error(format!("draw of {first}+{count} vertices exceeds {available}"));
            }
        }

        if let Some(count) = indices {
            let available = desc
                .index_buffer
                .and_then(|ib| self.buffers.get(&ib))
                .map_or(0, |&(_, bytes)| (bytes / 4) as u32);
            if count > available {
                self.error(format!("indexed draw of {count} exceeds {available} indices"));
            }
        }
    }
}

impl RenderBackend for RecordingBackend {
    fn create_buffer(&mut self, kind: BufferKind, data: &[u8]) -> BufferHandle {
        let handle = BufferHandle::from_raw(self.ids.next());
        self.buffers.insert(handle, (kind, data.len()));
        handle
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        if self.buffers.remove(&buffer).is_none() {
            self.error(format!("delete of unknown buffer {buffer:?}"));
        }
    }

    fn create_vertex_array(&mut self, desc: &VertexArrayDesc) -> VertexArrayHandle {
        if !self.buffers.contains_key(&desc.vertex_buffer) {
            self.error(format!("vertex array over unknown buffer {:?}", desc.vertex_buffer));
        }
        let handle = VertexArrayHandle::from_raw(self.ids.next());
        self.vertex_arrays.insert(handle, *desc);
        handle
    }

    fn delete_vertex_array(&mut self, vao: VertexArrayHandle) {
        if self.vertex_arrays.remove(&vao).is_none() {
            self.error(format!("delete of unknown vertex array {vao:?}"));
        }
        if self.bound_vertex_array == Some(vao) {
            self.bound_vertex_array = None;
        }
    }

    fn create_program(
        &mut self,
        program: &CompiledProgram,
        layout: VertexLayout,
        topology: Topology,
    ) -> ProgramHandle {
        if program.layout != layout {
            self.error(format!("program linked for {:?}, created for {layout:?}", program.layout));
        }
        let handle = ProgramHandle::from_raw(self.ids.next());
        self.programs.insert(handle, ProgramInfo { layout, topology });
        handle
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        if self.programs.remove(&program).is_none() {
            self.error(format!("delete of unknown program {program:?}"));
        }
        if self.bound_program == Some(program) {
            self.bound_program = None;
        }
    }

    fn create_texture(&mut self, image: &ImageRgba8) -> TextureHandle {
        let expected = image.width as usize * image.height as usize * 4;
        if image.pixels.len() != expected {
            self.error(format!("texture has {} bytes, expected {expected}", image.pixels.len()));
        }
        let handle = TextureHandle::from_raw(self.ids.next());
        self.textures.insert(handle, (image.width, image.height));
        handle
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        if self.textures.remove(&texture).is_none() {
            self.error(format!("delete of unknown texture {texture:?}"));
        }
    }

    fn record(&mut self, command: Command) {
        match &command {
            Command::UseProgram(p) => {
                if !self.programs.contains_key(p) {
                    self.error(format!("use of unknown program {p:?}"));
                }
                self.bound_program = Some(*p);
            }
            Command::BindVertexArray(v) => {
                if !self.vertex_arrays.contains_key(v) {
                    self.error(format!("bind of unknown vertex array {v:?}"));
                }
                self.bound_vertex_array = Some(*v);
            }
            Command::BindTexture { texture, .. } => {
                if !self.textures.contains_key(texture) {
                    self.error(format!("bind of unknown texture {texture:?}"));
                }
            }
            Command::UnbindVertexArray => self.bound_vertex_array = None,
            Command::DrawArrays { topology, first, count } => {
                self.check_draw(*topology, Some((*first, *count)), None);
            }
            Command::DrawElements { topology, count } => {
                self.check_draw(*topology, None, Some(*count));
            }
            Command::Viewport { .. } | Command::Clear(_) | Command::SetUniform(_) => {}
        }
        self.commands.push(command);
    }
}
