//! WGSL shader pairs: compile (parse + validate) and link (interface check).
//!
//! Compilation is done with naga up front, so shader errors surface as
//! [`ShaderError`] values with readable diagnostics instead of GPU validation
//! panics at pipeline creation.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::layout::VertexLayout;

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Bind group holding the diffuse texture and its sampler.
pub const TEXTURE_GROUP: u32 = 1;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }

    pub fn entry_point(self) -> &'static str {
        match self {
            ShaderStage::Vertex => VERTEX_ENTRY,
            ShaderStage::Fragment => FRAGMENT_ENTRY,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Shader construction failure. The log is the diagnostic text to show.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    Compile { stage: ShaderStage, log: String },
    Link { log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, log } => {
                write!(f, "{stage} shader failed to compile:\n{log}")
            }
            ShaderError::Link { log } => write!(f, "shader program failed to link: {log}"),
        }
    }
}

impl std::error::Error for ShaderError {}

// ── sources ───────────────────────────────────────────────────────────────

/// Vertex + fragment WGSL text.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl ShaderSource {
    pub fn new(vertex: impl Into<Cow<'static, str>>, fragment: impl Into<Cow<'static, str>>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Reads a pair from disk.
    pub fn load(vertex_path: impl AsRef<Path>, fragment_path: impl AsRef<Path>) -> Result<Self> {
        let vertex_path = vertex_path.as_ref();
        let fragment_path = fragment_path.as_ref();
        let vertex = std::fs::read_to_string(vertex_path)
            .with_context(|| format!("failed to read vertex shader {}", vertex_path.display()))?;
        let fragment = std::fs::read_to_string(fragment_path)
            .with_context(|| format!("failed to read fragment shader {}", fragment_path.display()))?;
        Ok(Self::new(vertex, fragment))
    }
}

/// Pipelines shipped with the engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BuiltinShader {
    /// Solid object color.
    Flat,
    /// Per-vertex Phong lighting.
    Lit,
    /// Light marker: always the light color.
    Lamp,
    /// Per-fragment lighting over a sampled texture.
    Textured,
}

impl BuiltinShader {
    pub fn source(self) -> ShaderSource {
        let (vertex, fragment) = match self {
            BuiltinShader::Flat => (
                concat!(include_str!("shaders/common.wgsl"), include_str!("shaders/flat.vert.wgsl")),
                concat!(include_str!("shaders/common.wgsl"), include_str!("shaders/flat.frag.wgsl")),
            ),
            BuiltinShader::Lit => (
                concat!(include_str!("shaders/common.wgsl"), include_str!("shaders/lit.vert.wgsl")),
                concat!(include_str!("shaders/common.wgsl"), include_str!("shaders/lit.frag.wgsl")),
            ),
            BuiltinShader::Lamp => (
                concat!(include_str!("shaders/common.wgsl"), include_str!("shaders/lamp.vert.wgsl")),
                concat!(include_str!("shaders/common.wgsl"), include_str!("shaders/lamp.frag.wgsl")),
            ),
            BuiltinShader::Textured => (
                concat!(
                    include_str!("shaders/common.wgsl"),
                    include_str!("shaders/textured.vert.wgsl")
                ),
                concat!(
                    include_str!("shaders/common.wgsl"),
                    include_str!("shaders/textured.frag.wgsl")
                ),
            ),
        };
        ShaderSource::new(vertex, fragment)
    }
}

// ── compile + link ────────────────────────────────────────────────────────

/// One validated stage.
#[derive(Debug)]
pub struct CompiledStage {
    pub stage: ShaderStage,
    pub source: Cow<'static, str>,
    module: naga::Module,
}

impl CompiledStage {
    pub fn module(&self) -> &naga::Module {
        &self.module
    }

    fn entry(&self) -> Option<&naga::EntryPoint> {
        self.module
            .entry_points
            .iter()
            .find(|ep| ep.stage == self.stage.naga() && ep.name == self.stage.entry_point())
    }

    fn uses_group(&self, group: u32) -> bool {
        self.module
            .global_variables
            .iter()
            .any(|(_, var)| var.binding.as_ref().is_some_and(|b| b.group == group))
    }
}

/// Linked vertex + fragment pair, ready for a backend to turn into a pipeline.
#[derive(Debug)]
pub struct CompiledProgram {
    pub vertex: CompiledStage,
    pub fragment: CompiledStage,
    pub layout: VertexLayout,
    /// Whether the program samples the diffuse texture group.
    pub uses_texture: bool,
}

/// Parses and validates one stage.
pub fn compile_stage(stage: ShaderStage, source: Cow<'static, str>) -> Result<CompiledStage, ShaderError> {
    let module = naga::front::wgsl::parse_str(&source).map_err(|e| ShaderError::Compile {
        stage,
        log: e.emit_to_string(&source),
    })?;

    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
    validator.validate(&module).map_err(|e| ShaderError::Compile {
        stage,
        log: e.emit_to_string(&source),
    })?;

    Ok(CompiledStage { stage, source, module })
}

/// Compiles both stages and checks that they fit together and match `layout`.
///
/// Linking requires:
/// - a `vs_main` vertex entry and an `fs_main` fragment entry
/// - every vertex `@location` input backed by a layout attribute of the same width
/// - every fragment `@location` input produced by the vertex stage
pub fn link(source: &ShaderSource, layout: VertexLayout) -> Result<CompiledProgram, ShaderError> {
    let vertex = compile_stage(ShaderStage::Vertex, source.vertex.clone())?;
    let fragment = compile_stage(ShaderStage::Fragment, source.fragment.clone())?;

    let vs = vertex.entry().ok_or_else(|| missing_entry(ShaderStage::Vertex))?;
    let fs = fragment.entry().ok_or_else(|| missing_entry(ShaderStage::Fragment))?;

    let mut vs_inputs = Vec::new();
    for arg in &vs.function.arguments {
        io_locations(vertex.module(), arg.ty, arg.binding.as_ref(), &mut vs_inputs);
    }
    for (location, width) in vs_inputs {
        match layout.attribute(location) {
            Some(a) if a.components == width => {}
            Some(a) => {
                return Err(ShaderError::Link {
                    log: format!(
                        "vertex input @location({location}) has {width} components, layout {layout:?} provides {}",
                        a.components
                    ),
                });
            }
            None => {
                return Err(ShaderError::Link {
                    log: format!("vertex input @location({location}) has no attribute in layout {layout:?}"),
                });
            }
        }
    }

    let mut vs_outputs = Vec::new();
    if let Some(result) = &vs.function.result {
        io_locations(vertex.module(), result.ty, result.binding.as_ref(), &mut vs_outputs);
    }
    let mut fs_inputs = Vec::new();
    for arg in &fs.function.arguments {
        io_locations(fragment.module(), arg.ty, arg.binding.as_ref(), &mut fs_inputs);
    }
    for (location, width) in fs_inputs {
        if !vs_outputs.contains(&(location, width)) {
            return Err(ShaderError::Link {
                log: format!("fragment input @location({location}) is not written by the vertex stage"),
            });
        }
    }

    let uses_texture = vertex.uses_group(TEXTURE_GROUP) || fragment.uses_group(TEXTURE_GROUP);

    Ok(CompiledProgram {
        vertex,
        fragment,
        layout,
        uses_texture,
    })
}

fn missing_entry(stage: ShaderStage) -> ShaderError {
    ShaderError::Link {
        log: format!("missing {stage} entry point `{}`", stage.entry_point()),
    }
}

/// Collects `(location, component count)` for a stage interface value,
/// flattening struct members. Built-ins are skipped.
fn io_locations(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<(u32, u32)>,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => {
            out.push((*location, component_count(&module.types[ty].inner)));
        }
        Some(_) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for m in members {
                    io_locations(module, m.ty, m.binding.as_ref(), out);
                }
            }
        }
    }
}

fn component_count(inner: &naga::TypeInner) -> u32 {
    match inner {
        naga::TypeInner::Scalar(_) => 1,
        naga::TypeInner::Vector { size, .. } => *size as u32,
        _ => 0,
    }
}
