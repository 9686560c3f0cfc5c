//! Rendering abstraction.
//!
//! Shapes talk to a [`RenderBackend`] through handles and recorded commands.
//! [`RecordingBackend`] keeps the command log in memory; [`WgpuBackend`]
//! executes it as one render pass per frame.
//!
//! Conventions:
//! - vertex data is interleaved `f32`, described by a [`VertexLayout`]
//! - all pipelines share the [`ShapeUniforms`] block at group 0
//! - textured pipelines sample group 1 (texture + sampler)

mod backend;
mod drawable;
mod layout;
mod recording;
pub mod shader;
mod texture;
mod topology;
mod uniforms;
mod wgpu_backend;

pub use backend::{
    BackendRef, BufferHandle, BufferKind, Command, HandleIds, ProgramHandle, RenderBackend, TextureHandle,
    VertexArrayDesc, VertexArrayHandle,
};
pub use drawable::Drawable;
pub use layout::{Attribute, VertexLayout};
pub use recording::RecordingBackend;
pub use shader::{BuiltinShader, CompiledProgram, ShaderError, ShaderSource, ShaderStage};
pub use texture::{ImageCrateDecoder, ImageDecoder, ImageRgba8, TextureCache, TextureLoadError};
pub use topology::{lowered_indices, Topology};
pub use uniforms::{ShapeUniforms, Uniform};
pub use wgpu_backend::{WgpuBackend, DEPTH_FORMAT};
