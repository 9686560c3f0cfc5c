use std::collections::HashMap;

use wgpu::util::DeviceExt;

use crate::coords::ColorRgba;
use crate::device::{Gpu, GpuFrame};

use super::backend::{
    BufferHandle, BufferKind, Command, HandleIds, ProgramHandle, RenderBackend, TextureHandle,
    VertexArrayDesc, VertexArrayHandle,
};
use super::layout::VertexLayout;
use super::shader::{CompiledProgram, FRAGMENT_ENTRY, VERTEX_ENTRY};
use super::texture::ImageRgba8;
use super::topology::{lowered_indices, Topology};
use super::uniforms::ShapeUniforms;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

struct ProgramEntry {
    pipeline: wgpu::RenderPipeline,
    topology: Topology,
    uses_texture: bool,
}

struct TextureEntry {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

#[derive(Debug, Copy, Clone)]
enum DrawKind {
    Arrays { first: u32, count: u32 },
    Elements { count: u32 },
    /// Non-native topology drawn through a generated index list.
    Lowered { first: u32, key: (Topology, u32) },
}

/// Everything a draw needs, captured when the draw is recorded.
#[derive(Debug, Copy, Clone)]
struct PendingDraw {
    program: ProgramHandle,
    texture: Option<TextureHandle>,
    vertex_array: VertexArrayDesc,
    kind: DrawKind,
    uniforms: ShapeUniforms,
}

/// Shadow of the bind points a draw snapshots.
#[derive(Debug, Copy, Clone, Default)]
struct Bindings {
    program: Option<ProgramHandle>,
    uniforms: ShapeUniforms,
    texture: Option<TextureHandle>,
    vertex_array: Option<VertexArrayHandle>,
}

impl Bindings {
    /// Resets uniforms and the texture: a textured draw with nothing bound
    /// samples the white fallback, never the previous program's texture.
    fn use_program(&mut self, program: ProgramHandle) {
        self.program = Some(program);
        self.uniforms = ShapeUniforms::default();
        self.texture = None;
    }

    fn forget_program(&mut self, program: ProgramHandle) {
        if self.program == Some(program) {
            self.program = None;
        }
    }

    fn forget_texture(&mut self, texture: TextureHandle) {
        if self.texture == Some(texture) {
            self.texture = None;
        }
    }

    fn forget_vertex_array(&mut self, vao: VertexArrayHandle) {
        if self.vertex_array == Some(vao) {
            self.vertex_array = None;
        }
    }
}

/// wgpu implementation of [`RenderBackend`].
///
/// Commands update a shadow of the bound state; each draw snapshots it.
/// [`end_frame`](Self::end_frame) uploads all per-draw uniforms into one
/// dynamic-offset buffer and encodes a single render pass with a depth
/// attachment.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_format: wgpu::TextureFormat,

    ids: HandleIds,
    buffers: HashMap<BufferHandle, wgpu::Buffer>,
    vertex_arrays: HashMap<VertexArrayHandle, VertexArrayDesc>,
    programs: HashMap<ProgramHandle, ProgramEntry>,
    textures: HashMap<TextureHandle, TextureEntry>,

    uniform_bgl: wgpu::BindGroupLayout,
    texture_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    fallback: TextureEntry,

    uniform_stride: u64,
    uniform_capacity: usize,
    uniform_buffer: Option<wgpu::Buffer>,
    uniform_bind_group: Option<wgpu::BindGroup>,

    lowered: HashMap<(Topology, u32), (wgpu::Buffer, u32)>,
    depth: Option<(wgpu::Texture, wgpu::TextureView, (u32, u32))>,

    // shadow state
    viewport: (u32, u32),
    clear: ColorRgba,
    bound: Bindings,
    pending: Vec<PendingDraw>,

    warned_indexed_lowering: bool,
}

impl WgpuBackend {
    /// Pipelines target `gpu`'s surface format.
    pub fn new(gpu: &Gpu<'_>) -> Self {
        let device = gpu.device().clone();
        let queue = gpu.queue().clone();
        let surface_format = gpu.surface_format();
        let size = gpu.size();

        let uniform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism uniforms bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(ShapeUniforms::SIZE),
                },
                count: None,
            }],
        });

        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("prism texture sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        });

        let fallback = upload_texture(&device, &queue, &texture_bgl, &sampler, &ImageRgba8::white());

        let align = device.limits().min_uniform_buffer_offset_alignment as u64;
        let uniform_stride = ShapeUniforms::SIZE.div_ceil(align) * align;

        log::info!("wgpu backend ready (surface format {surface_format:?})");

        Self {
            device,
            queue,
            surface_format,
            ids: HandleIds::default(),
            buffers: HashMap::new(),
            vertex_arrays: HashMap::new(),
            programs: HashMap::new(),
            textures: HashMap::new(),
            uniform_bgl,
            texture_bgl,
            sampler,
            fallback,
            uniform_stride,
            uniform_capacity: 0,
            uniform_buffer: None,
            uniform_bind_group: None,
            lowered: HashMap::new(),
            depth: None,
            viewport: (size.width.max(1), size.height.max(1)),
            clear: ColorRgba::black(),
            bound: Bindings::default(),
            pending: Vec::new(),
            warned_indexed_lowering: false,
        }
    }

    /// Number of draws recorded since the last [`end_frame`](Self::end_frame).
    pub fn pending_draws(&self) -> usize {
        self.pending.len()
    }

    /// Encodes the recorded frame into `frame`'s encoder: clear, then every
    /// draw in record order. Bound state is reset afterwards.
    pub fn end_frame(&mut self, frame: &mut GpuFrame) {
        let (width, height) = self.viewport;
        self.ensure_depth(width, height);
        self.ensure_uniform_capacity(self.pending.len());
        self.ensure_lowered_indices();
        self.write_uniforms();

        let Some((_, depth_view, _)) = self.depth.as_ref() else { return };

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("prism frame pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear.into()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_viewport(0.0, 0.0, width as f32, height as f32, 0.0, 1.0);

        if let Some(uniform_bg) = self.uniform_bind_group.as_ref() {
            for (i, draw) in self.pending.iter().enumerate() {
                let Some(program) = self.programs.get(&draw.program) else { continue };
                let Some(vb) = self.buffers.get(&draw.vertex_array.vertex_buffer) else { continue };

                rpass.set_pipeline(&program.pipeline);
                let offset = (i as u64 * self.uniform_stride) as u32;
                rpass.set_bind_group(0, uniform_bg, &[offset]);
                if program.uses_texture {
                    let tex = draw
                        .texture
                        .and_then(|t| self.textures.get(&t))
                        .unwrap_or(&self.fallback);
                    rpass.set_bind_group(1, &tex.bind_group, &[]);
                }
                rpass.set_vertex_buffer(0, vb.slice(..));

                match draw.kind {
                    DrawKind::Arrays { first, count } => rpass.draw(first..first + count, 0..1),
                    DrawKind::Elements { count } => {
                        let Some(ib) = draw.vertex_array.index_buffer.and_then(|h| self.buffers.get(&h))
                        else {
                            continue;
                        };
                        rpass.set_index_buffer(ib.slice(..), wgpu::IndexFormat::Uint32);
                        rpass.draw_indexed(0..count, 0, 0..1);
                    }
                    DrawKind::Lowered { first, key } => {
                        let Some((ib, count)) = self.lowered.get(&key) else { continue };
                        if *count == 0 {
                            continue;
                        }
                        rpass.set_index_buffer(ib.slice(..), wgpu::IndexFormat::Uint32);
                        rpass.draw_indexed(0..*count, first as i32, 0..1);
                    }
                }
            }
        }

        drop(rpass);
        self.pending.clear();
        self.bound = Bindings::default();
    }

    fn push_draw(&mut self, topology: Topology, kind: DrawKind) {
        let (Some(program), Some(vao)) = (self.bound.program, self.bound.vertex_array) else {
            log::debug!("draw skipped: no program or vertex array bound");
            return;
        };
        let Some(vertex_array) = self.vertex_arrays.get(&vao).copied() else { return };

        if let Some(entry) = self.programs.get(&program) {
            if entry.topology != topology {
                log::debug!("draw topology {topology:?} differs from program topology {:?}", entry.topology);
            }
        }

        let kind = match kind {
            DrawKind::Arrays { first, count } if !topology.is_native() => DrawKind::Lowered {
                first,
                key: (topology, count),
            },
            DrawKind::Elements { .. } if !topology.is_native() => {
                if !self.warned_indexed_lowering {
                    log::warn!("indexed {topology:?} draws are not supported; skipped");
                    self.warned_indexed_lowering = true;
                }
                return;
            }
            other => other,
        };

        self.pending.push(PendingDraw {
            program,
            texture: self.bound.texture,
            vertex_array,
            kind,
            uniforms: self.bound.uniforms,
        });
    }

    fn ensure_depth(&mut self, width: u32, height: u32) {
        if let Some((_, _, size)) = &self.depth {
            if *size == (width, height) {
                return;
            }
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("prism depth"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.depth = Some((texture, view, (width, height)));
    }

    fn ensure_uniform_capacity(&mut self, required_draws: usize) {
        if required_draws <= self.uniform_capacity && self.uniform_buffer.is_some() {
            return;
        }

        let new_cap = required_draws.next_power_of_two().max(64);
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("prism uniform arena"),
            size: new_cap as u64 * self.uniform_stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism uniform bind group"),
            layout: &self.uniform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(ShapeUniforms::SIZE),
                }),
            }],
        });

        self.uniform_buffer = Some(buffer);
        self.uniform_bind_group = Some(bind_group);
        self.uniform_capacity = new_cap;
    }

    fn ensure_lowered_indices(&mut self) {
        for draw in &self.pending {
            let DrawKind::Lowered { key, .. } = draw.kind else { continue };
            if self.lowered.contains_key(&key) {
                continue;
            }
            let indices = lowered_indices(key.0, key.1).unwrap_or_default();
            // wgpu rejects zero-sized buffers; an empty list still needs one slot.
            let contents: &[u32] = if indices.is_empty() { &[0] } else { &indices };
            let buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("prism lowered indices"),
                contents: bytemuck::cast_slice(contents),
                usage: wgpu::BufferUsages::INDEX,
            });
            self.lowered.insert(key, (buffer, indices.len() as u32));
        }
    }

    fn write_uniforms(&mut self) {
        let Some(buffer) = self.uniform_buffer.as_ref() else { return };
        if self.pending.is_empty() {
            return;
        }

        let stride = self.uniform_stride as usize;
        let mut bytes = vec![0u8; self.pending.len() * stride];
        for (i, draw) in self.pending.iter().enumerate() {
            let start = i * stride;
            bytes[start..start + ShapeUniforms::SIZE as usize].copy_from_slice(bytemuck::bytes_of(&draw.uniforms));
        }
        self.queue.write_buffer(buffer, 0, &bytes);
    }
}

impl RenderBackend for WgpuBackend {
    fn create_buffer(&mut self, kind: BufferKind, data: &[u8]) -> BufferHandle {
        let usage = match kind {
            BufferKind::Vertex => wgpu::BufferUsages::VERTEX,
            BufferKind::Index => wgpu::BufferUsages::INDEX,
        };
        // Zero-sized buffers are invalid; pad to one u32.
        let contents: &[u8] = if data.is_empty() { &[0; 4] } else { data };
        let buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism mesh buffer"),
            contents,
            usage,
        });
        let handle = BufferHandle::from_raw(self.ids.next());
        self.buffers.insert(handle, buffer);
        handle
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        if let Some(b) = self.buffers.remove(&buffer) {
            b.destroy();
        }
    }

    fn create_vertex_array(&mut self, desc: &VertexArrayDesc) -> VertexArrayHandle {
        let handle = VertexArrayHandle::from_raw(self.ids.next());
        self.vertex_arrays.insert(handle, *desc);
        handle
    }

    fn delete_vertex_array(&mut self, vao: VertexArrayHandle) {
        self.vertex_arrays.remove(&vao);
        self.bound.forget_vertex_array(vao);
    }

    fn create_program(
        &mut self,
        program: &CompiledProgram,
        layout: VertexLayout,
        topology: Topology,
    ) -> ProgramHandle {
        let vs = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("prism vertex shader"),
            source: wgpu::ShaderSource::Wgsl(program.vertex.source.clone()),
        });
        let fs = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("prism fragment shader"),
            source: wgpu::ShaderSource::Wgsl(program.fragment.source.clone()),
        });

        let pipeline_layout = if program.uses_texture {
            self.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("prism textured pipeline layout"),
                bind_group_layouts: &[&self.uniform_bgl, &self.texture_bgl],
                immediate_size: 0,
            })
        } else {
            self.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("prism pipeline layout"),
                bind_group_layouts: &[&self.uniform_bgl],
                immediate_size: 0,
            })
        };

        let attributes = vertex_attributes(layout);
        let lowered = topology.lowered();

        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("prism pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: layout.stride_bytes(),
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &attributes,
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: primitive_topology(lowered),
                strip_index_format: match lowered {
                    Topology::LineStrip | Topology::TriangleStrip => Some(wgpu::IndexFormat::Uint32),
                    _ => None,
                },
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let handle = ProgramHandle::from_raw(self.ids.next());
        self.programs.insert(
            handle,
            ProgramEntry {
                pipeline,
                topology,
                uses_texture: program.uses_texture,
            },
        );
        handle
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.programs.remove(&program);
        self.bound.forget_program(program);
    }

    fn create_texture(&mut self, image: &ImageRgba8) -> TextureHandle {
        let entry = upload_texture(&self.device, &self.queue, &self.texture_bgl, &self.sampler, image);
        let handle = TextureHandle::from_raw(self.ids.next());
        self.textures.insert(handle, entry);
        handle
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        if let Some(entry) = self.textures.remove(&texture) {
            entry.texture.destroy();
        }
        self.bound.forget_texture(texture);
    }

    fn record(&mut self, command: Command) {
        match command {
            Command::Viewport { width, height } => self.viewport = (width.max(1), height.max(1)),
            Command::Clear(color) => self.clear = color,
            Command::UseProgram(p) => self.bound.use_program(p),
            Command::SetUniform(u) => self.bound.uniforms.apply(u),
            // Only unit 0 is sampled by the built-in pipelines.
            Command::BindTexture { unit: 0, texture } => self.bound.texture = Some(texture),
            Command::BindTexture { unit, .. } => log::debug!("texture unit {unit} ignored"),
            Command::BindVertexArray(v) => self.bound.vertex_array = Some(v),
            Command::UnbindVertexArray => self.bound.vertex_array = None,
            Command::DrawArrays { topology, first, count } => {
                self.push_draw(topology, DrawKind::Arrays { first, count });
            }
            Command::DrawElements { topology, count } => {
                self.push_draw(topology, DrawKind::Elements { count });
            }
        }
    }
}

fn primitive_topology(t: Topology) -> wgpu::PrimitiveTopology {
    match t {
        Topology::Points => wgpu::PrimitiveTopology::PointList,
        Topology::Lines => wgpu::PrimitiveTopology::LineList,
        Topology::LineStrip | Topology::LineLoop => wgpu::PrimitiveTopology::LineStrip,
        Topology::Triangles | Topology::TriangleFan => wgpu::PrimitiveTopology::TriangleList,
        Topology::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
    }
}

fn vertex_attributes(layout: VertexLayout) -> Vec<wgpu::VertexAttribute> {
    layout
        .attributes()
        .iter()
        .map(|a| wgpu::VertexAttribute {
            format: match a.components {
                1 => wgpu::VertexFormat::Float32,
                2 => wgpu::VertexFormat::Float32x2,
                3 => wgpu::VertexFormat::Float32x3,
                _ => wgpu::VertexFormat::Float32x4,
            },
            offset: a.byte_offset(),
            shader_location: a.location,
        })
        .collect()
}

fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    image: &ImageRgba8,
) -> TextureEntry {
    let size = wgpu::Extent3d {
        width: image.width.max(1),
        height: image.height.max(1),
        depth_or_array_layers: 1,
    };
    let mip_level_count = image.mip_level_count();
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("prism texture"),
        size,
        mip_level_count,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    // Level 0 is the image itself; each further level halves the previous.
    let mut level = image.clone();
    for mip_level in 0..mip_level_count {
        if mip_level > 0 {
            level = level.downsample();
        }
        let level_size = wgpu::Extent3d {
            width: level.width.max(1),
            height: level.height.max(1),
            depth_or_array_layers: 1,
        };
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &level.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * level_size.width),
                rows_per_image: Some(level_size.height),
            },
            level_size,
        );
    }

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("prism texture bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });

    TextureEntry {
        texture,
        bind_group,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Uniform;
    use glam::Vec3;

    #[test]
    fn lowered_topologies_map_to_native_pipelines() {
        assert_eq!(primitive_topology(Topology::LineLoop.lowered()), wgpu::PrimitiveTopology::LineStrip);
        assert_eq!(primitive_topology(Topology::TriangleFan.lowered()), wgpu::PrimitiveTopology::TriangleList);
    }

    #[test]
    fn attribute_formats_follow_layout() {
        let attrs = vertex_attributes(VertexLayout::PositionNormalUv);
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(attrs[2].format, wgpu::VertexFormat::Float32x2);
        assert_eq!(attrs[2].offset, 24);
        assert_eq!(attrs[2].shader_location, 2);
    }

    #[test]
    fn switching_programs_drops_the_previous_texture() {
        let mut bound = Bindings::default();
        let vao = VertexArrayHandle::from_raw(3);
        bound.vertex_array = Some(vao);

        bound.use_program(ProgramHandle::from_raw(1));
        bound.texture = Some(TextureHandle::from_raw(2));
        bound.uniforms.apply(Uniform::ObjectColor(Vec3::new(1.0, 0.0, 0.0)));

        bound.use_program(ProgramHandle::from_raw(4));

        assert_eq!(bound.program, Some(ProgramHandle::from_raw(4)));
        assert_eq!(bound.texture, None);
        assert_eq!(bound.uniforms, ShapeUniforms::default());
        assert_eq!(bound.vertex_array, Some(vao));
    }

    #[test]
    fn deleting_a_bound_handle_unbinds_it() {
        let mut bound = Bindings::default();
        bound.use_program(ProgramHandle::from_raw(1));
        bound.texture = Some(TextureHandle::from_raw(2));

        bound.forget_texture(TextureHandle::from_raw(9));
        assert_eq!(bound.texture, Some(TextureHandle::from_raw(2)));

        bound.forget_texture(TextureHandle::from_raw(2));
        bound.forget_program(ProgramHandle::from_raw(1));
        assert_eq!(bound.texture, None);
        assert_eq!(bound.program, None);
    }
}
