//! Shared GPU types and the pipeline plumbing used by both part renderers.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::geometry::JOINT_RADIUS_RATIO;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::shapes::arrowhead::ArrowheadCmd;
use crate::scene::shapes::shaft::ShaftCmd;

// ── blend ─────────────────────────────────────────────────────────────────

/// Opaque output. Shaft and arrowhead never cover the same pixel, so draw
/// order between them does not matter.
pub(super) fn replace_blend() -> wgpu::BlendState {
    wgpu::BlendState::REPLACE
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // x in -1..1 (across), y in 0..1 (along)
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const UNIT_QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [-1.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [-1.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── arrow uniform ─────────────────────────────────────────────────────────

/// Per-draw uniform block. Layout matches `struct Arrow` in `projector.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ArrowUniform {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub anchor: [f32; 3],
    pub shaft_pixel_width: f32,
    pub far: [f32; 3],
    pub shaft_pixel_offset: f32,
    pub color: [f32; 3],
    pub joint_radius_ratio: f32,
    pub resolution: [f32; 2],
    pub arrow_pixel_size: [f32; 2],
}

impl From<&ShaftCmd> for ArrowUniform {
    fn from(cmd: &ShaftCmd) -> Self {
        Self {
            view_proj: cmd.view_proj.to_cols_array_2d(),
            model: cmd.model.to_cols_array_2d(),
            anchor: cmd.anchor.to_array(),
            shaft_pixel_width: cmd.width,
            far: cmd.far.to_array(),
            shaft_pixel_offset: cmd.offset,
            color: cmd.color.to_array(),
            joint_radius_ratio: JOINT_RADIUS_RATIO,
            resolution: cmd.resolution.as_vec2().to_array(),
            arrow_pixel_size: cmd.arrow_size.to_array(),
        }
    }
}

impl From<&ArrowheadCmd> for ArrowUniform {
    fn from(cmd: &ArrowheadCmd) -> Self {
        Self {
            view_proj: cmd.view_proj.to_cols_array_2d(),
            model: cmd.model.to_cols_array_2d(),
            anchor: cmd.anchor.to_array(),
            shaft_pixel_width: 0.0,
            far: cmd.far.to_array(),
            shaft_pixel_offset: 0.0,
            color: cmd.color.to_array(),
            joint_radius_ratio: JOINT_RADIUS_RATIO,
            resolution: cmd.resolution.as_vec2().to_array(),
            arrow_pixel_size: cmd.size.to_array(),
        }
    }
}

/// Rounds `size` up to the next multiple of `alignment`.
#[inline]
pub(super) fn aligned_stride(size: u64, alignment: u64) -> u64 {
    size.div_ceil(alignment.max(1)) * alignment.max(1)
}

// ── pipeline ──────────────────────────────────────────────────────────────

/// One pipeline drawing unit quads, one uniform slot per draw.
///
/// Uniforms live in a single buffer addressed with dynamic offsets, so a frame
/// costs one upload regardless of how many arrows are visible.
pub(super) struct PartPipeline {
    name: &'static str,
    shader_src: &'static str,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    bind_group: Option<wgpu::BindGroup>,
    uniform_buffer: Option<wgpu::Buffer>,
    uniform_capacity: usize,
    uniform_stride: u64,
    staging: Vec<u8>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,
}

impl PartPipeline {
    pub(super) fn new(name: &'static str, shader_src: &'static str) -> Self {
        Self {
            name,
            shader_src,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            uniform_buffer: None,
            uniform_capacity: 0,
            uniform_stride: 0,
            staging: Vec::new(),
            quad_vbo: None,
            quad_ibo: None,
        }
    }

    /// Draws one quad per entry of `uniforms`, in order.
    pub(super) fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        uniforms: &[ArrowUniform],
    ) {
        if uniforms.is_empty() || !ctx.resolution.is_valid() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_uniform_capacity(ctx, uniforms.len());
        self.write_uniforms(ctx, uniforms);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };

        let label = format!("dimline {} pass", self.name);
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(&label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);

        for i in 0..uniforms.len() {
            let offset = (i as u64 * self.uniform_stride) as u32;
            rpass.set_bind_group(0, bind_group, &[offset]);
            rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let name = self.name;
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("dimline {name} shader")),
            source: wgpu::ShaderSource::Wgsl(self.shader_src.into()),
        });

        let bind_group_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("dimline {name} bgl")),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: NonZeroU64::new(std::mem::size_of::<ArrowUniform>() as u64),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(&format!("dimline {name} pipeline layout")),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("dimline {name} pipeline")),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(replace_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Quads may face either way after the pixel-space rebuild.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("{name} pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        // Old bind group refers to the previous layout.
        self.bind_group = None;
        self.uniform_buffer = None;
        self.uniform_capacity = 0;
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("dimline unit quad vbo"),
            contents: bytemuck::cast_slice(&UNIT_QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("dimline unit quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_uniform_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.uniform_capacity && self.uniform_buffer.is_some() && self.bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let alignment = ctx.device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = aligned_stride(std::mem::size_of::<ArrowUniform>() as u64, alignment);
        let new_cap = required.next_power_of_two().max(16);

        let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("dimline {} uniforms", self.name)),
            size: stride * new_cap as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("dimline {} bind group", self.name)),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: NonZeroU64::new(std::mem::size_of::<ArrowUniform>() as u64),
                }),
            }],
        });

        log::debug!("{} uniform ring grown to {new_cap} slots", self.name);

        self.uniform_stride = stride;
        self.uniform_capacity = new_cap;
        self.uniform_buffer = Some(buffer);
        self.bind_group = Some(bind_group);
    }

    fn write_uniforms(&mut self, ctx: &RenderCtx<'_>, uniforms: &[ArrowUniform]) {
        let Some(buffer) = self.uniform_buffer.as_ref() else { return };
        let stride = self.uniform_stride as usize;

        self.staging.clear();
        self.staging.resize(stride * uniforms.len(), 0);
        for (slot, u) in self.staging.chunks_exact_mut(stride).zip(uniforms) {
            let bytes = bytemuck::bytes_of(u);
            slot[..bytes.len()].copy_from_slice(bytes);
        }
        ctx.queue.write_buffer(buffer, 0, &self.staging);
    }
}

/// Parses and validates a part program, checking its `Arrow` block against
/// [`ArrowUniform`].
#[cfg(test)]
pub(super) fn validate_part_shader(src: &str) -> naga::Module {
    let module = naga::front::wgsl::parse_str(src)
        .unwrap_or_else(|e| panic!("{}", e.emit_to_string(src)));
    naga::valid::Validator::new(naga::valid::ValidationFlags::all(), naga::valid::Capabilities::default())
        .validate(&module)
        .unwrap_or_else(|e| panic!("invalid shader: {e:?}"));

    let arrow = module
        .types
        .iter()
        .find_map(|(_, ty)| (ty.name.as_deref() == Some("Arrow")).then_some(&ty.inner));
    let Some(naga::TypeInner::Struct { span, .. }) = arrow else {
        panic!("shader declares no Arrow struct");
    };
    assert_eq!(*span as usize, std::mem::size_of::<ArrowUniform>());

    for stage in ["vs_main", "fs_main"] {
        assert!(module.entry_points.iter().any(|e| e.name == stage), "missing {stage}");
    }
    module
}
