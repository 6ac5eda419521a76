use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::coords::{rect_mvp, ColorRgb, Rect};
use crate::render::shader::{validate_wgsl, ShaderStage};
use crate::render::{RenderCtx, RenderTarget};

const SHADER_SRC: &str = include_str!("shaders/rect.wgsl");
const SHADER_ENTRIES: [(&str, ShaderStage); 2] = [
    ("vs_main", ShaderStage::Vertex),
    ("fs_main", ShaderStage::Fragment),
];

/// Uniform slots allocated up front; enough for a frame of doors.
const INITIAL_SLOTS: u64 = 8;

const UNIFORM_SIZE: u64 = std::mem::size_of::<RectUniform>() as u64;

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Unit quad as two triangles, drawn without an index buffer.
const QUAD_VERTICES: [QuadVertex; 6] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

// ── per-draw uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RectUniform {
    mvp: [[f32; 4]; 4], // column-major
    color: [f32; 4],
}

/// Ring of per-draw uniform slots addressed by dynamic offset.
///
/// Every draw in a frame needs its own slot: queued buffer writes all land
/// before the frame's commands execute, so reusing one slot would give every
/// draw the last written MVP.
struct UniformSlots {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    stride: u64,
    capacity: u64,
    next: u64,
}

impl UniformSlots {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        capacity: u64,
    ) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vampire rect uniform slots"),
            size: stride * capacity,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vampire rect bind group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(UNIFORM_SIZE),
                }),
            }],
        });

        Self {
            buffer,
            bind_group,
            stride,
            capacity,
            next: 0,
        }
    }

    /// Returns the byte offset of a fresh slot, growing the buffer if the
    /// frame has used them all.
    ///
    /// Draws already recorded keep referencing the previous buffer, which
    /// wgpu keeps alive until their commands retire.
    fn acquire(&mut self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> u64 {
        if self.next >= self.capacity {
            let capacity = grown_capacity(self.capacity, self.next + 1);
            log::debug!("rect uniform slots: {} -> {capacity}", self.capacity);

            let next = self.next;
            *self = Self::new(device, layout, self.stride, capacity);
            self.next = next;
        }

        let offset = self.next * self.stride;
        self.next += 1;
        offset
    }
}

/// Solid-color rectangle renderer.
///
/// Owns one unit-quad vertex buffer and one pipeline whose shader takes a
/// combined MVP matrix and a color. All GPU objects are released together
/// when the renderer is dropped.
pub struct RectRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    quad_vbo: wgpu::Buffer,
    uniforms: UniformSlots,
}

impl RectRenderer {
    /// Compiles the rect shader and builds the pipeline for `surface_format`.
    ///
    /// Fails with the compiler diagnostic if the shader does not compile or
    /// its entry points do not link.
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Result<Self> {
        validate_wgsl("rect shader", SHADER_SRC, &SHADER_ENTRIES)?;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("vampire rect shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SRC.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("vampire rect bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(UNIFORM_SIZE),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("vampire rect pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("vampire rect pipeline"),
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
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

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

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("vampire rect quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = align_up(UNIFORM_SIZE, alignment);
        let uniforms = UniformSlots::new(device, &bind_group_layout, stride, INITIAL_SLOTS);

        log::info!("rect renderer ready ({surface_format:?}, uniform stride {stride})");

        Ok(Self {
            pipeline,
            bind_group_layout,
            quad_vbo,
            uniforms,
        })
    }

    /// Starts a new frame; uniform slots from the previous frame are reused.
    pub fn begin_frame(&mut self) {
        self.uniforms.next = 0;
    }

    /// Draws `rect` filled with `color`, transformed by `projection`.
    ///
    /// model = translate(x, y) · scale(w, h); mvp = projection · model.
    /// Each call records its own render pass that loads the existing target
    /// contents, so draws composite in call order.
    pub fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        rect: Rect,
        color: ColorRgb,
        projection: &Mat4,
    ) {
        if rect.normalized().is_empty() {
            return;
        }

        let offset = self.uniforms.acquire(ctx.device, &self.bind_group_layout);
        let uniform = RectUniform {
            mvp: rect_mvp(rect, projection).to_cols_array_2d(),
            color: color.to_rgba_array(),
        };
        ctx.queue
            .write_buffer(&self.uniforms.buffer, offset, bytemuck::bytes_of(&uniform));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("vampire rect pass"),
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

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.uniforms.bind_group, &[offset as wgpu::DynamicOffset]);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.draw(0..QUAD_VERTICES.len() as u32, 0..1);
    }
}

#[inline]
fn align_up(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

/// Doubles `current` until it holds `required` slots.
#[inline]
fn grown_capacity(current: u64, required: u64) -> u64 {
    let mut cap = current.max(1);
    while cap < required {
        cap *= 2;
    }
    cap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_matches_wgsl_layout() {
        // mat4x4<f32> + vec4<f32>
        assert_eq!(UNIFORM_SIZE, 80);
    }

    #[test]
    fn stride_respects_offset_alignment() {
        assert_eq!(align_up(UNIFORM_SIZE, 256), 256);
        assert_eq!(align_up(UNIFORM_SIZE, 64), 128);
        assert_eq!(align_up(UNIFORM_SIZE, 16), 80);
        assert_eq!(align_up(UNIFORM_SIZE, 0), 80);
    }

    #[test]
    fn capacity_doubles_until_it_fits() {
        assert_eq!(grown_capacity(8, 9), 16);
        assert_eq!(grown_capacity(8, 40), 64);
        assert_eq!(grown_capacity(0, 1), 1);
    }

    #[test]
    fn quad_spans_unit_square_with_two_triangles() {
        assert_eq!(QUAD_VERTICES.len(), 6);
        for v in QUAD_VERTICES {
            assert!(v.pos.iter().all(|c| *c == 0.0 || *c == 1.0));
        }
        let corners = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        for c in corners {
            assert!(QUAD_VERTICES.iter().any(|v| v.pos == c), "missing corner {c:?}");
        }
    }
}
