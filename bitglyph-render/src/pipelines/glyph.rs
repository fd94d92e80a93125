//! Glyph render pipeline: bufferless procedural text.
//!
//! No vertex or index buffers and no textures: each label is one
//! non-indexed draw of `active_count * 6` vertices, and the shader rebuilds
//! every quad and pixel from the label uniform. All labels of a frame live
//! in one uniform buffer and are selected with a dynamic offset.

use std::num::NonZeroU64;

use log::warn;
use wgpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout,
    BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingResource, BindingType,
    Buffer, BufferBinding, BufferBindingType, BufferDescriptor, BufferUsages,
    ColorTargetState, ColorWrites, Device, FragmentState, FrontFace, MultisampleState,
    PipelineCompilationOptions, PipelineLayoutDescriptor, PolygonMode, PrimitiveState,
    PrimitiveTopology, Queue, RenderPass, RenderPipeline, RenderPipelineDescriptor,
    ShaderModuleDescriptor, ShaderStages, TextureFormat, VertexState,
};

use bitglyph_text::VERTICES_PER_GLYPH;

use crate::uniforms::LabelUniform;

/// Maximum labels per frame.
pub const MAX_LABELS: usize = 256;

/// Owns the wgpu pipeline, the label uniform buffer, and its bind group.
pub struct GlyphPipeline {
    pipeline: RenderPipeline,

    // Labels
    label_buffer: Buffer,
    label_bind_group: BindGroup,
    #[allow(dead_code)]
    label_bgl: BindGroupLayout,
    /// Byte distance between label slots.
    slot_stride: u64,

    /// Vertex count of each uploaded label, in slot order.
    vertex_counts: Vec<u32>,
}

impl GlyphPipeline {
    /// Create the pipeline and allocate the label uniform buffer.
    pub fn new(device: &Device, surface_format: TextureFormat) -> Self {
        // ── Shader ──────────────────────────────────────────────
        let shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("glyph_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../shaders/glyph.wgsl").into()),
        });

        let uniform_size = std::mem::size_of::<LabelUniform>() as u64;
        let slot_stride = slot_stride(
            uniform_size,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );

        // ── Label bind group layout ─────────────────────────────
        let label_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("glyph_label_bgl"),
            entries: &[BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::VERTEX | ShaderStages::FRAGMENT,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(uniform_size),
                },
                count: None,
            }],
        });

        // ── Pipeline layout ─────────────────────────────────────
        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("glyph_pipeline_layout"),
            bind_group_layouts: &[&label_bgl],
            push_constant_ranges: &[],
        });

        // ── Render pipeline ─────────────────────────────────────
        let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("glyph_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: PipelineCompilationOptions::default(),
                // Positions come from the vertex index alone.
                buffers: &[],
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: PipelineCompilationOptions::default(),
                targets: &[Some(ColorTargetState {
                    format: surface_format,
                    // Clear bits discard; set bits are opaque.
                    blend: None,
                    write_mask: ColorWrites::ALL,
                })],
            }),
            primitive: PrimitiveState {
                topology: PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        // ── Label uniform buffer ────────────────────────────────
        let label_buffer = device.create_buffer(&BufferDescriptor {
            label: Some("glyph_labels_ub"),
            size: slot_stride * MAX_LABELS as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let label_bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("glyph_labels_bg"),
            layout: &label_bgl,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: BindingResource::Buffer(BufferBinding {
                    buffer: &label_buffer,
                    offset: 0,
                    size: NonZeroU64::new(uniform_size),
                }),
            }],
        });

        Self {
            pipeline,
            label_buffer,
            label_bind_group,
            label_bgl,
            slot_stride,
            vertex_counts: Vec::with_capacity(MAX_LABELS),
        }
    }

    // ───────────────────── Upload ─────────────────────────────────

    /// Upload this frame's labels, one slot each.
    ///
    /// Returns the number of labels that will be drawn. Labels beyond
    /// [`MAX_LABELS`] are dropped.
    pub fn upload_labels(&mut self, queue: &Queue, labels: &[(LabelUniform, u32)]) -> u32 {
        if labels.len() > MAX_LABELS {
            warn!("{} labels submitted, drawing the first {}", labels.len(), MAX_LABELS);
        }
        let count = labels.len().min(MAX_LABELS);

        self.vertex_counts.clear();
        if count == 0 {
            return 0;
        }

        let stride = self.slot_stride as usize;
        let mut staging = vec![0u8; stride * count];
        for (slot, (uniform, vertex_count)) in labels[..count].iter().enumerate() {
            let bytes = bytemuck::bytes_of(uniform);
            staging[slot * stride..slot * stride + bytes.len()].copy_from_slice(bytes);
            self.vertex_counts.push(*vertex_count);
        }
        queue.write_buffer(&self.label_buffer, 0, &staging);

        count as u32
    }

    // ───────────────────── Draw ───────────────────────────────────

    /// Record one draw call per uploaded label.
    ///
    /// Empty labels still get their (zero-vertex) draw.
    pub fn draw<'a>(&'a self, pass: &mut RenderPass<'a>) {
        if self.vertex_counts.is_empty() {
            return;
        }

        pass.set_pipeline(&self.pipeline);
        for (slot, &vertices) in self.vertex_counts.iter().enumerate() {
            let offset = (slot as u64 * self.slot_stride) as u32;
            pass.set_bind_group(0, &self.label_bind_group, &[offset]);
            pass.draw(0..vertices, 0..1);
        }
    }

    /// Number of labels (and draw calls) uploaded for this frame.
    pub fn label_count(&self) -> u32 {
        self.vertex_counts.len() as u32
    }

    /// Glyphs drawn this frame across all labels.
    pub fn glyph_count(&self) -> u32 {
        self.vertex_counts.iter().sum::<u32>() / VERTICES_PER_GLYPH
    }
}

/// Round a uniform's size up to the device's dynamic-offset alignment.
fn slot_stride(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

// ===================================================================
// Tests
// ===================================================================
