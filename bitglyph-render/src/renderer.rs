//! High-level renderer that ties the GPU context, the glyph pipeline, and
//! assembled labels together into a single `render_*()` call per frame.

use log::{debug, info};
use thiserror::Error;
use wgpu::{
    Color, CommandEncoderDescriptor, LoadOp, Operations, RenderPassColorAttachment,
    RenderPassDescriptor, StoreOp, TextureView, TextureViewDescriptor,
};

use bitglyph_text::{AssembledLabel, RenderConfig};

use crate::context::GpuContext;
use crate::pipelines::glyph::GlyphPipeline;
use crate::uniforms::LabelUniform;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("No surface configured (headless mode)")]
    NoSurface,
}

/// Frame statistics returned after each render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Labels submitted this frame.
    pub label_count: u32,
    /// Glyph quads across all labels.
    pub glyph_count: u32,
    /// Draw calls issued (one per label).
    pub draw_calls: u32,
}

/// Frame renderer for procedural text.
///
/// # Usage
///
/// ```ignore
/// let mut renderer = Renderer::new(&gpu, &config);
/// renderer.prepare(&gpu, &labels);
/// let stats = renderer.render_to_surface(&gpu)?;
/// ```
pub struct Renderer {
    glyph_pipeline: GlyphPipeline,
    config: RenderConfig,
    clear_color: Color,
}

impl Renderer {
    /// Create a renderer for the given GPU context.
    pub fn new(gpu: &GpuContext, config: &RenderConfig) -> Self {
        let glyph_pipeline = GlyphPipeline::new(&gpu.device, gpu.surface_format);
        info!("Glyph pipeline ready for {:?}", gpu.surface_format);

        let [r, g, b, a] = config.background_color.map(f64::from);
        Self {
            glyph_pipeline,
            config: config.clone(),
            clear_color: Color { r, g, b, a },
        }
    }

    /// Set the background clear color.
    pub fn set_clear_color(&mut self, r: f64, g: f64, b: f64, a: f64) {
        self.clear_color = Color { r, g, b, a };
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Upload this frame's labels.
    ///
    /// Call once per frame before `render_to_surface()` or
    /// `render_to_texture()`.
    pub fn prepare(&mut self, gpu: &GpuContext, labels: &[AssembledLabel]) {
        let uniforms: Vec<(LabelUniform, u32)> = labels
            .iter()
            .map(|label| (LabelUniform::new(label, &self.config), label.vertex_count()))
            .collect();
        let drawn = self.glyph_pipeline.upload_labels(&gpu.queue, &uniforms);
        debug!("Prepared {drawn} labels, {} glyphs", self.glyph_pipeline.glyph_count());
    }

    /// Render to the window surface.  Returns frame statistics.
    pub fn render_to_surface(&self, gpu: &GpuContext) -> Result<FrameStats, RenderError> {
        let surface = gpu.surface.as_ref().ok_or(RenderError::NoSurface)?;
        let output = surface.get_current_texture()?;
        let view = output.texture.create_view(&TextureViewDescriptor::default());

        let stats = self.encode(gpu, &view, "bitglyph_frame");
        output.present();

        Ok(stats)
    }

    /// Render to an off-screen texture (headless mode).
    ///
    /// The target must use `gpu.surface_format`.
    pub fn render_to_texture(&self, gpu: &GpuContext, target_view: &TextureView) -> FrameStats {
        self.encode(gpu, target_view, "bitglyph_offscreen")
    }

    fn encode(&self, gpu: &GpuContext, view: &TextureView, label: &str) -> FrameStats {
        let mut encoder = gpu.device.create_command_encoder(&CommandEncoderDescriptor {
            label: Some(label),
        });

        {
            let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some(label),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(self.clear_color),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.glyph_pipeline.draw(&mut pass);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        self.stats()
    }

    /// Statistics for the currently prepared frame.
    pub fn stats(&self) -> FrameStats {
        let labels = self.glyph_pipeline.label_count();
        FrameStats {
            label_count: labels,
            glyph_count: self.glyph_pipeline.glyph_count(),
            draw_calls: labels,
        }
    }
}

// ===================================================================
// Tests
// ===================================================================
