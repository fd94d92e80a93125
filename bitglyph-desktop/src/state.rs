//! Application state: GPU context, renderer, and the per-frame label list.
//!
//! Labels are assembled from scratch on every frame against the current
//! surface size, so resizing never leaves stale layout behind.

use bitglyph_render::{FrameStats, GpuContext, RenderError, Renderer};
use bitglyph_text::{assemble, AssembledLabel, GlyphTable, Label, RenderConfig, Viewport};

/// `(text, indent, line, scale)` for every label on screen.
pub const DEMO_LABELS: &[(&str, i32, i32, u32)] = &[
    ("HELLO, WORLD!", 41, 22, 6),
    ("Bufferless text", 41, 35, 4),
    ("rendering demo:", 41, 43, 4),
    (" !\"#$%&'()*+,-./", 41, 54, 2),
    ("0123456789:;<=>?", 41, 58, 2),
    ("@ABCDEFGHIJKLMNO", 41, 62, 2),
    ("PQRSTUVWXYZ[\\]^_", 41, 66, 2),
    ("`abcdefghijklmno", 41, 70, 2),
    ("pqrstuvwxyz{|}~", 41, 74, 2),
    ("The quick brown", 88, 54, 2),
    ("fox jumps over", 90, 58, 2),
    ("the lazy dog.", 92, 62, 2),
    ("wgpu + WGSL", 88, 74, 3),
];

/// Build this frame's labels for a viewport.
pub fn assemble_labels(
    table: &GlyphTable,
    specs: &[(&str, i32, i32, u32)],
    viewport: Viewport,
    config: &RenderConfig,
) -> Vec<AssembledLabel> {
    specs
        .iter()
        .map(|&(text, indent, line, scale)| {
            assemble(table, &Label::new(text, indent, line, scale), viewport, config.metrics())
        })
        .collect()
}

/// Owns everything needed to draw a frame.
pub struct AppState {
    pub gpu: GpuContext,
    pub renderer: Renderer,
    pub config: RenderConfig,
    table: &'static GlyphTable,
}

impl AppState {
    pub fn new(gpu: GpuContext, config: RenderConfig) -> Self {
        let renderer = Renderer::new(&gpu, &config);
        Self {
            gpu,
            renderer,
            config,
            table: GlyphTable::builtin(),
        }
    }

    /// Viewport matching the configured surface.
    pub fn viewport(&self) -> Viewport {
        let (width, height) = self.gpu.surface_size();
        Viewport::new(width, height)
    }

    /// Assemble, upload and draw one frame.
    pub fn render_frame(&mut self) -> Result<FrameStats, RenderError> {
        let labels = assemble_labels(self.table, DEMO_LABELS, self.viewport(), &self.config);
        self.renderer.prepare(&self.gpu, &labels);
        self.renderer.render_to_surface(&self.gpu)
    }

    /// Handle window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }
}

// ===================================================================
// Tests
// ===================================================================
