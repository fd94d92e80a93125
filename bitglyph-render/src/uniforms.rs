//! GPU-side label uniform.
//!
//! Derives `bytemuck::Pod` + `Zeroable` for zero-copy upload. The layout
//! matches `struct Label` in `shaders/glyph.wgsl` field for field.

use bitglyph_text::{AssembledLabel, RenderConfig, MAX_LABEL_CHARS};
use bytemuck::{Pod, Zeroable};

/// Per-draw-call uniform for one label.
///
/// 112 bytes. The 16 glyph codes are stored as four `vec4<u32>` because
/// uniform arrays have a 16-byte element stride.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LabelUniform {
    /// Clip-space origin of the first cell.
    pub origin: [f32; 2],
    /// Clip-space size of one logical unit.
    pub cell_scale: [f32; 2],
    /// `[cell_pitch, glyph_width, 0, 0]` in logical units.
    pub metrics: [f32; 4],
    /// RGBA glyph colour.
    pub color: [f32; 4],
    /// Packed glyph codes, code `i` at `[i / 4][i % 4]`.
    pub glyph_codes: [[u32; 4]; MAX_LABEL_CHARS / 4],
}

impl LabelUniform {
    pub fn new(label: &AssembledLabel, config: &RenderConfig) -> Self {
        let mut glyph_codes = [[0u32; 4]; MAX_LABEL_CHARS / 4];
        for (i, &code) in label.glyph_codes.iter().enumerate() {
            glyph_codes[i / 4][i % 4] = code;
        }

        Self {
            origin: label.origin,
            cell_scale: label.cell_scale,
            metrics: [
                label.metrics.cell_pitch as f32,
                label.metrics.glyph_width as f32,
                0.0,
                0.0,
            ],
            color: config.glyph_color,
            glyph_codes,
        }
    }

    /// Glyph code in slot `index`, or `None` past the last slot.
    pub fn code(&self, index: usize) -> Option<u32> {
        self.glyph_codes.get(index / 4).map(|lane| lane[index % 4])
    }
}

// ===================================================================
// Tests
// ===================================================================
