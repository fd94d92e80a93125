//! Label assembly.
//!
//! A label is one run of at most 16 glyphs placed on a fixed grid of
//! 6×6-pixel cells anchored at the top-left of the viewport. Assembly is
//! redone every frame from the current viewport size; nothing is cached.

use log::trace;

use crate::font::GlyphTable;
use crate::geometry::{generate_vertex, CellMetrics, GlyphVertex, VERTICES_PER_GLYPH};
use crate::glyph::{Glyph, GLYPH_ROWS};

/// Glyph slots per label (size of the `glyph_codes` uniform).
pub const MAX_LABEL_CHARS: usize = 16;

/// Current drawable size in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// A zero dimension is clamped to one pixel.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Clip-space size of one pixel.
    pub fn pixel_size(&self) -> [f32; 2] {
        [2.0 / self.width.max(1) as f32, 2.0 / self.height.max(1) as f32]
    }
}

/// One text run to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Label<'a> {
    pub text: &'a str,
    /// Column on the cell grid.
    pub indent: i32,
    /// Row on the cell grid; the label's baseline sits under this row.
    pub line: i32,
    /// Integer pixel scale of each logical unit.
    pub scale: u32,
}

impl<'a> Label<'a> {
    pub fn new(text: &'a str, indent: i32, line: i32, scale: u32) -> Self {
        Self {
            text,
            indent,
            line,
            scale,
        }
    }
}

/// Everything one draw call needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AssembledLabel {
    /// Packed codes, zero-padded past `active_count`.
    pub glyph_codes: [u32; MAX_LABEL_CHARS],
    /// Clip-space position of the first cell's baseline-left corner.
    pub origin: [f32; 2],
    /// Clip-space size of one logical unit.
    pub cell_scale: [f32; 2],
    /// Glyphs consumed before truncation.
    pub active_count: u32,
    pub metrics: CellMetrics,
}

impl AssembledLabel {
    /// Vertices to draw: six per active glyph.
    pub fn vertex_count(&self) -> u32 {
        self.active_count * VERTICES_PER_GLYPH
    }

    pub fn is_empty(&self) -> bool {
        self.active_count == 0
    }

    /// Run the vertex stage on the CPU for every vertex of the draw call.
    pub fn vertices(&self) -> impl Iterator<Item = GlyphVertex> + '_ {
        (0..self.vertex_count()).map(move |i| {
            generate_vertex(i, &self.glyph_codes, self.origin, self.cell_scale, self.metrics)
        })
    }

    /// Active glyphs in explicit form.
    pub fn glyphs(&self) -> impl Iterator<Item = Glyph> + '_ {
        self.glyph_codes[..self.active_count as usize]
            .iter()
            .map(|&code| Glyph::unpack(code))
    }
}

/// Turn `label` into the codes and transform of one draw call.
///
/// Scanning stops at the first character outside `' '..='~'` or after
/// [`MAX_LABEL_CHARS`] characters. Neither is an error.
pub fn assemble(
    table: &GlyphTable,
    label: &Label<'_>,
    viewport: Viewport,
    metrics: CellMetrics,
) -> AssembledLabel {
    let [pix_w, pix_h] = viewport.pixel_size();

    let origin = [
        -1.0 + metrics.cell_pitch as f32 * pix_w * label.indent as f32,
        1.0 - GLYPH_ROWS as f32 * pix_h * (label.line as f32 + 1.0),
    ];
    let cell_scale = [pix_w * label.scale as f32, pix_h * label.scale as f32];

    let mut glyph_codes = [0u32; MAX_LABEL_CHARS];
    let mut active = 0;

    for ch in label.text.chars() {
        if active == MAX_LABEL_CHARS {
            trace!("Label {:?} truncated at {} glyphs", label.text, MAX_LABEL_CHARS);
            break;
        }
        match table.lookup(ch) {
            Ok(glyph) => glyph_codes[active] = glyph.pack(),
            Err(err) => {
                trace!("Label {:?} truncated: {err}", label.text);
                break;
            }
        }
        active += 1;
    }

    AssembledLabel {
        glyph_codes,
        origin,
        cell_scale,
        active_count: active as u32,
        metrics,
    }
}

// ===================================================================
// Tests
// ===================================================================
