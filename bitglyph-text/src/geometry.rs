//! Geometry generation: CPU mirror of the vertex stage.
//!
//! Every glyph is a quad of six unrolled vertices and nothing else: the
//! vertex index alone selects the glyph slot and the corner, and the
//! glyph code decides the quad's height and vertical offset. The WGSL in
//! `bitglyph-render` performs exactly the same arithmetic.

use crate::glyph::{ShapeKind, GLYPH_ROWS};
use crate::label::MAX_LABEL_CHARS;

/// Vertices emitted per glyph (two triangles, triangle-list topology).
pub const VERTICES_PER_GLYPH: u32 = 6;

/// `(u, v)` corner for each of the six vertices of a quad.
///
/// Triangle one is bottom-left, bottom-right, top-right; triangle two is
/// top-right, top-left, bottom-left. Same sequence as the bit tests
/// `(14 >> vert) & 1` and `(28 >> vert) & 1`.
pub const QUAD_CORNERS: [[u32; 2]; VERTICES_PER_GLYPH as usize] = [
    [0, 0],
    [1, 0],
    [1, 1],
    [1, 1],
    [0, 1],
    [0, 0],
];

/// Horizontal layout of a cell in logical units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellMetrics {
    /// Advance from one glyph to the next.
    pub cell_pitch: u32,
    /// Drawn width of a glyph; the remainder of the pitch is the gap.
    pub glyph_width: u32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_pitch: 6,
            glyph_width: 5,
        }
    }
}

/// Output of the vertex stage for one vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphVertex {
    /// Clip-space position.
    pub position: [f32; 2],
    /// Cell coordinate handed to the rasterizer: `u` in `[0, 1]`,
    /// `y` in `[0, rows / 6]`.
    pub coords: [f32; 2],
    /// Glyph code, forwarded without interpolation.
    pub code: u32,
}

/// Compute vertex `index` of a label batch.
///
/// Indices past the 16 glyph slots read the blank code; their placement
/// is meaningless but never panics.
pub fn generate_vertex(
    index: u32,
    glyph_codes: &[u32; MAX_LABEL_CHARS],
    origin: [f32; 2],
    cell_scale: [f32; 2],
    metrics: CellMetrics,
) -> GlyphVertex {
    let quad = index / VERTICES_PER_GLYPH;
    let vert = (index % VERTICES_PER_GLYPH) as usize;
    let code = glyph_codes.get(quad as usize).copied().unwrap_or(0);

    let shape = ShapeKind::from_code(code);
    let [u, v] = QUAD_CORNERS[vert];

    let y = (v * shape.rows()) as f32;
    let x = quad as f32 * metrics.cell_pitch as f32 + (u * metrics.glyph_width) as f32;
    let pos = [x, y - shape.low() as f32];

    GlyphVertex {
        position: [
            pos[0] * cell_scale[0] + origin[0],
            pos[1] * cell_scale[1] + origin[1],
        ],
        coords: [u as f32, y / GLYPH_ROWS as f32],
        code,
    }
}

// ===================================================================
// Tests
// ===================================================================
