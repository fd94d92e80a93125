//! Glyph rasterization: CPU mirror of the fragment stage.
//!
//! A covered pixel is kept when one bit of the glyph code is set. The row
//! fold `(floor(y*6 + roll*4) mod 7) mod 6` maps the 7-row cell of big
//! glyphs back onto the six addressable mask rows; for the rolled glyph it
//! first slides the sample four rows up so the cell reads rows
//! 4, 5, 0, 0, 1, 2, 3 from the bottom.

use std::fmt;

use crate::glyph::{ShapeKind, GLYPH_COLUMNS, GLYPH_ROWS};

/// Decide keep (`true`) or discard (`false`) for one sample.
///
/// `coords` is the interpolated cell coordinate produced by
/// [`generate_vertex`](crate::geometry::generate_vertex).
pub fn sample(coords: [f32; 2], code: u32) -> bool {
    let roll = ShapeKind::from_code(code).roll() as f32;

    let row = ((coords[1] * GLYPH_ROWS as f32 + roll * 4.0) as u32 % 7) % GLYPH_ROWS;
    let col = ((coords[0] * GLYPH_COLUMNS as f32) as u32).min(GLYPH_COLUMNS - 1);

    (code >> (row * GLYPH_COLUMNS + col)) & 1 == 1
}

/// Colour for a kept sample, `None` for a discarded one.
pub fn shade(coords: [f32; 2], code: u32, color: [f32; 4]) -> Option<[f32; 4]> {
    sample(coords, code).then_some(color)
}

/// Sampled pixels of a whole cell, top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellBitmap {
    pub rows: Vec<[bool; GLYPH_COLUMNS as usize]>,
}

impl CellBitmap {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Rows as `#`/`.` strings, top row first.
    pub fn lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|&on| if on { '#' } else { '.' }).collect())
            .collect()
    }
}

impl fmt::Display for CellBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Sample the centre of every pixel of a glyph's cell.
pub fn rasterize_glyph(code: u32) -> CellBitmap {
    let rows = ShapeKind::from_code(code).rows();
    let rows = (0..rows)
        .rev()
        .map(|r| {
            let y = (r as f32 + 0.5) / GLYPH_ROWS as f32;
            let mut row = [false; GLYPH_COLUMNS as usize];
            for (c, px) in row.iter_mut().enumerate() {
                let u = (c as f32 + 0.5) / GLYPH_COLUMNS as f32;
                *px = sample([u, y], code);
            }
            row
        })
        .collect();
    CellBitmap { rows }
}

// ===================================================================
// Tests
// ===================================================================
