//! # bitglyph-text
//!
//! Host side of the bufferless text renderer: the baked 5×6 ASCII font,
//! the packed glyph-code format, and the label assembler that turns a
//! string into the 16-slot code array consumed by the GPU pipeline.
//!
//! ## Architecture
//!
//! ```text
//! GlyphTable (95 packed codes, static)
//!     │
//!     ▼
//! assemble(label, viewport) ──► AssembledLabel { codes[16], origin, cell_scale, count }
//!     │                                   │
//!     ▼                                   ▼
//! geometry::generate_vertex        raster::sample
//! (CPU mirror of vs_main)          (CPU mirror of fs_main)
//! ```
//!
//! - **`glyph`**: explicit `Glyph { mask, shape }` form and the packed wire format.
//! - **`font`**: the fixed glyph table.
//! - **`geometry`**: vertex-index → quad corner decode.
//! - **`raster`**: per-pixel bit test.
//! - **`label`**: label assembly.
//! - **`config`**: colours and cell metrics.

pub mod config;
pub mod font;
pub mod geometry;
pub mod glyph;
pub mod label;
pub mod raster;

// Re-exports for ergonomic use.
pub use config::{ConfigError, RenderConfig};
pub use font::{is_printable, GlyphError, GlyphTable, ASCII_MAX, ASCII_MIN};
pub use geometry::{generate_vertex, CellMetrics, GlyphVertex, VERTICES_PER_GLYPH};
pub use glyph::{Glyph, ShapeKind};
pub use label::{assemble, AssembledLabel, Label, Viewport, MAX_LABEL_CHARS};
pub use raster::{rasterize_glyph, sample, shade, CellBitmap};
