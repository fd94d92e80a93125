//! # bitglyph-render
//!
//! GPU backend for bufferless procedural text, built on `wgpu`.
//!
//! ## Architecture
//!
//! ```text
//!  Label (text, indent, line, scale)
//!       │
//!       ▼
//!  bitglyph_text::assemble()        ◀─── 16 packed codes + transform
//!       │
//!       ▼
//!  Renderer.prepare(labels)         ◀─── one uniform slot per label
//!       │
//!       ▼
//!  Renderer.render_to_surface()     ◀─── one draw(0..n*6) per label
//!       │
//!       ▼
//!  glyph.wgsl  vs_main → fs_main    ◀─── quad from vertex index, bit test per pixel
//! ```
//!
//! ## Crate modules
//!
//! - [`context`]: GPU device/queue/surface initialisation
//! - [`uniforms`]: the per-label uniform block
//! - [`pipelines`]: the bufferless glyph pipeline
//! - [`renderer`]: high-level frame orchestration

pub mod context;
pub mod pipelines;
pub mod renderer;
pub mod uniforms;

// Re-exports for convenience
pub use context::{GpuContext, GpuError};
pub use pipelines::glyph::{GlyphPipeline, MAX_LABELS};
pub use renderer::{FrameStats, RenderError, Renderer};
pub use uniforms::LabelUniform;
