//! wgpu render pipelines.

pub mod glyph;
