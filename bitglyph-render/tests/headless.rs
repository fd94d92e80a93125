//! Off-screen render + readback, checked pixel by pixel against the CPU
//! rasterizer. Skips silently when the machine has no usable adapter.

use bitglyph_render::{GpuContext, Renderer};
use bitglyph_text::{
    assemble, rasterize_glyph, AssembledLabel, CellMetrics, GlyphTable, Label, RenderConfig,
    Viewport,
};

const WIDTH: u32 = 64;
const HEIGHT: u32 = 32;
const SCALE: u32 = 2;

struct Frame {
    pixels: Vec<u8>,
}

impl Frame {
    fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * WIDTH + x) * 4) as usize;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]]
    }

    /// Glyph colour is dark grey, background is yellow.
    fn is_ink(&self, x: u32, y: u32) -> bool {
        self.rgba(x, y)[0] < 128
    }
}

fn render(labels: &[AssembledLabel]) -> Option<Frame> {
    let gpu = pollster::block_on(GpuContext::new_headless()).ok()?;
    let mut renderer = Renderer::new(&gpu, &RenderConfig::default());

    let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("readback_target"),
        size: wgpu::Extent3d {
            width: WIDTH,
            height: HEIGHT,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: gpu.surface_format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    renderer.prepare(&gpu, labels);
    renderer.render_to_texture(&gpu, &view);

    // 64 px × 4 bytes = 256, already row-aligned.
    let bytes_per_row = WIDTH * 4;
    let buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("readback_buffer"),
        size: (bytes_per_row * HEIGHT) as u64,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("readback") });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(HEIGHT),
            },
        },
        wgpu::Extent3d {
            width: WIDTH,
            height: HEIGHT,
            depth_or_array_layers: 1,
        },
    );
    gpu.queue.submit(std::iter::once(encoder.finish()));

    let slice = buffer.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    gpu.device.poll(wgpu::Maintain::Wait);
    rx.recv().ok()?.ok()?;

    let pixels = slice.get_mapped_range().to_vec();
    buffer.unmap();
    Some(Frame { pixels })
}

fn label(text: &str, indent: i32, line: i32) -> AssembledLabel {
    assemble(
        GlyphTable::builtin(),
        &Label::new(text, indent, line, SCALE),
        Viewport::new(WIDTH, HEIGHT),
        CellMetrics::default(),
    )
}

/// Compare glyph `slot` of a label against the CPU rasterizer.
///
/// `indent`/`line` place the label; samples sit a quarter unit inside
/// each logical pixel to stay clear of edges.
fn assert_glyph_matches(frame: &Frame, ch: char, slot: u32, indent: i32, line: i32) {
    let code = GlyphTable::builtin().code(ch).unwrap();
    let glyph = bitglyph_text::Glyph::unpack(code);
    let cell = rasterize_glyph(code);

    let left = (indent as u32 * 6) + slot * 6 * SCALE;
    let bottom = (line as u32 + 1) * 6 + glyph.shape.low() * SCALE;
    let rows = cell.height() as u32;

    for r in 0..rows {
        for c in 0..5 {
            let x = left + c * SCALE;
            let y = bottom - r * SCALE - 1;
            let expected = cell.rows[(rows - 1 - r) as usize][c as usize];
            assert_eq!(
                frame.is_ink(x, y),
                expected,
                "{ch:?} row {r} col {c} at pixel ({x}, {y})\n{cell}"
            );
        }
    }
}

#[test]
fn test_empty_frame_is_background() {
    let Some(frame) = render(&[label("", 0, 0)]) else {
        return;
    };
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            assert!(!frame.is_ink(x, y));
        }
    }
    assert_eq!(frame.rgba(0, 0), [255, 221, 85, 255]);
}

#[test]
fn test_glyphs_match_cpu_rasterizer() {
    let Some(frame) = render(&[label("Ag", 1, 2)]) else {
        return;
    };
    assert_glyph_matches(&frame, 'A', 0, 1, 2);
    assert_glyph_matches(&frame, 'g', 1, 1, 2);
}

#[test]
fn test_big_and_rolled_glyphs_match_cpu_rasterizer() {
    let Some(frame) = render(&[label("$j", 0, 2)]) else {
        return;
    };
    assert_glyph_matches(&frame, '$', 0, 0, 2);
    assert_glyph_matches(&frame, 'j', 1, 0, 2);
}

#[test]
fn test_glyph_colour() {
    let Some(frame) = render(&[label("_", 0, 2)]) else {
        return;
    };
    // Underscore fills its bottom row, one unit below the baseline.
    let y = 3 * 6 + SCALE - 1;
    assert_eq!(frame.rgba(1, y), [51, 51, 51, 255]);
}

#[test]
fn test_truncated_label_draws_nothing_past_cut() {
    let Some(frame) = render(&[label("A\x01A", 0, 2)]) else {
        return;
    };
    // Second cell starts 12 px in; it must stay blank.
    for y in 0..HEIGHT {
        for x in 12..WIDTH {
            assert!(!frame.is_ink(x, y), "pixel ({x}, {y})");
        }
    }
}
