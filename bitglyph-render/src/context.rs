//! GPU context: owns `wgpu::Device`, `Queue`, and optional `Surface`.
//!
//! Two construction paths:
//!
//! 1. **Headless** (`GpuContext::new_headless`): no window, no surface.
//!    Used for tests, benchmarks, and off-screen readback.
//!
//! 2. **Windowed** (`GpuContext::new_with_surface`): requires a
//!    `raw_window_handle`-compatible window.  Used by `bitglyph-desktop`.
//!
//! Any failure here is fatal to the caller: nothing can be drawn without
//! a device.

use log::{debug, info};
use thiserror::Error;
use wgpu::{
    Adapter, Device, DeviceDescriptor, Instance, InstanceDescriptor, Queue,
    RequestAdapterOptions, Surface, SurfaceConfiguration, TextureFormat,
    TextureUsages,
};

#[derive(Error, Debug)]
pub enum GpuError {
    #[error("No suitable GPU adapter found")]
    NoAdapter,
    #[error("Failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Core GPU state shared by the renderer and its pipeline.
pub struct GpuContext {
    pub device: Device,
    pub queue: Queue,
    pub adapter: Adapter,
    /// Present only when rendering to a window.
    pub surface: Option<Surface<'static>>,
    pub surface_config: Option<SurfaceConfiguration>,
    pub surface_format: TextureFormat,
}

impl GpuContext {
    /// Create a headless context rendering into `Rgba8Unorm` targets.
    pub async fn new_headless() -> Result<Self, GpuError> {
        let instance = Instance::new(&InstanceDescriptor::default());
        let adapter = request_adapter(&instance, None).await?;
        let (device, queue) = request_device(&adapter, "bitglyph-headless").await?;

        Ok(Self {
            device,
            queue,
            adapter,
            surface: None,
            surface_config: None,
            // Linear format so readback bytes equal the configured colours.
            surface_format: TextureFormat::Rgba8Unorm,
        })
    }

    /// Create a context with a surface attached to `window`.
    ///
    /// The window must outlive the returned context; passing an
    /// `Arc<Window>` satisfies this.
    pub async fn new_with_surface<W>(window: W, width: u32, height: u32) -> Result<Self, GpuError>
    where
        W: wgpu::WasmNotSendSync + Into<wgpu::SurfaceTarget<'static>>,
    {
        let instance = Instance::new(&InstanceDescriptor::default());

        let surface = instance
            .create_surface(window)
            .map_err(|e| GpuError::Surface(e.to_string()))?;

        let adapter = request_adapter(&instance, Some(&surface)).await?;
        let (device, queue) = request_device(&adapter, "bitglyph-windowed").await?;

        let caps = surface.get_capabilities(&adapter);
        // Colours are specified as raw framebuffer values, so prefer a
        // non-sRGB format when the surface offers one.
        let format = caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or_else(|| GpuError::Surface("Surface reports no formats".into()))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        debug!("Surface configured: {}x{} {:?}", config.width, config.height, format);

        Ok(Self {
            device,
            queue,
            adapter,
            surface: Some(surface),
            surface_config: Some(config),
            surface_format: format,
        })
    }

    /// Resize the surface.  No-op if headless or if either side is zero.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(config) = &mut self.surface_config {
            config.width = width;
            config.height = height;
            if let Some(surface) = &self.surface {
                surface.configure(&self.device, config);
            }
        }
    }

    /// Current surface dimensions, or `(0, 0)` if headless.
    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_config
            .as_ref()
            .map(|c| (c.width, c.height))
            .unwrap_or((0, 0))
    }

    pub fn adapter_name(&self) -> String {
        self.adapter.get_info().name
    }
}

async fn request_adapter(
    instance: &Instance,
    surface: Option<&Surface<'static>>,
) -> Result<Adapter, GpuError> {
    let adapter = instance
        .request_adapter(&RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: surface,
            force_fallback_adapter: false,
        })
        .await
        .ok_or(GpuError::NoAdapter)?;
    info!("Using adapter {:?}", adapter.get_info().name);
    Ok(adapter)
}

async fn request_device(adapter: &Adapter, label: &str) -> Result<(Device, Queue), GpuError> {
    let pair = adapter
        .request_device(
            &DeviceDescriptor {
                label: Some(label),
                ..Default::default()
            },
            None,
        )
        .await?;
    Ok(pair)
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_size_headless() {
        let ctx = pollster::block_on(GpuContext::new_headless());
        // No adapter on this machine: nothing to check.
        if let Ok(ctx) = ctx {
            assert_eq!(ctx.surface_size(), (0, 0));
            assert!(ctx.surface.is_none());
            assert_eq!(ctx.surface_format, TextureFormat::Rgba8Unorm);
        }
    }

    #[test]
    fn test_resize_headless_is_noop() {
        if let Ok(mut ctx) = pollster::block_on(GpuContext::new_headless()) {
            ctx.resize(640, 480);
            assert_eq!(ctx.surface_size(), (0, 0));
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(GpuError::NoAdapter.to_string(), "No suitable GPU adapter found");
        assert!(GpuError::Surface("lost".into()).to_string().contains("lost"));
    }
}
