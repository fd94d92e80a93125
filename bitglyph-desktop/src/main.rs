//! bitglyph desktop demo: draws the whole built-in font without a single
//! vertex buffer or texture.
//!
//! Uses `winit` 0.30 for windowing and `bitglyph-render` for the GPU work.
//! Takes no arguments; any key press or closing the window exits. Set
//! `BITGLYPH_CONFIG` to a JSON file to override colours and cell metrics.

mod state;

use std::env;
use std::sync::Arc;

use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

use bitglyph_render::{GpuContext, RenderError};
use bitglyph_text::RenderConfig;
use state::AppState;

/// Environment variable naming an optional JSON config file.
const CONFIG_ENV: &str = "BITGLYPH_CONFIG";

/// Winit 0.30 application handler.
struct App {
    config: RenderConfig,
    window: Option<Arc<Window>>,
    state: Option<AppState>,
    frame_count: u64,
}

impl App {
    fn new(config: RenderConfig) -> Self {
        Self {
            config,
            window: None,
            state: None,
            frame_count: 0,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("bitglyph")
            .with_inner_size(LogicalSize::new(960, 540));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Could not create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let gpu = match pollster::block_on(GpuContext::new_with_surface(
            window.clone(),
            size.width.max(1),
            size.height.max(1),
        )) {
            Ok(gpu) => gpu,
            Err(e) => {
                error!("Could not initialize GPU: {e}");
                event_loop.exit();
                return;
            }
        };

        info!(
            "bitglyph initialized: {}×{}, GPU: {:?}",
            size.width,
            size.height,
            gpu.adapter_name()
        );

        self.state = Some(AppState::new(gpu, self.config.clone()));
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(window), Some(state)) = (self.window.as_ref(), self.state.as_mut()) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                info!("Window closed after {} frames", self.frame_count);
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                info!("Key pressed, exiting after {} frames", self.frame_count);
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                state.resize(new_size.width, new_size.height);
                window.request_redraw();
            }

            WindowEvent::RedrawRequested => match state.render_frame() {
                Ok(stats) => {
                    self.frame_count += 1;
                    debug!(
                        "Frame {}: {} labels, {} glyphs, {} draw call(s)",
                        self.frame_count,
                        stats.label_count,
                        stats.glyph_count,
                        stats.draw_calls
                    );
                }
                Err(RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                    let size = window.inner_size();
                    state.resize(size.width, size.height);
                    window.request_redraw();
                }
                Err(e) => {
                    error!("Render error: {e}");
                }
            },

            _ => {}
        }
    }
}

fn load_config() -> RenderConfig {
    let Some(path) = env::var_os(CONFIG_ENV) else {
        return RenderConfig::default();
    };
    match RenderConfig::load(&path) {
        Ok(config) => {
            info!("Loaded config from {}", path.to_string_lossy());
            config
        }
        Err(e) => {
            warn!("Ignoring {}: {e}", path.to_string_lossy());
            RenderConfig::default()
        }
    }
}

fn main() {
    env_logger::init();

    info!("Starting bitglyph...");

    let config = load_config();

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            error!("Could not create event loop: {e}");
            std::process::exit(1);
        }
    };
    // Static scene: redraw only on expose/resize.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        error!("Event loop error: {e}");
        std::process::exit(1);
    }
    if app.state.is_none() {
        // Setup never completed.
        std::process::exit(1);
    }
}
