//! ASCII Tesseract
//!
//! Opens a window and animates a rotating tesseract drawn with text glyphs.

use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use ascii4d::config::AppConfig;
use ascii4d::input::{InputAction, InputMapper};
use ascii4d::systems::{FrameCounter, FrameDriver, FramePacer, RenderSystem, WindowSystem};
use ascii4d_render::{RenderError, SystemTextRenderer};

/// Main application state
struct App {
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    driver: FrameDriver<SystemTextRenderer>,
    pacer: FramePacer,
    counter: FrameCounter,
    /// Set by a close request or Escape; the loop exits on its next pass
    quit: bool,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let driver = FrameDriver::from_config(&config);
        let pacer = FramePacer::new(config.animation.fps);

        log::info!(
            "Animating at {} fps, {} rad per frame, planes {:?}",
            config.animation.fps,
            config.animation.speed,
            config.projection.rotation_planes
        );

        Self {
            config,
            window: None,
            render: None,
            driver,
            pacer,
            counter: FrameCounter::new(Instant::now()),
            quit: false,
        }
    }

    /// Draw, present and advance one frame
    fn frame(&mut self) {
        let Some(render) = &mut self.render else {
            return;
        };

        match self.driver.tick(render) {
            Ok(stats) => {
                if self.config.debug.log_frame_stats {
                    if let Some(fps) = self.counter.record(Instant::now()) {
                        log::info!(
                            "{:.1} fps, angle {:.3}, {} vertex glyphs, {} edge glyphs",
                            fps,
                            self.driver.state().angle,
                            stats.vertex_glyphs,
                            stats.edge_glyphs
                        );
                    }
                }
            }
            Err(RenderError::SurfaceLost) => {
                log::debug!("Surface lost, reconfiguring");
                render.reconfigure();
            }
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                self.quit = true;
            }
            Err(RenderError::Glyph(e)) => {
                log::error!("Cannot draw glyph: {}", e);
                self.quit = true;
            }
            Err(e) => log::warn!("{}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        match RenderSystem::new(window.window().clone(), self.config.canvas_size(), self.config.window.vsync) {
            Ok(render) => self.render = Some(render),
            Err(e) => {
                log::error!("Failed to initialise rendering: {}", e);
                event_loop.exit();
                return;
            }
        }

        self.window = Some(window);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.quit = true;
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if InputMapper::map_keyboard(key, event.state) == Some(InputAction::Exit) {
                        self.quit = true;
                    }
                }
            }

            WindowEvent::Resized(size) => {
                if let Some(render) = &mut self.render {
                    render.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                if !self.quit {
                    self.frame();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.quit {
            log::info!("Exiting after {} frames", self.driver.frames());
            // Drop the surface before the window
            self.render = None;
            self.window = None;
            event_loop.exit();
            return;
        }

        let now = Instant::now();
        if self.pacer.is_due(now) {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            self.pacer.frame_started(now);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.pacer.next_deadline()));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = AppConfig::load();
    let log_level = loaded
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // RUST_LOG still takes precedence
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::info!("Starting ASCII Tesseract");

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
