//! Window management system
//!
//! Handles window creation and placement.

use std::sync::Arc;
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    event_loop::ActiveEventLoop,
    window::Window,
};
use crate::config::WindowConfig;

/// Owns the application window
pub struct WindowSystem {
    window: Arc<Window>,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(config.resizable);

        if config.centered {
            if let Some(monitor) = event_loop.primary_monitor() {
                let scale = monitor.scale_factor();
                let window_size = (
                    (config.width as f64 * scale).round() as u32,
                    (config.height as f64 * scale).round() as u32,
                );
                let pos = monitor.position();
                let size = monitor.size();
                let (x, y) = centered_position((pos.x, pos.y), (size.width, size.height), window_size);
                attrs = attrs.with_position(PhysicalPosition::new(x, y));
            } else {
                log::debug!("No primary monitor reported, leaving window placement to the platform");
            }
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        log::info!("Created {}x{} window '{}'", config.width, config.height, config.title);

        Ok(Self { window })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Top-left corner that centers a window on a monitor, in physical pixels
pub fn centered_position(
    monitor_pos: (i32, i32),
    monitor_size: (u32, u32),
    window_size: (u32, u32),
) -> (i32, i32) {
    let x = monitor_pos.0 + (monitor_size.0 as i32 - window_size.0 as i32) / 2;
    let y = monitor_pos.1 + (monitor_size.1 as i32 - window_size.1 as i32) / 2;
    (x, y)
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_on_primary() {
        assert_eq!(centered_position((0, 0), (1920, 1080), (800, 800)), (560, 140));
    }

    #[test]
    fn test_centered_on_offset_monitor() {
        assert_eq!(centered_position((1920, -200), (2560, 1440), (800, 800)), (2800, 120));
    }

    #[test]
    fn test_window_larger_than_monitor() {
        assert_eq!(centered_position((0, 0), (640, 480), (800, 800)), (-80, -160));
    }

    #[test]
    fn test_window_error_display() {
        let err = WindowError::CreationFailed("no display".to_string());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
