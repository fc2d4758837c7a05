//! Application systems
//!
//! Window, GPU presentation, frame pacing and the animation driver.

mod pacer;
mod render;
mod simulation;
mod window;

pub use pacer::{FrameCounter, FramePacer};
pub use render::{map_surface_error, RenderSystem};
pub use simulation::{FrameDriver, SimulationState};
pub use window::{centered_position, WindowError, WindowSystem};
