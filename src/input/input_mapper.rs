//! Input mapping from raw events to semantic actions
//!
//! The animation takes no interactive input; the only mapped key is Escape,
//! which quits when released.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape released)
    Exit,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for mapped keys, `None` for everything else
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only releases are mapped
        if state != ElementState::Released {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            _ => None,
        }
    }
}
