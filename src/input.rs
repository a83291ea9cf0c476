//! Polled keyboard and mouse state.
//!
//! The frame driver never reacts to raw OS events directly; events are
//! folded into an [`InputState`] as they arrive and the per-frame game logic
//! polls it with [`key_down`](InputState::key_down) and the mouse accessors.

use std::collections::HashSet;

use winit::dpi::PhysicalPosition;
use winit::event::{MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Which mouse button is currently held, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButtonState {
    Left,
    Right,
    None,
}

/// Current input state for the window: held keys, cursor position and the
/// held mouse button.
#[derive(Debug)]
pub struct InputState {
    /// Set of currently held keys.
    pub keys_down: HashSet<KeyCode>,
    /// Cursor position in physical pixels.
    pub mouse_position: PhysicalPosition<f64>,
    pub mouse_pressed: MouseButtonState,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            mouse_position: PhysicalPosition::new(0.0, 0.0),
            mouse_pressed: MouseButtonState::None,
        }
    }

    /// Fold a winit window event into the state.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => {
                if state.is_pressed() {
                    self.keys_down.insert(*key);
                } else {
                    self.keys_down.remove(key);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = *position;
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_pressed = match (button, state.is_pressed()) {
                    (MouseButton::Left, true) => MouseButtonState::Left,
                    (MouseButton::Right, true) => MouseButtonState::Right,
                    _ => MouseButtonState::None,
                };
            }
            // On focus loss the matching release events never arrive, so
            // clear the held sets to avoid stuck keys.
            WindowEvent::Focused(false) => {
                self.keys_down.clear();
                self.mouse_pressed = MouseButtonState::None;
            }
            _ => {}
        }
    }

    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn mouse_down(&self) -> bool {
        self.mouse_pressed != MouseButtonState::None
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
