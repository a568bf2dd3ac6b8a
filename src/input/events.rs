use serde::{Deserialize, Serialize};

/// Discrete input coming from the windowing/input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Cursor position in device pixels.
    CursorMoved { x: f32, y: f32 },
    Press,
    Release,
}

/// Cursor and button state as seen by the judgement stage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorState {
    /// Last known position in device pixels.
    pub position: (f32, f32),
    pub held: bool,
    /// A press arrived since the last tick. Cleared by the session after judging.
    pub pressed: bool,
}

impl CursorState {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved { x, y } => self.position = (x, y),
            InputEvent::Press => {
                self.held = true;
                self.pressed = true;
            }
            InputEvent::Release => self.held = false,
        }
    }

    /// Consumes the pending press edge.
    pub fn take_press(&mut self) -> bool {
        std::mem::take(&mut self.pressed)
    }
}
