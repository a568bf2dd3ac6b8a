//! Input events consumed by the simulation.

pub mod events;

pub use events::{CursorState, InputEvent};
