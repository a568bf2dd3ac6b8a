//! Serializable input recordings.
//!
//! A replay stores only raw inputs (cursor moves, presses, releases) with their playback time,
//! so a session fed the same inputs reproduces the same judgements.

use crate::input::InputEvent;
use serde::{Deserialize, Serialize};

/// Current replay format version for compatibility.
pub const REPLAY_FORMAT_VERSION: u8 = 1;

/// A single recorded input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplayInput {
    /// Playback time in milliseconds.
    pub time_ms: i64,
    pub event: InputEvent,
}

/// Cursor positions are recorded in device pixels, so a replay is tied to the display
/// resolution it was recorded at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayData {
    /// Format version for future compatibility.
    pub version: u8,
    /// md5 of the beatmap this replay was recorded on.
    pub beatmap_hash: String,
    /// All inputs in chronological order.
    pub inputs: Vec<ReplayInput>,
}

impl ReplayData {
    pub fn new(beatmap_hash: impl Into<String>) -> Self {
        Self {
            version: REPLAY_FORMAT_VERSION,
            beatmap_hash: beatmap_hash.into(),
            inputs: Vec::new(),
        }
    }

    pub fn add_input(&mut self, time_ms: i64, event: InputEvent) {
        self.inputs.push(ReplayInput { time_ms, event });
    }

    /// Records a cursor move in device pixels.
    #[inline]
    pub fn add_move(&mut self, time_ms: i64, x: f32, y: f32) {
        self.add_input(time_ms, InputEvent::CursorMoved { x, y });
    }

    #[inline]
    pub fn add_press(&mut self, time_ms: i64) {
        self.add_input(time_ms, InputEvent::Press);
    }

    #[inline]
    pub fn add_release(&mut self, time_ms: i64) {
        self.add_input(time_ms, InputEvent::Release);
    }

    /// Inputs sorted by time. Inputs sharing a timestamp keep their recorded order.
    pub fn sorted_inputs(&self) -> Vec<ReplayInput> {
        let mut inputs = self.inputs.clone();
        inputs.sort_by_key(|input| input.time_ms);
        inputs
    }

    /// Serializes to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
