//! Read-only views of a play session handed to the renderer, VFX and HUD collaborators.
//!
//! Snapshots are owned copies so they can cross thread boundaries on the system bus.

use crate::beatmap::Point;
use crate::logic::world::ObjectId;
use crate::models::engine::PixelSystem;
use crate::models::stats::{Judgement, ScoreAccumulator};

/// A judgement produced during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JudgementEvent {
    pub object: ObjectId,
    pub judgement: Judgement,
    /// Where the object was when judged, in device pixels.
    pub screen_position: (f32, f32),
    /// Playback time of the tick that produced it.
    pub time: i64,
}

/// Everything a renderer needs to draw one object.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleObject {
    pub id: ObjectId,
    /// Current position in beatmap space.
    pub position: (f32, f32),
    /// Hit radius in beatmap space.
    pub radius: f32,
    pub approach_scale: f32,
    pub slider_t: f32,
    pub opacity: f32,
    /// Slider control points with the head prepended.
    pub slider_points: Option<Vec<Point>>,
    /// Already judged in this lifetime.
    pub judged: bool,
}

/// Snapshot of gameplay state for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct GameplaySnapshot {
    /// Playback time in milliseconds.
    pub current_time: i64,
    pub pixels: PixelSystem,
    pub visible_objects: Vec<VisibleObject>,
    pub score: ScoreAccumulator,
    pub accuracy: f64,
    pub last_judgement: Option<JudgementEvent>,
    /// Objects not judged yet.
    pub remaining_objects: usize,
}
