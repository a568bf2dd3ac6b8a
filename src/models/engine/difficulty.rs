//! Per-object geometry and timing derived from the `[Difficulty]` block.

use crate::beatmap::{Difficulty, HitObject, ObjectParams};

/// Slider velocity multiplier. Timing points are not modelled, so this stays at 1.
pub const SLIDER_VELOCITY: f32 = 1.0;
/// Beat length in milliseconds used for every slider.
pub const BEAT_LENGTH_MS: f32 = 300.0;

/// Derived constants for one hit object, in milliseconds and osu!pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DifficultyProperties {
    pub radius: f32,
    pub preempt: f32,
    pub fade_in: f32,
    /// One pass over the slider path.
    pub duration_single: f32,
    /// All passes.
    pub duration_total: f32,
}

impl DifficultyProperties {
    /// Computes the properties of `object` under `difficulty`.
    pub fn derive(difficulty: &Difficulty, object: &HitObject) -> Self {
        let (duration_single, duration_total) = match &object.params {
            ObjectParams::Curve(curve) => {
                let single = slider_duration(curve.length, difficulty.slider_multiplier);
                (single, single * curve.slides.max(1) as f32)
            }
            ObjectParams::None => (0.0, 0.0),
        };

        Self {
            radius: radius(difficulty.circle_size),
            preempt: preempt(difficulty.approach_rate),
            fade_in: fade_in(difficulty.approach_rate),
            duration_single,
            duration_total,
        }
    }

    /// Length of the visibility window.
    pub fn lifetime(&self) -> f32 {
        self.preempt + self.duration_total
    }
}

pub fn radius(circle_size: f32) -> f32 {
    54.4 - 4.48 * circle_size
}

pub fn fade_in(approach_rate: f32) -> f32 {
    if approach_rate < 5.0 {
        800.0 + 400.0 * (5.0 - approach_rate) / 5.0
    } else if approach_rate == 5.0 {
        800.0
    } else {
        800.0 - 500.0 * (approach_rate - 5.0) / 5.0
    }
}

pub fn preempt(approach_rate: f32) -> f32 {
    if approach_rate < 5.0 {
        1200.0 + 600.0 * (5.0 - approach_rate) / 5.0
    } else if approach_rate == 5.0 {
        1200.0
    } else {
        1200.0 - 750.0 * (approach_rate - 5.0) / 5.0
    }
}

/// Time for one pass over a slider of `pixel_length`.
pub fn slider_duration(pixel_length: f32, slider_multiplier: f32) -> f32 {
    pixel_length / (slider_multiplier.max(0.01) * 100.0 * SLIDER_VELOCITY) * BEAT_LENGTH_MS
}
