//! Beatmap data model, text-format parser and the asset store that owns loaded charts.
//!
//! A `Beatmap` is immutable once parsed. Hit objects keep the order they had in the file;
//! nothing downstream re-sorts them.

pub mod error;
pub mod parser;
pub mod store;

pub use error::BeatmapError;
pub use parser::{parse, parse_file};
pub use store::{BeatmapHandle, BeatmapStore};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Integer control point in beatmap (osu!pixel) space.
pub type Point = (i32, i32);

/// `[General]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct General {
    /// Audio file, already resolved against the beatmap directory.
    pub audio_path: PathBuf,
    pub audio_lead_in: i32,
    pub audio_hash: String,
    pub preview_time: i32,
    pub countdown: i32,
}

/// `[Difficulty]` section. Every field defaults to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub hp_drain_rate: f32,
    pub circle_size: f32,
    pub overall_difficulty: f32,
    pub approach_rate: f32,
    pub slider_multiplier: f32,
    pub slider_tick_rate: f32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            hp_drain_rate: 1.0,
            circle_size: 1.0,
            overall_difficulty: 1.0,
            approach_rate: 1.0,
            slider_multiplier: 1.0,
            slider_tick_rate: 1.0,
        }
    }
}

/// Kind of a hit object, decoded from the type bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitObjectKind {
    Circle,
    Slider,
    Spinner,
}

impl HitObjectKind {
    pub const CIRCLE_BIT: i32 = 1 << 0;
    pub const SLIDER_BIT: i32 = 1 << 1;
    pub const SPINNER_BIT: i32 = 1 << 3;

    /// Circle wins over Slider; anything that is neither falls back to Spinner.
    pub fn from_bits(bits: i32) -> Self {
        if bits & Self::CIRCLE_BIT != 0 {
            HitObjectKind::Circle
        } else if bits & Self::SLIDER_BIT != 0 {
            HitObjectKind::Slider
        } else {
            HitObjectKind::Spinner
        }
    }
}

/// Slider path interpolation requested by the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveType {
    Bezier,
    Centripetal,
    Linear,
    PerfectCircle,
}

impl CurveType {
    pub fn from_char(c: char) -> Self {
        match c {
            'B' => CurveType::Bezier,
            'C' => CurveType::Centripetal,
            'L' => CurveType::Linear,
            _ => CurveType::PerfectCircle,
        }
    }
}

/// Slider path. The head position is not part of `control_points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub curve_type: CurveType,
    pub control_points: Vec<Point>,
    /// Number of passes over the path (1 = no repeat).
    pub slides: i32,
    /// Length in osu!pixels.
    pub length: f32,
}

/// Kind-specific data of a hit object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ObjectParams {
    #[default]
    None,
    Curve(Curve),
}

/// A single timed target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitObject {
    pub x: i32,
    pub y: i32,
    /// Nominal time in milliseconds.
    pub time: i32,
    pub kind: HitObjectKind,
    /// `Curve` exactly when `kind` is `Slider`.
    pub params: ObjectParams,
}

impl HitObject {
    pub fn circle(x: i32, y: i32, time: i32) -> Self {
        Self {
            x,
            y,
            time,
            kind: HitObjectKind::Circle,
            params: ObjectParams::None,
        }
    }

    pub fn slider(x: i32, y: i32, time: i32, curve: Curve) -> Self {
        Self {
            x,
            y,
            time,
            kind: HitObjectKind::Slider,
            params: ObjectParams::Curve(curve),
        }
    }

    pub fn spinner(x: i32, y: i32, time: i32) -> Self {
        Self {
            x,
            y,
            time,
            kind: HitObjectKind::Spinner,
            params: ObjectParams::None,
        }
    }

    /// Returns the slider curve, if any.
    pub fn curve(&self) -> Option<&Curve> {
        match &self.params {
            ObjectParams::Curve(curve) => Some(curve),
            ObjectParams::None => None,
        }
    }

    pub fn position(&self) -> Point {
        (self.x, self.y)
    }
}

/// A parsed chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Beatmap {
    /// Value of the `osu file format vN` header, when present.
    pub format_version: Option<u32>,
    pub general: General,
    pub difficulty: Difficulty,
    pub hit_objects: Vec<HitObject>,
    pub background_path: Option<PathBuf>,
    /// Lowercase hex md5 of the source bytes.
    pub hash: String,
}

impl Beatmap {
    /// Time of the last hit object, or 0 for an empty chart.
    pub fn last_object_time(&self) -> i32 {
        self.hit_objects.last().map(|h| h.time).unwrap_or(0)
    }
}
