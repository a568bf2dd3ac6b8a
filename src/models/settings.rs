//! Runtime settings loaded from `settings.toml`.

use crate::models::engine::{HitWindow, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH, PixelSystem};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the settings file, relative to the working directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Beatmap coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConf {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayfieldConf {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

/// Device resolution cursor positions are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConf {
    pub width: u32,
    pub height: u32,
}

impl Default for DisplayConf {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 960,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConf {
    /// Logic ticks per second of playback time.
    pub tick_rate: u32,
    /// Pace ticks against the wall clock instead of running as fast as possible.
    pub realtime: bool,
}

impl Default for SimulationConf {
    fn default() -> Self {
        Self {
            tick_rate: 200,
            realtime: false,
        }
    }
}

impl SimulationConf {
    /// Playback time covered by one tick, never below 1 ms.
    pub fn step_ms(&self) -> i64 {
        (1000 / self.tick_rate.max(1) as i64).max(1)
    }
}

/// Approach thresholds for the 300 and 100 tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgementConf {
    pub great_approach: f32,
    pub good_approach: f32,
}

impl Default for JudgementConf {
    fn default() -> Self {
        let window = HitWindow::new();
        Self {
            great_approach: window.great_approach,
            good_approach: window.good_approach,
        }
    }
}

impl JudgementConf {
    pub fn hit_window(&self) -> HitWindow {
        HitWindow::from_custom(self.great_approach, self.good_approach)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConf {
    /// Write a compressed replay after every finished run.
    pub save: bool,
    pub dir: PathBuf,
}

impl Default for ReplayConf {
    fn default() -> Self {
        Self {
            save: false,
            dir: PathBuf::from("data/r"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playfield: PlayfieldConf,
    pub display: DisplayConf,
    pub simulation: SimulationConf,
    pub judgement: JudgementConf,
    pub replays: ReplayConf,
}

impl Settings {
    /// Reads `path`, falling back to defaults when the file is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("CONFIG: {:?} not found, using defaults", path);
            return Self::default();
        }
        match load_toml(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("CONFIG: Falling back to defaults ({})", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, content).map_err(|e| e.to_string())?;
        log::info!("CONFIG: Saved settings to {}", path.display());
        Ok(())
    }

    /// Scale between the configured display and playfield.
    pub fn pixels(&self) -> PixelSystem {
        PixelSystem::new(
            self.display.width,
            self.display.height,
            (self.playfield.width, self.playfield.height),
        )
    }
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    match toml::from_str(&content) {
        Ok(data) => Ok(data),
        Err(e) => {
            log::error!("CONFIG: Failed to parse TOML file {:?}: {}", path, e);
            Err(e.to_string())
        }
    }
}
