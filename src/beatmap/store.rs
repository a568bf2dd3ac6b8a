//! Asset store for parsed beatmaps.
//!
//! Sessions never own a `Beatmap`; they hold a `BeatmapHandle` and ask the store each tick.
//! A handle can be reserved before its chart is available, in which case lookups return `None`
//! and the dependent systems skip their work.

use super::{Beatmap, BeatmapError, parse_file};
use std::path::Path;
use std::sync::Arc;

/// Stable reference to a slot in a `BeatmapStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BeatmapHandle(usize);

#[derive(Debug, Default)]
pub struct BeatmapStore {
    slots: Vec<Option<Arc<Beatmap>>>,
}

impl BeatmapStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an empty slot to be filled later with `insert`.
    pub fn reserve(&mut self) -> BeatmapHandle {
        self.slots.push(None);
        BeatmapHandle(self.slots.len() - 1)
    }

    /// Stores an already parsed beatmap.
    pub fn add(&mut self, beatmap: Beatmap) -> BeatmapHandle {
        self.slots.push(Some(Arc::new(beatmap)));
        BeatmapHandle(self.slots.len() - 1)
    }

    /// Fills (or replaces) the beatmap behind `handle`.
    pub fn insert(&mut self, handle: BeatmapHandle, beatmap: Beatmap) {
        if let Some(slot) = self.slots.get_mut(handle.0) {
            *slot = Some(Arc::new(beatmap));
        } else {
            log::warn!("STORE: Ignoring insert for unknown handle {:?}", handle);
        }
    }

    /// Parses the file at `path` and stores it. A failed parse stores nothing.
    pub fn load(&mut self, path: &Path) -> Result<BeatmapHandle, BeatmapError> {
        match parse_file(path) {
            Ok(beatmap) => {
                log::info!("STORE: Loaded {:?}", path);
                Ok(self.add(beatmap))
            }
            Err(e) => {
                log::error!("STORE: Failed to load beatmap {:?}: {}", path, e);
                Err(e)
            }
        }
    }

    /// Returns the beatmap if it has been loaded.
    pub fn get(&self, handle: BeatmapHandle) -> Option<Arc<Beatmap>> {
        self.slots.get(handle.0).and_then(|slot| slot.clone())
    }

    pub fn is_loaded(&self, handle: BeatmapHandle) -> bool {
        matches!(self.slots.get(handle.0), Some(Some(_)))
    }

    /// Drops the beatmap. The handle stays valid but resolves to nothing.
    pub fn unload(&mut self, handle: BeatmapHandle) {
        if let Some(slot) = self.slots.get_mut(handle.0) {
            *slot = None;
        }
    }
}
