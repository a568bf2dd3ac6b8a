//! Per-beatmap simulation owner: clock, difficulty and the ordered object ids.

use crate::beatmap::{Beatmap, BeatmapHandle, Difficulty};
use crate::logic::world::{ObjectId, World};

#[derive(Debug)]
pub struct BeatmapController {
    pub beatmap: BeatmapHandle,
    pub difficulty: Difficulty,
    /// Playback time in milliseconds.
    pub current_time: i64,
    /// Time of the last hit object.
    pub max_time: i64,
    /// Owned objects in beatmap order.
    pub objects: Vec<ObjectId>,
    initialised: bool,
}

impl BeatmapController {
    pub fn new(beatmap: BeatmapHandle) -> Self {
        Self {
            beatmap,
            difficulty: Difficulty::default(),
            current_time: 0,
            max_time: 0,
            objects: Vec::new(),
            initialised: false,
        }
    }

    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    /// Spawns every hit object of `beatmap` into `world`. Runs once per controller.
    pub fn initialise(&mut self, world: &mut World, beatmap: &Beatmap) {
        if self.initialised {
            return;
        }

        self.difficulty = beatmap.difficulty;
        self.current_time = 0;
        self.max_time = beatmap.last_object_time() as i64;
        self.objects = beatmap
            .hit_objects
            .iter()
            .map(|object| world.spawn(object.clone()))
            .collect();
        self.initialised = true;

        log::info!(
            "LOGIC: Controller initialised with {} objects (max time {} ms)",
            self.objects.len(),
            self.max_time
        );
    }

    /// Moves the clock forward by `dt_ms`.
    pub fn advance(&mut self, dt_ms: i64) {
        self.current_time += dt_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beatmap::{BeatmapStore, HitObject};

    #[test]
    fn test_initialise_spawns_in_order_once() {
        let mut store = BeatmapStore::new();
        let beatmap = Beatmap {
            hit_objects: vec![HitObject::circle(1, 1, 300), HitObject::circle(2, 2, 900)],
            ..Default::default()
        };
        let handle = store.add(beatmap.clone());

        let mut world = World::new();
        let mut controller = BeatmapController::new(handle);
        controller.initialise(&mut world, &beatmap);
        controller.initialise(&mut world, &beatmap);

        assert!(controller.is_initialised());
        assert_eq!(controller.objects.len(), 2);
        assert_eq!(world.len(), 2);
        assert_eq!(controller.max_time, 900);
        assert_eq!(world.object(controller.objects[1]).x, 2);

        controller.advance(16);
        controller.advance(16);
        assert_eq!(controller.current_time, 32);
    }
}
