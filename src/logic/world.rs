//! Object arena for a play session.
//!
//! Every spawned hit object gets a stable `ObjectId`. Components live in parallel tables
//! indexed by that id; derived state is inserted and removed per tick instead of being
//! mutated through shared references.

use crate::beatmap::{Difficulty, HitObject};
use crate::models::engine::DifficultyProperties;
use crate::models::stats::Judgement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Per-tick visibility of an object. Present only while the object is inside its window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VisibilityState {
    /// Milliseconds since the object became eligible (`current_time - time`).
    pub time_since_spawn: f32,
    /// 1.0 at spawn, 0.5 once the ring has closed.
    pub approach_amount: f32,
    /// Position along the slider path in `[0, 1]`; 0 until the object has landed.
    pub slider_t: f32,
}

/// Marker left on an object once it has been judged in its current lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JudgementResult {
    pub judgement: Judgement,
    pub screen_position: (f32, f32),
}

#[derive(Debug, Default)]
pub struct World {
    objects: Vec<HitObject>,
    difficulty: Vec<Option<DifficultyProperties>>,
    visibility: Vec<Option<VisibilityState>>,
    judgements: Vec<Option<JudgementResult>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, object: HitObject) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(object);
        self.difficulty.push(None);
        self.visibility.push(None);
        self.judgements.push(None);
        id
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn object(&self, id: ObjectId) -> &HitObject {
        &self.objects[id.index()]
    }

    pub fn difficulty(&self, id: ObjectId) -> Option<&DifficultyProperties> {
        self.difficulty[id.index()].as_ref()
    }

    /// Derives properties for every object in `ids` that has none yet.
    /// Returns how many objects were filled in.
    pub fn derive_missing(&mut self, ids: &[ObjectId], difficulty: &Difficulty) -> usize {
        let mut derived = 0;
        for &id in ids {
            let slot = &mut self.difficulty[id.index()];
            if slot.is_some() {
                continue;
            }
            let props = DifficultyProperties::derive(difficulty, &self.objects[id.index()]);
            if props.radius <= 0.0 || props.preempt <= 0.0 {
                log::warn!(
                    "LOGIC: Degenerate difficulty for object {:?} (radius {}, preempt {})",
                    id,
                    props.radius,
                    props.preempt
                );
            }
            *slot = Some(props);
            derived += 1;
        }
        derived
    }

    pub fn visibility(&self, id: ObjectId) -> Option<&VisibilityState> {
        self.visibility[id.index()].as_ref()
    }

    /// Writes the state and returns whether the object was newly made visible.
    pub fn set_visibility(&mut self, id: ObjectId, state: VisibilityState) -> bool {
        self.visibility[id.index()].replace(state).is_none()
    }

    pub fn remove_visibility(&mut self, id: ObjectId) -> Option<VisibilityState> {
        self.visibility[id.index()].take()
    }

    pub fn judgement(&self, id: ObjectId) -> Option<&JudgementResult> {
        self.judgements[id.index()].as_ref()
    }

    pub fn set_judgement(&mut self, id: ObjectId, result: JudgementResult) {
        self.judgements[id.index()] = Some(result);
    }

    pub fn remove_judgement(&mut self, id: ObjectId) -> Option<JudgementResult> {
        self.judgements[id.index()].take()
    }
}
