//! One play session over a single beatmap.
//!
//! Each tick runs the stages in a fixed order:
//! controller initialisation, difficulty derivation, visibility, miss detection,
//! hover/judgement, then score accumulation. Dropping the session discards all of it.

use crate::beatmap::{BeatmapHandle, BeatmapStore};
use crate::input::{CursorState, InputEvent};
use crate::logic::controller::BeatmapController;
use crate::logic::world::{ObjectId, World};
use crate::logic::{judgement, visibility};
use crate::models::engine::{HitWindow, PixelSystem, object_position, render_points};
use crate::models::stats::ScoreAccumulator;
use crate::shared::snapshot::{GameplaySnapshot, JudgementEvent, VisibleObject};

/// What happened during one tick.
#[derive(Debug, Default)]
pub struct TickOutput {
    /// Judgements in arrival order (misses first, then hits).
    pub judgements: Vec<JudgementEvent>,
    pub appeared: Vec<ObjectId>,
    pub disappeared: Vec<ObjectId>,
}

pub struct PlaySession {
    controller: BeatmapController,
    world: World,
    score: ScoreAccumulator,
    cursor: CursorState,
    pixels: PixelSystem,
    hit_window: HitWindow,
    last_judgement: Option<JudgementEvent>,
}

impl PlaySession {
    pub fn new(beatmap: BeatmapHandle, pixels: PixelSystem) -> Self {
        Self {
            controller: BeatmapController::new(beatmap),
            world: World::new(),
            score: ScoreAccumulator::new(),
            cursor: CursorState::default(),
            pixels,
            hit_window: HitWindow::new(),
            last_judgement: None,
        }
    }

    pub fn with_hit_window(mut self, hit_window: HitWindow) -> Self {
        self.hit_window = hit_window;
        self
    }

    /// Buffers an input until the next tick.
    pub fn handle_input(&mut self, event: InputEvent) {
        self.cursor.apply(event);
    }

    pub fn pixels(&self) -> PixelSystem {
        self.pixels
    }

    pub fn set_pixels(&mut self, pixels: PixelSystem) {
        self.pixels = pixels;
    }

    /// Runs one simulation pass at `current_time` (ms). Does nothing while the beatmap
    /// behind the session's handle is not loaded.
    pub fn tick(&mut self, current_time: i64, store: &BeatmapStore) -> TickOutput {
        let Some(beatmap) = store.get(self.controller.beatmap) else {
            log::trace!("LOGIC: Beatmap not loaded yet, skipping tick");
            return TickOutput::default();
        };

        if !self.controller.is_initialised() {
            self.controller.initialise(&mut self.world, &beatmap);
        }
        self.controller.current_time = current_time;

        self.world
            .derive_missing(&self.controller.objects, &self.controller.difficulty);

        let changes = visibility::update(&mut self.world, &self.controller);

        let mut judgements =
            judgement::detect_misses(&mut self.world, &changes.disappeared, &self.pixels, current_time);

        if self.cursor.take_press() {
            judgements.extend(judgement::judge_hovered(
                &mut self.world,
                &self.controller,
                &self.cursor,
                &self.pixels,
                &self.hit_window,
            ));
        }

        for event in &judgements {
            self.score.apply(event.judgement);
            log::debug!(
                "LOGIC: {:?} on {:?} at {} ms (combo {})",
                event.judgement,
                event.object,
                current_time,
                self.score.combo
            );
        }
        if let Some(last) = judgements.last() {
            self.last_judgement = Some(*last);
        }

        TickOutput {
            judgements,
            appeared: changes.appeared,
            disappeared: changes.disappeared.into_iter().map(|(id, _)| id).collect(),
        }
    }

    /// Advances the controller clock by `dt_ms` and ticks.
    pub fn advance(&mut self, dt_ms: i64, store: &BeatmapStore) -> TickOutput {
        self.controller.advance(dt_ms);
        self.tick(self.controller.current_time, store)
    }

    pub fn current_time(&self) -> i64 {
        self.controller.current_time
    }

    pub fn score(&self) -> &ScoreAccumulator {
        &self.score
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn controller(&self) -> &BeatmapController {
        &self.controller
    }

    /// True once every object's window has closed.
    pub fn is_finished(&self) -> bool {
        if !self.controller.is_initialised() {
            return false;
        }
        let now = self.controller.current_time as f32;
        self.controller.objects.iter().all(|&id| {
            let object = self.world.object(id);
            match self.world.difficulty(id) {
                Some(props) => {
                    self.world.visibility(id).is_none() && now >= object.time as f32 + props.lifetime()
                }
                None => false,
            }
        })
    }

    /// Renderer/HUD view of the current tick.
    pub fn snapshot(&self) -> GameplaySnapshot {
        let mut visible_objects = Vec::new();
        for &id in &self.controller.objects {
            let (Some(state), Some(props)) = (self.world.visibility(id), self.world.difficulty(id))
            else {
                continue;
            };
            let object = self.world.object(id);
            visible_objects.push(VisibleObject {
                id,
                position: object_position(object, state.slider_t),
                radius: props.radius,
                approach_scale: state.approach_amount,
                slider_t: state.slider_t,
                opacity: visibility::opacity(state.time_since_spawn, props.fade_in),
                slider_points: render_points(object),
                judged: self.world.judgement(id).is_some(),
            });
        }

        GameplaySnapshot {
            current_time: self.controller.current_time,
            pixels: self.pixels,
            visible_objects,
            score: self.score.clone(),
            accuracy: self.score.accuracy(),
            last_judgement: self.last_judgement,
            remaining_objects: self
                .controller
                .objects
                .len()
                .saturating_sub(self.score.judged() as usize),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beatmap::{Beatmap, Curve, CurveType, HitObject};
    use crate::models::stats::Judgement;

    fn store_with(objects: Vec<HitObject>) -> (BeatmapStore, BeatmapHandle) {
        let mut store = BeatmapStore::new();
        let handle = store.add(Beatmap {
            hit_objects: objects,
            ..Default::default()
        });
        (store, handle)
    }

    fn press_at(session: &mut PlaySession, x: f32, y: f32) {
        session.handle_input(InputEvent::CursorMoved { x, y });
        session.handle_input(InputEvent::Press);
        session.handle_input(InputEvent::Release);
    }

    #[test]
    fn test_unloaded_beatmap_skips_ticks() {
        let mut store = BeatmapStore::new();
        let handle = store.reserve();
        let mut session = PlaySession::new(handle, PixelSystem::identity());

        let out = session.tick(1000, &store);
        assert!(out.judgements.is_empty());
        assert!(!session.controller().is_initialised());
        assert!(!session.is_finished());

        store.insert(
            handle,
            Beatmap {
                hit_objects: vec![HitObject::circle(0, 0, 500)],
                ..Default::default()
            },
        );
        let out = session.tick(1000, &store);
        assert_eq!(out.appeared.len(), 1);
    }

    #[test]
    fn test_invisible_before_object_time() {
        let (store, handle) = store_with(vec![HitObject::circle(0, 0, 2000)]);
        let mut session = PlaySession::new(handle, PixelSystem::identity());
        for t in (0..=2000).step_by(50) {
            session.tick(t, &store);
            let id = session.controller().objects[0];
            assert!(session.world().visibility(id).is_none(), "visible at {t}");
        }
    }

    #[test]
    fn test_miss_fires_when_window_closes() {
        let (store, handle) = store_with(vec![HitObject::circle(0, 0, 1000)]);
        let mut session = PlaySession::new(handle, PixelSystem::identity());
        session.tick(0, &store);
        let id = session.controller().objects[0];
        let preempt = session.world().difficulty(id).unwrap().preempt as i64;

        let out = session.tick(1000 + preempt - 1, &store);
        assert!(out.judgements.is_empty());

        let out = session.tick(1000 + preempt, &store);
        assert_eq!(out.judgements.len(), 1);
        assert_eq!(out.judgements[0].judgement, Judgement::Miss);
        assert_eq!(out.disappeared, vec![id]);
        assert_eq!(session.score().hit_miss, 1);
        assert!(session.is_finished());
    }

    #[test]
    fn test_hit_twice_yields_one_judgement_and_no_miss() {
        let (store, handle) = store_with(vec![HitObject::circle(100, 100, 1000)]);
        let mut session = PlaySession::new(handle, PixelSystem::identity());
        session.tick(1005, &store);

        press_at(&mut session, 100.0, 100.0);
        let out = session.tick(1010, &store);
        assert_eq!(out.judgements.len(), 1);
        assert_eq!(out.judgements[0].judgement, Judgement::Hit300);

        press_at(&mut session, 100.0, 100.0);
        assert!(session.tick(1020, &store).judgements.is_empty());

        let out = session.tick(5000, &store);
        assert!(out.judgements.is_empty());
        assert_eq!(session.score().hit300, 1);
        assert_eq!(session.score().hit_miss, 0);
        assert_eq!(session.score().combo, 1);
    }

    #[test]
    fn test_press_without_hover_does_nothing() {
        let (store, handle) = store_with(vec![HitObject::circle(100, 100, 0)]);
        let mut session = PlaySession::new(handle, PixelSystem::identity());
        press_at(&mut session, 400.0, 400.0);
        assert!(session.tick(10, &store).judgements.is_empty());

        // The press was consumed; moving onto the object alone does not hit it.
        session.handle_input(InputEvent::CursorMoved { x: 100.0, y: 100.0 });
        assert!(session.tick(20, &store).judgements.is_empty());
    }

    #[test]
    fn test_score_accumulates_in_order() {
        let (store, handle) = store_with(vec![
            HitObject::circle(100, 100, 0),
            HitObject::circle(300, 100, 0),
            HitObject::circle(500, 100, 5000),
        ]);
        let mut session = PlaySession::new(handle, PixelSystem::identity());
        session.tick(0, &store);
        press_at(&mut session, 100.0, 100.0);
        session.tick(10, &store);
        press_at(&mut session, 300.0, 100.0);
        session.tick(20, &store);
        session.tick(5010, &store);
        press_at(&mut session, 500.0, 100.0);
        session.tick(5020, &store);

        let score = session.score();
        assert_eq!(score.hit300, 3);
        assert_eq!(score.combo, 3);
        assert_eq!(score.score, 300 + 600 + 900);
        assert_eq!(score.score_raw, 900);
    }

    #[test]
    fn test_advance_moves_the_clock() {
        let (store, handle) = store_with(vec![HitObject::circle(0, 0, 100)]);
        let mut session = PlaySession::new(handle, PixelSystem::identity());
        session.advance(50, &store);
        assert_eq!(session.current_time(), 50);
        let out = session.advance(60, &store);
        assert_eq!(session.current_time(), 110);
        assert_eq!(out.appeared.len(), 1);
    }

    #[test]
    fn test_snapshot_descriptors() {
        let slider = HitObject::slider(
            100,
            100,
            0,
            Curve {
                curve_type: CurveType::Linear,
                control_points: vec![(200, 100)],
                slides: 1,
                length: 100.0,
            },
        );
        let (store, handle) = store_with(vec![slider]);
        let mut session = PlaySession::new(handle, PixelSystem::identity());
        session.tick(100, &store);

        let snap = session.snapshot();
        assert_eq!(snap.visible_objects.len(), 1);
        let obj = &snap.visible_objects[0];
        assert_eq!(obj.slider_points, Some(vec![(100, 100), (200, 100)]));
        assert_eq!(obj.slider_t, 0.0);
        assert_eq!(obj.position, (100.0, 100.0));
        assert!(obj.opacity > 0.0 && obj.opacity < 1.0);
        assert!(!obj.judged);
        assert_eq!(snap.remaining_objects, 1);

        // Halfway through the single pass.
        let preempt = session.world().difficulty(obj.id).unwrap().preempt as i64;
        session.tick(preempt + 150, &store);
        let snap = session.snapshot();
        let obj = &snap.visible_objects[0];
        assert!((obj.slider_t - 0.5).abs() < 0.01);
        assert!((obj.position.0 - 150.0).abs() < 1.0);
        assert_eq!(obj.opacity, 1.0);
    }
}
