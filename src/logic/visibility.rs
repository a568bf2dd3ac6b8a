//! Visibility windows, approach rings and slider progress.
//!
//! An object is visible while `0 < dt < preempt + duration_total`, with `dt` the time elapsed
//! since its nominal time. Leaving the window removes its state; that removal is what the
//! miss detection stage listens for.

use crate::logic::controller::BeatmapController;
use crate::logic::world::{ObjectId, VisibilityState, World};
use crate::models::engine::DifficultyProperties;

/// Objects whose visibility changed during one update.
#[derive(Debug, Default)]
pub struct VisibilityChanges {
    pub appeared: Vec<ObjectId>,
    /// Removed objects with their last state.
    pub disappeared: Vec<(ObjectId, VisibilityState)>,
}

/// 1.0 at `dt = 0`, decaying linearly to 0.5 at `dt = preempt`.
pub fn approach_amount(dt: f32, preempt: f32) -> f32 {
    if preempt <= 0.0 {
        return 0.5;
    }
    let progress = dt.clamp(0.0, preempt) / preempt;
    1.0 + (0.5 - 1.0) * progress
}

/// Ping-pong position along the slider path once the object has landed.
pub fn slider_t(dt: f32, props: &DifficultyProperties) -> f32 {
    if dt < props.preempt || props.duration_single <= 0.0 {
        return 0.0;
    }
    let duration_factor = dt - props.preempt;
    let iteration = (duration_factor / props.duration_single).floor();
    let slide_time = duration_factor - iteration * props.duration_single;
    let t = slide_time / props.duration_single;
    if iteration as i64 % 2 == 0 { t } else { 1.0 - t }
}

/// Fade-in opacity in `[0, 1]`.
pub fn opacity(time_since_spawn: f32, fade_in: f32) -> f32 {
    if fade_in <= 0.0 {
        return 1.0;
    }
    time_since_spawn.clamp(0.0, fade_in) / fade_in
}

/// State of an object `dt` ms after its nominal time, or `None` outside the window.
pub fn compute(dt: f32, props: &DifficultyProperties) -> Option<VisibilityState> {
    if dt <= 0.0 || dt >= props.lifetime() {
        return None;
    }
    Some(VisibilityState {
        time_since_spawn: dt,
        approach_amount: approach_amount(dt, props.preempt),
        slider_t: slider_t(dt, props),
    })
}

/// Recomputes visibility for every object of `controller` at its current time.
pub fn update(world: &mut World, controller: &BeatmapController) -> VisibilityChanges {
    let mut changes = VisibilityChanges::default();

    for &id in &controller.objects {
        let Some(props) = world.difficulty(id).copied() else {
            continue;
        };
        let dt = (controller.current_time - world.object(id).time as i64) as f32;

        match compute(dt, &props) {
            Some(state) => {
                if world.set_visibility(id, state) {
                    changes.appeared.push(id);
                }
            }
            None => {
                if let Some(last) = world.remove_visibility(id) {
                    changes.disappeared.push((id, last));
                }
            }
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beatmap::{Beatmap, BeatmapStore, HitObject};

    fn circle_props() -> DifficultyProperties {
        DifficultyProperties {
            radius: 36.48,
            preempt: 1200.0,
            fade_in: 800.0,
            duration_single: 0.0,
            duration_total: 0.0,
        }
    }

    fn slider_props(d: f32, slides: f32) -> DifficultyProperties {
        DifficultyProperties {
            duration_single: d,
            duration_total: d * slides,
            ..circle_props()
        }
    }

    #[test]
    fn test_approach_endpoints_and_monotonic() {
        assert_eq!(approach_amount(0.0, 1200.0), 1.0);
        assert_eq!(approach_amount(1200.0, 1200.0), 0.5);
        let mut last = approach_amount(0.0, 1200.0);
        for step in 1..=120 {
            let current = approach_amount(step as f32 * 10.0, 1200.0);
            assert!(current < last);
            last = current;
        }
        // Stays closed past preempt.
        assert_eq!(approach_amount(5000.0, 1200.0), 0.5);
        assert_eq!(approach_amount(10.0, 0.0), 0.5);
    }

    #[test]
    fn test_window_bounds() {
        let props = circle_props();
        assert!(compute(-50.0, &props).is_none());
        assert!(compute(0.0, &props).is_none());
        assert!(compute(1.0, &props).is_some());
        assert!(compute(1199.0, &props).is_some());
        assert!(compute(1200.0, &props).is_none());

        let slider = slider_props(300.0, 2.0);
        assert!(compute(1700.0, &slider).is_some());
        assert!(compute(1800.0, &slider).is_none());
    }

    #[test]
    fn test_slider_ping_pong() {
        let d = 400.0;
        let props = slider_props(d, 3.0);
        assert_eq!(slider_t(props.preempt - 1.0, &props), 0.0);
        assert!((slider_t(props.preempt + 0.5 * d, &props) - 0.5).abs() < 1e-4);
        assert!((slider_t(props.preempt + 0.25 * d, &props) - 0.25).abs() < 1e-4);
        // Second pass runs backwards.
        assert!((slider_t(props.preempt + 1.5 * d, &props) - 0.5).abs() < 1e-4);
        assert!((slider_t(props.preempt + 1.25 * d, &props) - 0.75).abs() < 1e-4);
        assert!((slider_t(props.preempt + 2.25 * d, &props) - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_opacity_ramp() {
        assert_eq!(opacity(0.0, 800.0), 0.0);
        assert_eq!(opacity(400.0, 800.0), 0.5);
        assert_eq!(opacity(2000.0, 800.0), 1.0);
        assert_eq!(opacity(10.0, 0.0), 1.0);
    }

    #[test]
    fn test_update_reports_changes() {
        let beatmap = Beatmap {
            hit_objects: vec![HitObject::circle(0, 0, 1000)],
            ..Default::default()
        };
        let mut store = BeatmapStore::new();
        let handle = store.add(beatmap.clone());
        let mut world = World::new();
        let mut controller = BeatmapController::new(handle);
        controller.initialise(&mut world, &beatmap);
        world.derive_missing(&controller.objects, &controller.difficulty);
        let id = controller.objects[0];
        let preempt = world.difficulty(id).unwrap().preempt as i64;

        // Before its time the object has no state at all.
        for t in [0, 500, 999, 1000] {
            controller.current_time = t;
            let changes = update(&mut world, &controller);
            assert!(changes.appeared.is_empty());
            assert!(world.visibility(id).is_none());
        }

        controller.current_time = 1001;
        let changes = update(&mut world, &controller);
        assert_eq!(changes.appeared, vec![id]);

        controller.current_time = 1000 + preempt;
        let changes = update(&mut world, &controller);
        assert_eq!(changes.disappeared.len(), 1);
        assert_eq!(changes.disappeared[0].0, id);
        assert!(world.visibility(id).is_none());

        // Removal is reported once.
        controller.current_time += 100;
        assert!(update(&mut world, &controller).disappeared.is_empty());
    }
}
