//! Hover test, hit judgement and miss detection.
//!
//! An object is judged at most once per visibility lifetime. The judgement marker stored in
//! the world is what enforces that; it is dropped again when the lifetime ends.

use crate::input::CursorState;
use crate::logic::controller::BeatmapController;
use crate::logic::world::{JudgementResult, ObjectId, VisibilityState, World};
use crate::models::engine::{HitWindow, PixelSystem, object_position};
use crate::models::stats::Judgement;
use crate::shared::snapshot::JudgementEvent;

/// True when `cursor` (beatmap space) is strictly inside the circle at `center`.
pub fn is_hovered(center: (f32, f32), cursor: (f32, f32), radius: f32) -> bool {
    let dx = cursor.0 - center.0;
    let dy = cursor.1 - center.1;
    (dx * dx + dy * dy).sqrt() < radius
}

/// Ends the lifetime of every object in `disappeared`.
///
/// Objects that were never judged produce a `Miss`; judged ones just lose their marker.
pub fn detect_misses(
    world: &mut World,
    disappeared: &[(ObjectId, VisibilityState)],
    pixels: &PixelSystem,
    time: i64,
) -> Vec<JudgementEvent> {
    let mut misses = Vec::new();
    for &(id, last) in disappeared {
        if world.remove_judgement(id).is_some() {
            continue;
        }
        let position = object_position(world.object(id), last.slider_t);
        misses.push(JudgementEvent {
            object: id,
            judgement: Judgement::Miss,
            screen_position: pixels.to_device(position),
            time,
        });
    }
    misses
}

/// Judges every visible, unjudged object under the cursor. Call only when a press is pending.
pub fn judge_hovered(
    world: &mut World,
    controller: &BeatmapController,
    cursor: &CursorState,
    pixels: &PixelSystem,
    hit_window: &HitWindow,
) -> Vec<JudgementEvent> {
    let cursor_position = pixels.to_beatmap(cursor.position);
    let mut hits = Vec::new();

    for &id in &controller.objects {
        if world.judgement(id).is_some() {
            continue;
        }
        let (Some(state), Some(props)) = (world.visibility(id).copied(), world.difficulty(id).copied())
        else {
            continue;
        };

        let position = object_position(world.object(id), state.slider_t);
        if !is_hovered(position, cursor_position, props.radius) {
            continue;
        }

        let judgement = hit_window.judge(state.approach_amount);
        let screen_position = pixels.to_device(position);
        world.set_judgement(
            id,
            JudgementResult {
                judgement,
                screen_position,
            },
        );
        hits.push(JudgementEvent {
            object: id,
            judgement,
            screen_position,
            time: controller.current_time,
        });
    }

    hits
}
