//! Generates a replay that hits every object right after it spawns.

use crate::beatmap::Beatmap;
use crate::models::engine::PixelSystem;
use crate::models::replay::ReplayData;

/// Delay after an object's time before the press, in ms.
const PRESS_DELAY_MS: i64 = 1;
/// How long the button stays down.
const HOLD_MS: i64 = 30;

/// Cursor positions are device pixels under `pixels`, so the replay only lines up with a
/// session running at that same scale.
pub fn generate(beatmap: &Beatmap, pixels: &PixelSystem) -> ReplayData {
    let mut replay = ReplayData::new(beatmap.hash.clone());

    for object in &beatmap.hit_objects {
        // Move and press share a timestamp so stacked objects stay paired after sorting.
        let time = object.time as i64 + PRESS_DELAY_MS;
        let (x, y) = pixels.to_device((object.x as f32, object.y as f32));
        replay.add_move(time, x, y);
        replay.add_press(time);
        replay.add_release(time + HOLD_MS);
    }

    log::debug!(
        "REPLAY: Autoplay generated {} inputs for {} objects",
        replay.inputs.len(),
        beatmap.hit_objects.len()
    );
    replay
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beatmap::HitObject;
    use crate::input::InputEvent;

    #[test]
    fn test_inputs_follow_objects_in_device_space() {
        let beatmap = Beatmap {
            hit_objects: vec![HitObject::circle(100, 50, 1000), HitObject::spinner(256, 192, 2000)],
            hash: "h".to_string(),
            ..Default::default()
        };
        let replay = generate(&beatmap, &PixelSystem::new(1280, 960, (640.0, 480.0)));

        assert_eq!(replay.beatmap_hash, "h");
        assert_eq!(replay.inputs.len(), 6);
        assert_eq!(replay.inputs[0].time_ms, 1001);
        assert_eq!(replay.inputs[0].event, InputEvent::CursorMoved { x: 200.0, y: 100.0 });
        assert_eq!(replay.inputs[1].time_ms, 1001);
        assert_eq!(replay.inputs[1].event, InputEvent::Press);
        assert_eq!(replay.inputs[3].event, InputEvent::CursorMoved { x: 512.0, y: 384.0 });
    }
}
