//! Logic thread and the simulation it drives.
//!
//! The thread owns the beatmap store and a single play session. It advances the session at the
//! configured tick rate, feeding replay inputs plus any live input from the bus, and reports
//! judgements, snapshots and the final result back over the `SystemBus`.

pub mod autoplay;
pub mod controller;
pub mod judgement;
pub mod replay_engine;
pub mod session;
pub mod visibility;
pub mod world;

use crate::beatmap::BeatmapStore;
use crate::logic::replay_engine::ReplayEngine;
use crate::logic::session::PlaySession;
use crate::models::replay::ReplayData;
use crate::models::settings::Settings;
use crate::system::bus::{PlayResult, SimEvent, SystemBus, SystemEvent};
use std::io;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Spawns the logic thread for one run over the beatmap at `map_path`.
///
/// Without a `replay` the run is driven by autoplay. The thread exits after sending
/// `SimEvent::Finished`, or `SimEvent::LoadFailed` when the beatmap cannot be read.
pub fn start_thread(
    bus: SystemBus,
    settings: Settings,
    map_path: PathBuf,
    replay: Option<ReplayData>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("Logic Thread".to_string())
        .spawn(move || run(bus, settings, map_path, replay))
}

fn run(bus: SystemBus, settings: Settings, map_path: PathBuf, replay: Option<ReplayData>) {
    log::info!("LOGIC: Thread started");

    let mut store = BeatmapStore::new();
    let handle = match store.load(&map_path) {
        Ok(handle) => handle,
        Err(e) => {
            log::error!("LOGIC: Failed to load {:?}: {}", map_path, e);
            let _ = bus.event_tx.send(SimEvent::LoadFailed(e.to_string()));
            return;
        }
    };
    let Some(beatmap) = store.get(handle) else {
        let _ = bus.event_tx.send(SimEvent::LoadFailed("beatmap vanished from store".to_string()));
        return;
    };

    let pixels = settings.pixels();
    let replay = match replay {
        Some(replay) => {
            if replay.beatmap_hash != beatmap.hash {
                log::warn!(
                    "REPLAY: Recorded on {} but playing {}, judgements may differ",
                    replay.beatmap_hash,
                    beatmap.hash
                );
            }
            replay
        }
        None => {
            log::info!("REPLAY: No replay given, using autoplay");
            autoplay::generate(&beatmap, &pixels)
        }
    };

    let step_ms = settings.simulation.step_ms();
    let session = PlaySession::new(handle, pixels).with_hit_window(settings.judgement.hit_window());
    let mut engine = ReplayEngine::new(session, &replay, step_ms);
    let started = Instant::now();
    let mut completed = true;

    log::info!(
        "LOGIC: Playing {} objects at {} ticks/s{}",
        beatmap.hit_objects.len(),
        settings.simulation.tick_rate,
        if settings.simulation.realtime { " (realtime)" } else { "" }
    );

    'run: loop {
        // 1. Live input
        while let Ok((time_ms, event)) = bus.input_rx.try_recv() {
            engine.queue_input(time_ms, event);
        }

        // 2. System events
        while let Ok(sys_evt) = bus.sys_rx.try_recv() {
            match sys_evt {
                SystemEvent::Quit => {
                    log::info!("LOGIC: Quit received...");
                    completed = false;
                    break 'run;
                }
                SystemEvent::Resize { width, height } => {
                    let mut pixels = engine.session().pixels();
                    pixels.update_size(width, height, (settings.playfield.width, settings.playfield.height));
                    engine.session_mut().set_pixels(pixels);
                    log::info!("LOGIC: Display resized to {}x{}", width, height);
                }
            }
        }

        // 3. Simulation step
        let output = engine.step(&store);
        for event in output.judgements {
            let _ = bus.event_tx.send(SimEvent::Judgement(event));
        }
        let _ = bus.render_tx.try_send(engine.session().snapshot());

        if engine.is_finished() || engine.session().is_finished() {
            break;
        }

        // 4. Pace against the wall clock
        if settings.simulation.realtime {
            let target = Duration::from_millis(engine.clock_ms().max(0) as u64);
            if let Some(wait) = target.checked_sub(started.elapsed()) {
                thread::sleep(wait);
            }
        }
    }

    let mut recorded = ReplayData::new(beatmap.hash.clone());
    for input in engine.inputs() {
        recorded.add_input(input.time_ms, input.event);
    }

    let score = engine.session().score().clone();
    log::info!(
        "LOGIC: Run over at {} ms, score {} ({:.2}%)",
        engine.clock_ms(),
        score.score,
        score.accuracy()
    );
    let _ = bus.event_tx.send(SimEvent::Finished(PlayResult {
        beatmap_hash: beatmap.hash.clone(),
        score,
        replay: recorded,
        completed,
    }));
}
