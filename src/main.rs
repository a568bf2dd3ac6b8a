//! Headless runner: plays a beatmap with a replay (or autoplay) and reports the result.

use hitcircle::logic;
use hitcircle::models::replay::ReplayData;
use hitcircle::models::settings::{SETTINGS_FILE, Settings};
use hitcircle::storage::replay_storage;
use hitcircle::system::bus::{SimEvent, SystemBus};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    if std::env::var_os("RUST_LOG").is_none() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    log::info!("MAIN: Booting hitcircle...");

    let mut args = std::env::args().skip(1);
    let Some(map_path) = args.next().map(PathBuf::from) else {
        eprintln!("usage: hitcircle <beatmap.osu> [replay.json | replay.r]");
        return ExitCode::from(2);
    };

    let replay = match args.next() {
        Some(path) => match load_replay(Path::new(&path)) {
            Ok(replay) => Some(replay),
            Err(e) => {
                log::error!("MAIN: Could not read replay {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let settings = Settings::load_or_default(Path::new(SETTINGS_FILE));
    let bus = SystemBus::new();

    let logic_thread = match logic::start_thread(bus.clone(), settings.clone(), map_path, replay) {
        Ok(handle) => handle,
        Err(e) => {
            log::error!("MAIN: Failed to spawn logic thread: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Only the logic thread keeps a sender, so a panic there ends the loop below.
    let event_rx = bus.event_rx.clone();
    drop(bus);

    let mut exit = ExitCode::SUCCESS;
    for event in event_rx.iter() {
        match event {
            SimEvent::Judgement(j) => {
                log::debug!(
                    "MAIN: {:?} at {} ms ({:.0}, {:.0})",
                    j.judgement,
                    j.time,
                    j.screen_position.0,
                    j.screen_position.1
                );
            }
            SimEvent::LoadFailed(e) => {
                log::error!("MAIN: {}", e);
                exit = ExitCode::FAILURE;
                break;
            }
            SimEvent::Finished(result) => {
                let s = &result.score;
                log::info!(
                    "MAIN: Score {} | Acc {:.2}% | Max combo {} | 300: {} 100: {} 50: {} Miss: {}",
                    s.score,
                    s.accuracy(),
                    s.max_combo,
                    s.hit300,
                    s.hit100,
                    s.hit50,
                    s.hit_miss
                );
                if settings.replays.save && result.completed {
                    if let Err(e) =
                        replay_storage::save_replay(&settings.replays.dir, &result.beatmap_hash, &result.replay)
                    {
                        log::error!("MAIN: Failed to save replay: {}", e);
                    }
                }
                break;
            }
        }
    }

    if logic_thread.join().is_err() {
        log::error!("MAIN: Logic thread panicked");
        exit = ExitCode::FAILURE;
    }
    exit
}

/// Reads a compressed `.r` replay or a JSON one.
fn load_replay(path: &Path) -> Result<ReplayData, String> {
    if path.extension().is_some_and(|ext| ext == "r") {
        return replay_storage::load_replay_from_path(path).map_err(|e| e.to_string());
    }
    let json = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    ReplayData::from_json(&json).map_err(|e| e.to_string())
}
