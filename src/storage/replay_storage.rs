//! Replay file storage with Zstd compression.
//!
//! Replays are stored as compressed binary files in `{dir}/{hash}.r`.
//! Data is serialized with `bincode` before compression to minimize size.

use crate::models::replay::ReplayData;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zstd::stream::{decode_all, encode_all};

/// Zstd level used for replay files.
const COMPRESSION_LEVEL: i32 = 21;

/// Path of the replay file for `hash` inside `dir`.
pub fn replay_path(dir: &Path, hash: &str) -> PathBuf {
    dir.join(format!("{}.r", hash))
}

/// Compresses `data` into `{dir}/{hash}.r`, creating `dir` if needed.
pub fn save_replay(dir: &Path, hash: &str, data: &ReplayData) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let path = replay_path(dir, hash);
    let binary_data = bincode::serde::encode_to_vec(data, bincode::config::standard())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Serialization error: {}", e)))?;

    let compressed_data = encode_all(&binary_data[..], COMPRESSION_LEVEL)?;
    let mut file = File::create(&path)?;
    file.write_all(&compressed_data)?;

    log::info!(
        "REPLAY: Saved {} inputs to {:?} ({} bytes)",
        data.inputs.len(),
        path,
        compressed_data.len()
    );
    Ok(path)
}

pub fn load_replay(dir: &Path, hash: &str) -> io::Result<ReplayData> {
    load_replay_from_path(&replay_path(dir, hash))
}

/// Loads a replay from an explicit file path.
pub fn load_replay_from_path(path: &Path) -> io::Result<ReplayData> {
    let file = File::open(path)?;
    let binary_data = decode_all(file)?;

    let (data, _len): (ReplayData, usize) =
        bincode::serde::decode_from_slice(&binary_data, bincode::config::standard()).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Deserialization error: {}", e))
        })?;

    Ok(data)
}

/// Removes the replay for `hash`. Missing files are not an error.
pub fn delete_replay(dir: &Path, hash: &str) -> io::Result<()> {
    let path = replay_path(dir, hash);
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

pub fn replay_exists(dir: &Path, hash: &str) -> bool {
    replay_path(dir, hash).exists()
}
