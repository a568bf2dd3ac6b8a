//! Errors raised while loading a beatmap. Every variant aborts the whole load.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BeatmapError {
    #[error("failed to read beatmap: {0}")]
    Io(#[from] std::io::Error),

    #[error("beatmap is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("line {line}: invalid value {value:?} for {field}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: expected at least {expected} fields, found {found}")]
    MissingField {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid curve data ({reason})")]
    InvalidCurve { line: usize, reason: String },
}
