//! Headless osu!-style hit-circle gameplay simulation.

pub mod beatmap;
pub mod input;
pub mod logic;
pub mod models;
pub mod shared;
pub mod storage;
pub mod system;
