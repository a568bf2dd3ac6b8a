//! On-disk persistence.

pub mod replay_storage;
