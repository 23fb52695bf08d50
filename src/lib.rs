//! strength-log - relative strength analytics from workout logs
//!
//! The engine (`relative_strength`, `movement_pattern`) is pure. `repository`,
//! `commands` and `db` wire it to a SQLite store.

pub mod commands;
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod movement_pattern;
pub mod relative_strength;
pub mod repository;

#[cfg(test)]
mod test_utils;

pub use config::AppConfig;
pub use db::AppState;
pub use relative_strength::{compute_relative_strength, EngineError};
