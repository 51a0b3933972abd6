// src/core/mod.rs
//! Core services: configuration, database connection and file system helpers

pub mod config_manager;
pub mod database;
pub mod fs_ops;

pub use config_manager::{AppConfig, ConfigManager, LoggingConfig};
pub use database::Database;
pub use fs_ops::FsOps;
