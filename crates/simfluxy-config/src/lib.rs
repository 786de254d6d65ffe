//! Configuration for the simfluxy state container
//!
//! This crate provides:
//! - Store configuration (StoreConfig) with serde defaults
//! - Config file discovery and loading (TOML)

pub mod config_file;
pub mod store_config;

pub use config_file::{load_config_file, read_first};
pub use store_config::StoreConfig;
