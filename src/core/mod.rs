// src/core/mod.rs
//! Configuration, storage and outbound service plumbing shared by the CLI and the API

pub mod config_manager;
pub mod database;
pub mod fs_ops;
pub mod gate;
pub mod service_client;

pub use config_manager::ConfigManager;
pub use database::Database;
pub use fs_ops::FsOps;
pub use gate::{AccessGate, FeatureFlag, GateDecision};
pub use service_client::{ExtractionError, ResumeExtractionClient};
