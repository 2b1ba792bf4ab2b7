//! # bu-infra
//!
//! Infrastructure adapters for the BlinkUp bridge: plan id persistence and
//! configuration loading.

pub mod config;
pub mod storage;

pub use config::{default_data_dir, load_config};
pub use storage::{FilePlanIdStore, InMemoryPlanIdStore};
