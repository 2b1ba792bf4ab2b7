//! # bu-tauri
//!
//! Tauri plugin layer for the BlinkUp bridge.
//!
//! This crate provides:
//! - The `blinkup` plugin and its commands
//! - The result event adapter and the platform gateways
//! - Bootstrap: configuration, tracing, and dependency wiring
//!
//! ## Modules
//!
//! - **adapters**: Result sink and vendor gateway implementations
//! - **bootstrap**: Plugin entry point, config, tracing, wiring
//! - **commands**: Tauri command handlers
//! - **state**: Managed plugin state

pub mod adapters;
pub mod bootstrap;
pub mod commands;
pub mod state;

// Re-export commonly used types
pub use adapters::{ResultEventPayload, RESULT_EVENT};
pub use bootstrap::{init, init_tracing_subscriber};
pub use state::BridgeRuntime;
