//! # bu-core
//!
//! Core domain models and ports for the BlinkUp bridge.
//!
//! This crate contains the result envelope contract, request validation and
//! the port traits, without any infrastructure dependencies.

pub mod codes;
pub mod config;
pub mod ports;
pub mod provisioning;

// Re-export commonly used types at the crate root
pub use codes::{PluginErrorCode, StatusCode};
pub use config::BridgeConfig;
pub use provisioning::{
    DeviceInfo, ProvisioningRequest, RejectionError, ResultEnvelope, ValidatedRequest,
};
