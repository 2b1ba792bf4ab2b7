//! # bu-app
//!
//! Provisioning use cases for the BlinkUp bridge: the session that drives the
//! vendor gateway, the result reporter, and host command dispatch.

pub mod deps;
pub mod usecases;

pub use deps::ProvisioningDeps;
pub use usecases::{BridgeCommand, CommandAck, CommandError, ProvisioningSession};
