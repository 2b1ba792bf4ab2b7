pub mod commands;
pub mod provisioning;

pub use commands::{BridgeCommand, CommandError};
pub use provisioning::{CommandAck, ProvisioningContext, ProvisioningSession, ResultReporter};
