//! Adapters binding the provisioning ports to Tauri and the vendor SDK.

pub mod gateway;
pub mod sink;

#[cfg(target_os = "android")]
pub use gateway::MobileProvisioningGateway;
pub use gateway::UnsupportedGateway;
pub use sink::{ResultEventPayload, TauriEventResultSink, RESULT_EVENT};
