//! Vendor provisioning SDK port.
//!
//! The BlinkUp SDK is closed source and callback driven. Adapters wrap it so
//! that every capability is a plain async call, and the device status poll
//! resolves to exactly one of three outcomes.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::provisioning::{ApiKey, RawDeviceInfo};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The vendor server refused the API key during Wi-Fi selection.
    #[error("api key verification failed: {0}")]
    ApiKeyRejected(String),

    /// Any other failure reported by the SDK, with its message.
    #[error("{0}")]
    Sdk(String),
}

/// How the Wi-Fi selection flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupFlowOutcome {
    /// Credentials were flashed to the device; poll for its status next.
    DeviceHandoff,
    /// The user chose to clear the device's Wi-Fi settings instead.
    WifiCleared,
}

/// Terminal result of polling the vendor server for the device's status.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Success(Option<RawDeviceInfo>),
    Error(String),
    Timeout,
}

#[async_trait]
pub trait ProvisioningGatewayPort: Send + Sync {
    /// Request a setup token for the given key.
    async fn acquire_setup_token(&self, api_key: &ApiKey) -> Result<(), GatewayError>;

    /// Show the vendor Wi-Fi selection UI and hand the network over to the
    /// device. `plan_id` of `None` lets the SDK generate a new one.
    async fn select_wifi_and_setup_device(
        &self,
        api_key: &ApiKey,
        plan_id: Option<&str>,
    ) -> Result<SetupFlowOutcome, GatewayError>;

    /// Poll until the device reports in, the server reports an error, or
    /// `timeout` elapses.
    async fn poll_device_status(&self, timeout: Duration) -> PollOutcome;

    /// Stop an in-flight poll. A no-op when nothing is polling.
    async fn cancel_polling(&self);

    /// Clear the Wi-Fi settings of a previously provisioned device.
    async fn clear_device(&self) -> Result<(), GatewayError>;
}
