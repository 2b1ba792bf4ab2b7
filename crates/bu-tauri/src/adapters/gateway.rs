//! Provisioning gateway adapters.
//!
//! On Android the vendor SDK is reached through the plugin's Kotlin half.
//! Every other target gets [`UnsupportedGateway`], which reports each flow as
//! an SDK failure so the host sees a normal error envelope.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use bu_core::ports::{GatewayError, PollOutcome, ProvisioningGatewayPort, SetupFlowOutcome};
use bu_core::provisioning::ApiKey;

pub const UNSUPPORTED_PLATFORM_MESSAGE: &str = "BlinkUp is not available on this platform";

#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedGateway;

#[async_trait]
impl ProvisioningGatewayPort for UnsupportedGateway {
    async fn acquire_setup_token(&self, _api_key: &ApiKey) -> Result<(), GatewayError> {
        Err(GatewayError::Sdk(UNSUPPORTED_PLATFORM_MESSAGE.to_string()))
    }

    async fn select_wifi_and_setup_device(
        &self,
        _api_key: &ApiKey,
        _plan_id: Option<&str>,
    ) -> Result<SetupFlowOutcome, GatewayError> {
        warn!("BlinkUp setup requested on an unsupported platform");
        Err(GatewayError::Sdk(UNSUPPORTED_PLATFORM_MESSAGE.to_string()))
    }

    async fn poll_device_status(&self, _timeout: Duration) -> PollOutcome {
        PollOutcome::Error(UNSUPPORTED_PLATFORM_MESSAGE.to_string())
    }

    async fn cancel_polling(&self) {}

    async fn clear_device(&self) -> Result<(), GatewayError> {
        Err(GatewayError::Sdk(UNSUPPORTED_PLATFORM_MESSAGE.to_string()))
    }
}

#[cfg(target_os = "android")]
pub use mobile::MobileProvisioningGateway;

#[cfg(target_os = "android")]
mod mobile {
    use std::time::Duration;

    use async_trait::async_trait;
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Serialize};
    use tauri::plugin::PluginHandle;
    use tauri::Runtime;
    use tracing::{debug, warn};

    use bu_core::ports::{GatewayError, PollOutcome, ProvisioningGatewayPort, SetupFlowOutcome};
    use bu_core::provisioning::{ApiKey, RawDeviceInfo};

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct ApiKeyArgs {
        api_key: String,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct SetupArgs {
        api_key: String,
        plan_id: Option<String>,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct PollArgs {
        timeout_ms: u64,
    }

    #[derive(Deserialize)]
    #[serde(tag = "outcome", rename_all = "camelCase")]
    enum SetupResponse {
        DeviceHandoff,
        WifiCleared,
        ApiKeyRejected { message: String },
        Error { message: String },
    }

    #[derive(Deserialize)]
    #[serde(tag = "outcome", rename_all = "camelCase")]
    enum PollResponse {
        #[serde(rename_all = "camelCase")]
        Success { device_info: Option<RawDeviceInfo> },
        Error { message: String },
        Timeout,
    }

    #[derive(Serialize)]
    struct NoArgs {}

    #[derive(Deserialize)]
    struct Empty {}

    /// Drives the vendor SDK through the plugin's Android half.
    pub struct MobileProvisioningGateway<R: Runtime> {
        handle: PluginHandle<R>,
    }

    impl<R: Runtime> MobileProvisioningGateway<R> {
        pub fn new(handle: PluginHandle<R>) -> Self {
            Self { handle }
        }

        /// Mobile plugin calls block until the Kotlin side resolves.
        async fn call<A, T>(&self, command: &'static str, args: A) -> Result<T, GatewayError>
        where
            A: Serialize + Send + 'static,
            T: DeserializeOwned + Send + 'static,
        {
            let handle = self.handle.clone();
            tokio::task::spawn_blocking(move || handle.run_mobile_plugin::<T>(command, args))
                .await
                .map_err(|e| GatewayError::Sdk(format!("{command} task failed: {e}")))?
                .map_err(|e| GatewayError::Sdk(e.to_string()))
        }
    }

    #[async_trait]
    impl<R: Runtime> ProvisioningGatewayPort for MobileProvisioningGateway<R> {
        async fn acquire_setup_token(&self, api_key: &ApiKey) -> Result<(), GatewayError> {
            let args = ApiKeyArgs {
                api_key: api_key.as_str().to_string(),
            };
            self.call::<_, Empty>("acquireSetupToken", args).await?;
            Ok(())
        }

        async fn select_wifi_and_setup_device(
            &self,
            api_key: &ApiKey,
            plan_id: Option<&str>,
        ) -> Result<SetupFlowOutcome, GatewayError> {
            let args = SetupArgs {
                api_key: api_key.as_str().to_string(),
                plan_id: plan_id.map(str::to_string),
            };
            match self.call("selectWifiAndSetupDevice", args).await? {
                SetupResponse::DeviceHandoff => Ok(SetupFlowOutcome::DeviceHandoff),
                SetupResponse::WifiCleared => Ok(SetupFlowOutcome::WifiCleared),
                SetupResponse::ApiKeyRejected { message } => {
                    Err(GatewayError::ApiKeyRejected(message))
                }
                SetupResponse::Error { message } => Err(GatewayError::Sdk(message)),
            }
        }

        async fn poll_device_status(&self, timeout: Duration) -> PollOutcome {
            let args = PollArgs {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            };
            match self.call("pollDeviceStatus", args).await {
                Ok(PollResponse::Success { device_info }) => PollOutcome::Success(device_info),
                Ok(PollResponse::Error { message }) => PollOutcome::Error(message),
                Ok(PollResponse::Timeout) => PollOutcome::Timeout,
                Err(err) => PollOutcome::Error(err.to_string()),
            }
        }

        async fn cancel_polling(&self) {
            match self.call::<_, Empty>("cancelPolling", NoArgs {}).await {
                Ok(_) => debug!("device status polling cancelled"),
                Err(err) => warn!(error = %err, "failed to cancel device status polling"),
            }
        }

        async fn clear_device(&self) -> Result<(), GatewayError> {
            self.call::<_, Empty>("clearDevice", NoArgs {})
                .await
                .map(|_| ())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unsupported_gateway_fails_every_flow() {
        let gateway = UnsupportedGateway;
        let key = ApiKey::parse("A".repeat(32)).unwrap();

        assert_eq!(
            gateway.select_wifi_and_setup_device(&key, None).await,
            Err(GatewayError::Sdk(UNSUPPORTED_PLATFORM_MESSAGE.to_string()))
        );
        assert!(gateway.clear_device().await.is_err());
        assert_eq!(
            gateway.poll_device_status(Duration::from_secs(1)).await,
            PollOutcome::Error(UNSUPPORTED_PLATFORM_MESSAGE.to_string())
        );
    }
}
