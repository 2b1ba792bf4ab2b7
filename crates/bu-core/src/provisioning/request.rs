use std::time::Duration;

use thiserror::Error;

use super::api_key::ApiKey;
use crate::codes::PluginErrorCode;

/// Largest timeout the vendor SDK honours.
pub const MAX_TIMEOUT_MS: u64 = 60_000;

/// Synchronous rejection of a host command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectionError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("api key must be 32 alphanumeric characters")]
    InvalidApiKey,
}

impl RejectionError {
    pub fn plugin_code(&self) -> PluginErrorCode {
        match self {
            RejectionError::InvalidArguments(_) => PluginErrorCode::InvalidArguments,
            RejectionError::InvalidApiKey => PluginErrorCode::InvalidApiKey,
        }
    }
}

/// Arguments of a `start` command as received from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningRequest {
    pub api_key: String,
    pub developer_plan_id: String,
    pub is_development_mode: bool,
    pub timeout_ms: u64,
}

impl ProvisioningRequest {
    /// Checks the request and converts it into the session's owned form.
    ///
    /// The API key is checked before the plan id so that an empty key always
    /// reports `INVALID_API_KEY`. Timeouts above `max_timeout_ms` are clamped.
    pub fn validate(self, max_timeout_ms: u64) -> Result<ValidatedRequest, RejectionError> {
        let api_key = ApiKey::parse(self.api_key).ok_or(RejectionError::InvalidApiKey)?;

        if self.developer_plan_id.is_empty() {
            return Err(RejectionError::InvalidArguments(
                "developer plan id must not be empty".to_string(),
            ));
        }

        if self.timeout_ms == 0 {
            return Err(RejectionError::InvalidArguments(
                "timeout must be a positive number of milliseconds".to_string(),
            ));
        }

        let timeout_ms = if self.timeout_ms > max_timeout_ms {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                requested_ms = self.timeout_ms,
                max_ms = max_timeout_ms,
                "requested timeout exceeds maximum, clamping"
            );
            max_timeout_ms
        } else {
            self.timeout_ms
        };

        Ok(ValidatedRequest {
            api_key,
            developer_plan_id: self.developer_plan_id,
            is_development_mode: self.is_development_mode,
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

/// A request that passed validation. Owned by exactly one session.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    api_key: ApiKey,
    developer_plan_id: String,
    is_development_mode: bool,
    timeout: Duration,
}

impl ValidatedRequest {
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn developer_plan_id(&self) -> &str {
        &self.developer_plan_id
    }

    pub fn is_development_mode(&self) -> bool {
        self.is_development_mode
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
