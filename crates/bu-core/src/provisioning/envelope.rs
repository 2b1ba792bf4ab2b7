//! The outward-facing result message.
//!
//! Every outcome of a host command (acknowledgment, completion, failure) is
//! expressed as one [`ResultEnvelope`] and serialized to the JSON shape the
//! host apps already parse:
//!
//! ```text
//! { "state": "started"|"completed", "statusCode": "200", "deviceInfo"?: {..} }
//! { "state": "error", "error": { "errorType": "blinkup"|"plugin",
//!                                "errorCode": "1", "errorMsg"?: "..." } }
//! ```

use serde::{Serialize, Serializer};

use super::device_info::{DeviceInfo, RawDeviceInfo};
use crate::codes::{PluginErrorCode, StatusCode, SDK_ERROR_CODE};

pub const STATE_STARTED: &str = "started";
pub const STATE_COMPLETED: &str = "completed";
pub const STATE_ERROR: &str = "error";

pub const ERROR_TYPE_SDK: &str = "blinkup";
pub const ERROR_TYPE_PLUGIN: &str = "plugin";

/// Pre-serialized `JSON_ERROR` message delivered when an envelope cannot be
/// serialized. Sent as-is; it never goes through the serializer again.
pub const FALLBACK_JSON_ERROR_MESSAGE: &str =
    r#"{"state":"error","error":{"errorType":"plugin","errorCode":"302"}}"#;

/// Coarse state of a message, as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Started,
    Completed,
    Error,
}

impl EnvelopeState {
    pub const fn as_str(self) -> &'static str {
        match self {
            EnvelopeState::Started => STATE_STARTED,
            EnvelopeState::Completed => STATE_COMPLETED,
            EnvelopeState::Error => STATE_ERROR,
        }
    }
}

/// Where an error came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// Reported by the vendor SDK; carries the SDK's own message.
    Sdk { message: String },
    /// Raised by the bridge.
    Plugin(PluginErrorCode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultEnvelope {
    Started {
        status_code: StatusCode,
    },
    Completed {
        status_code: StatusCode,
        device_info: Option<DeviceInfo>,
    },
    Error(EnvelopeError),
}

impl ResultEnvelope {
    /// Acknowledgment sent as soon as a `start` command is accepted.
    pub fn started() -> Self {
        ResultEnvelope::Started {
            status_code: StatusCode::GatheringInfo,
        }
    }

    /// Builds a `completed` message, parsing the device info if supplied.
    ///
    /// A payload that lacks any required field yields a `JSON_ERROR` plugin
    /// error instead of a partially filled record.
    pub fn from_success(status_code: StatusCode, raw_device_info: Option<&RawDeviceInfo>) -> Self {
        let device_info = match raw_device_info.map(DeviceInfo::from_sdk_payload).transpose() {
            Ok(info) => info,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::error!(error = %_err, "device info payload rejected");
                return Self::from_plugin_error(PluginErrorCode::JsonError);
            }
        };

        ResultEnvelope::Completed {
            status_code,
            device_info,
        }
    }

    pub fn from_sdk_error(message: impl Into<String>) -> Self {
        ResultEnvelope::Error(EnvelopeError::Sdk {
            message: message.into(),
        })
    }

    pub fn from_plugin_error(code: PluginErrorCode) -> Self {
        ResultEnvelope::Error(EnvelopeError::Plugin(code))
    }

    pub fn from_timeout() -> Self {
        Self::from_plugin_error(PluginErrorCode::ProcessTimedOut)
    }

    pub fn state(&self) -> EnvelopeState {
        match self {
            ResultEnvelope::Started { .. } => EnvelopeState::Started,
            ResultEnvelope::Completed { .. } => EnvelopeState::Completed,
            ResultEnvelope::Error(_) => EnvelopeState::Error,
        }
    }

    /// Error messages go to the host's error callback.
    pub fn is_error(&self) -> bool {
        matches!(self, ResultEnvelope::Error(_))
    }

    /// `completed` and `error` end a flow; `started` does not.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ResultEnvelope::Started { .. })
    }

    pub fn device_info(&self) -> Option<&DeviceInfo> {
        match self {
            ResultEnvelope::Completed { device_info, .. } => device_info.as_ref(),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Wire<'a> {
    Success {
        state: &'static str,
        #[serde(rename = "statusCode")]
        status_code: String,
        #[serde(rename = "deviceInfo", skip_serializing_if = "Option::is_none")]
        device_info: Option<&'a DeviceInfo>,
    },
    Error {
        state: &'static str,
        error: WireError<'a>,
    },
}

#[derive(Serialize)]
struct WireError<'a> {
    #[serde(rename = "errorType")]
    error_type: &'static str,
    #[serde(rename = "errorCode")]
    error_code: String,
    #[serde(rename = "errorMsg", skip_serializing_if = "Option::is_none")]
    error_msg: Option<&'a str>,
}

impl Serialize for ResultEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let state = self.state().as_str();
        let wire = match self {
            ResultEnvelope::Started { status_code } => Wire::Success {
                state,
                status_code: status_code.code().to_string(),
                device_info: None,
            },
            ResultEnvelope::Completed {
                status_code,
                device_info,
            } => Wire::Success {
                state,
                status_code: status_code.code().to_string(),
                device_info: device_info.as_ref(),
            },
            ResultEnvelope::Error(EnvelopeError::Sdk { message }) => Wire::Error {
                state,
                error: WireError {
                    error_type: ERROR_TYPE_SDK,
                    error_code: SDK_ERROR_CODE.to_string(),
                    error_msg: Some(message),
                },
            },
            ResultEnvelope::Error(EnvelopeError::Plugin(code)) => Wire::Error {
                state,
                error: WireError {
                    error_type: ERROR_TYPE_PLUGIN,
                    error_code: code.code().to_string(),
                    error_msg: None,
                },
            },
        };
        wire.serialize(serializer)
    }
}
