//! Status and error codes reported to the host.
//!
//! The numeric values are part of the wire contract shared with the iOS
//! bridge and with existing host apps. Never renumber them.

use std::fmt;

/// Numeric code carried by every SDK (`"blinkup"`) error.
pub const SDK_ERROR_CODE: u16 = 1;

/// Status codes carried by `started` and `completed` messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// The device reported in to the vendor server.
    DeviceConnected,
    /// The Wi-Fi handoff finished and the device is being polled.
    GatheringInfo,
    /// The device's Wi-Fi settings were cleared.
    ClearWifiComplete,
    /// The device's Wi-Fi settings and the cached plan id were cleared.
    ClearWifiAndCacheComplete,
}

impl StatusCode {
    pub const fn code(self) -> u16 {
        match self {
            StatusCode::DeviceConnected => 0,
            StatusCode::GatheringInfo => 200,
            StatusCode::ClearWifiComplete => 201,
            StatusCode::ClearWifiAndCacheComplete => 202,
        }
    }

    /// Picks the clear-complete code depending on whether the plan id cache
    /// was wiped as part of the same clear.
    pub const fn clear_complete(cache_cleared: bool) -> Self {
        if cache_cleared {
            StatusCode::ClearWifiAndCacheComplete
        } else {
            StatusCode::ClearWifiComplete
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error codes raised by the bridge itself (`"plugin"` errors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginErrorCode {
    InvalidArguments,
    ProcessTimedOut,
    CancelledByUser,
    InvalidApiKey,
    VerifyApiKeyFail,
    JsonError,
}

impl PluginErrorCode {
    pub const fn code(self) -> u16 {
        match self {
            PluginErrorCode::InvalidArguments => 100,
            PluginErrorCode::ProcessTimedOut => 101,
            PluginErrorCode::CancelledByUser => 102,
            PluginErrorCode::InvalidApiKey => 103,
            PluginErrorCode::VerifyApiKeyFail => 301,
            PluginErrorCode::JsonError => 302,
        }
    }
}

impl fmt::Display for PluginErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
