//! Provisioning domain: request validation, device info, result envelopes.

pub mod api_key;
pub mod device_info;
pub mod envelope;
pub mod phase;
pub mod request;

pub use api_key::{api_key_format_valid, ApiKey, API_KEY_LEN};
pub use device_info::{DeviceInfo, DeviceInfoError, RawDeviceInfo};
pub use envelope::{EnvelopeError, EnvelopeState, ResultEnvelope, FALLBACK_JSON_ERROR_MESSAGE};
pub use phase::{InvalidTransition, SessionEvent, SessionPhase};
pub use request::{ProvisioningRequest, RejectionError, ValidatedRequest, MAX_TIMEOUT_MS};
