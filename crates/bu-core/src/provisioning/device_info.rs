//! Device information returned by the vendor server once a device reports in.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

// Keys used by the vendor SDK's token status payload.
pub const SDK_IMPEE_ID_KEY: &str = "impee_id";
pub const SDK_PLAN_ID_KEY: &str = "plan_id";
pub const SDK_AGENT_URL_KEY: &str = "agent_url";
pub const SDK_CLAIMED_AT_KEY: &str = "claimed_at";

/// Raw key/value payload handed over by the gateway.
pub type RawDeviceInfo = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceInfoError {
    #[error("device info field `{0}` is missing")]
    MissingField(&'static str),

    #[error("device info field `{0}` is not a string")]
    NotAString(&'static str),
}

/// Flat record sent to the host inside `completed` messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    #[serde(rename = "deviceId")]
    pub device_id: String,
    #[serde(rename = "planId")]
    pub plan_id: String,
    #[serde(rename = "agentURL")]
    pub agent_url: String,
    #[serde(rename = "verificationDate")]
    pub verification_date: String,
}

impl DeviceInfo {
    /// Extracts the four required fields from a vendor payload.
    ///
    /// All fields are required. A missing or non-string field fails the whole
    /// parse; there is no partially populated record.
    pub fn from_sdk_payload(raw: &RawDeviceInfo) -> Result<Self, DeviceInfoError> {
        let info = Self {
            device_id: required_str(raw, SDK_IMPEE_ID_KEY)?.trim().to_string(),
            plan_id: required_str(raw, SDK_PLAN_ID_KEY)?.to_string(),
            agent_url: required_str(raw, SDK_AGENT_URL_KEY)?.to_string(),
            verification_date: normalize_verification_date(required_str(
                raw,
                SDK_CLAIMED_AT_KEY,
            )?),
        };
        Ok(info)
    }
}

/// Rewrites a trailing `Z` UTC designator to `+0:00`.
///
/// The iOS bridge reports dates with an explicit offset, and host apps parse
/// both platforms' messages with the same code.
pub fn normalize_verification_date(raw: &str) -> String {
    match raw.strip_suffix('Z') {
        Some(prefix) => format!("{prefix}+0:00"),
        None => raw.to_string(),
    }
}

fn required_str<'a>(raw: &'a RawDeviceInfo, key: &'static str) -> Result<&'a str, DeviceInfoError> {
    match raw.get(key) {
        None | Some(Value::Null) => Err(DeviceInfoError::MissingField(key)),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(DeviceInfoError::NotAString(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> RawDeviceInfo {
        json!({
            "impee_id": "  0c2a69093e1fd9ae  ",
            "plan_id": "8f3b5ce2a1d4e7f0",
            "agent_url": "https://agent.electricimp.com/abc123",
            "claimed_at": "2015-06-18T17:34:12Z"
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn parses_complete_payload() {
        let info = DeviceInfo::from_sdk_payload(&payload()).unwrap();
        assert_eq!(info.device_id, "0c2a69093e1fd9ae");
        assert_eq!(info.plan_id, "8f3b5ce2a1d4e7f0");
        assert_eq!(info.agent_url, "https://agent.electricimp.com/abc123");
        assert_eq!(info.verification_date, "2015-06-18T17:34:12+0:00");
    }

    #[test]
    fn whitespace_only_device_id_becomes_empty() {
        let mut raw = payload();
        raw.insert("impee_id".into(), json!("   "));
        let info = DeviceInfo::from_sdk_payload(&raw).unwrap();
        assert_eq!(info.device_id, "");
    }

    #[test]
    fn each_missing_field_fails_the_parse() {
        for key in [
            SDK_IMPEE_ID_KEY,
            SDK_PLAN_ID_KEY,
            SDK_AGENT_URL_KEY,
            SDK_CLAIMED_AT_KEY,
        ] {
            let mut raw = payload();
            raw.remove(key);
            assert_eq!(
                DeviceInfo::from_sdk_payload(&raw),
                Err(DeviceInfoError::MissingField(key)),
                "missing {key} should fail"
            );
        }
    }

    #[test]
    fn null_field_counts_as_missing() {
        let mut raw = payload();
        raw.insert("plan_id".into(), Value::Null);
        assert_eq!(
            DeviceInfo::from_sdk_payload(&raw),
            Err(DeviceInfoError::MissingField(SDK_PLAN_ID_KEY))
        );
    }

    #[test]
    fn non_string_field_fails_the_parse() {
        let mut raw = payload();
        raw.insert("agent_url".into(), json!(42));
        assert_eq!(
            DeviceInfo::from_sdk_payload(&raw),
            Err(DeviceInfoError::NotAString(SDK_AGENT_URL_KEY))
        );
    }

    #[test]
    fn only_trailing_z_is_rewritten() {
        assert_eq!(
            normalize_verification_date("2015-06-18T17:34:12Z"),
            "2015-06-18T17:34:12+0:00"
        );
        assert_eq!(
            normalize_verification_date("2015-06-18T17:34:12+02:00"),
            "2015-06-18T17:34:12+02:00"
        );
        assert_eq!(normalize_verification_date("Zulu"), "Zulu");
    }

    #[test]
    fn serializes_with_host_field_names() {
        let info = DeviceInfo::from_sdk_payload(&payload()).unwrap();
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(
            value,
            json!({
                "deviceId": "0c2a69093e1fd9ae",
                "planId": "8f3b5ce2a1d4e7f0",
                "agentURL": "https://agent.electricimp.com/abc123",
                "verificationDate": "2015-06-18T17:34:12+0:00"
            })
        );
    }
}
