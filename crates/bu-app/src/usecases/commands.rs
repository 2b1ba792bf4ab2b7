//! Host command parsing and dispatch.
//!
//! The host invokes an action by name with a positional JSON argument list:
//!
//! | Action | Arguments |
//! |---|---|
//! | `startBlinkUp` | `[apiKey, developerPlanId, isDevelopmentMode, timeoutMs]` |
//! | `abortBlinkUp` | `[]` |
//! | `clearBlinkUpData` | `[]` |

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use bu_core::provisioning::{ProvisioningRequest, RejectionError, ResultEnvelope};

use super::provisioning::{CommandAck, ProvisioningSession};

pub const ACTION_START: &str = "startBlinkUp";
pub const ACTION_ABORT: &str = "abortBlinkUp";
pub const ACTION_CLEAR: &str = "clearBlinkUpData";

const ARG_API_KEY: usize = 0;
const ARG_DEVELOPER_PLAN_ID: usize = 1;
const ARG_IS_DEVELOPMENT_MODE: usize = 2;
const ARG_TIMEOUT_MS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error(transparent)]
    Rejected(#[from] RejectionError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCommand {
    Start(ProvisioningRequest),
    Abort,
    Clear,
}

impl BridgeCommand {
    /// Parses an action name (case-insensitive) and its arguments.
    pub fn parse(action: &str, args: &[Value]) -> Result<Self, CommandError> {
        if action.eq_ignore_ascii_case(ACTION_START) {
            Ok(BridgeCommand::Start(parse_start_args(args)?))
        } else if action.eq_ignore_ascii_case(ACTION_ABORT) {
            Ok(BridgeCommand::Abort)
        } else if action.eq_ignore_ascii_case(ACTION_CLEAR) {
            Ok(BridgeCommand::Clear)
        } else {
            Err(CommandError::UnknownAction(action.to_string()))
        }
    }
}

/// Reads the positional `start` arguments. Types are checked, values are not.
pub fn parse_start_args(args: &[Value]) -> Result<ProvisioningRequest, RejectionError> {
    let api_key = string_arg(args, ARG_API_KEY, "apiKey")?;
    let developer_plan_id = string_arg(args, ARG_DEVELOPER_PLAN_ID, "developerPlanId")?;
    let is_development_mode = args
        .get(ARG_IS_DEVELOPMENT_MODE)
        .and_then(Value::as_bool)
        .ok_or_else(|| invalid("isDevelopmentMode", "a boolean"))?;
    let timeout_ms = args
        .get(ARG_TIMEOUT_MS)
        .and_then(Value::as_u64)
        .ok_or_else(|| invalid("timeoutMs", "a non-negative integer"))?;

    Ok(ProvisioningRequest {
        api_key,
        developer_plan_id,
        is_development_mode,
        timeout_ms,
    })
}

fn string_arg(args: &[Value], index: usize, name: &str) -> Result<String, RejectionError> {
    args.get(index)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| invalid(name, "a string"))
}

fn invalid(name: &str, expected: &str) -> RejectionError {
    RejectionError::InvalidArguments(format!("`{name}` must be {expected}"))
}

impl ProvisioningSession {
    /// Parses and runs a host command.
    ///
    /// Malformed arguments are reported to the host as `INVALID_ARGUMENTS`
    /// before returning. An unknown action is only returned; the host's
    /// bridge reports it as an invalid action.
    pub async fn execute(&self, action: &str, args: &[Value]) -> Result<CommandAck, CommandError> {
        let command = match BridgeCommand::parse(action, args) {
            Ok(command) => command,
            Err(CommandError::Rejected(err)) => {
                warn!(action, error = %err, "command arguments rejected");
                self.reporter()
                    .report(&ResultEnvelope::from_plugin_error(err.plugin_code()))
                    .await;
                return Err(err.into());
            }
            Err(err) => {
                warn!(action, "unknown bridge action");
                return Err(err);
            }
        };

        match command {
            BridgeCommand::Start(request) => Ok(self.start(request).await?),
            BridgeCommand::Abort => Ok(self.abort().await),
            BridgeCommand::Clear => Ok(self.clear().await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_start_arguments() {
        let args = [json!("A".repeat(32)), json!("dev123"), json!(true), json!(5000)];
        let command = BridgeCommand::parse("startBlinkUp", &args).unwrap();
        assert_eq!(
            command,
            BridgeCommand::Start(ProvisioningRequest {
                api_key: "A".repeat(32),
                developer_plan_id: "dev123".to_string(),
                is_development_mode: true,
                timeout_ms: 5000,
            })
        );
    }

    #[test]
    fn action_names_are_case_insensitive() {
        assert_eq!(
            BridgeCommand::parse("ABORTBLINKUP", &[]).unwrap(),
            BridgeCommand::Abort
        );
        assert_eq!(
            BridgeCommand::parse("clearblinkupdata", &[]).unwrap(),
            BridgeCommand::Clear
        );
    }

    #[test]
    fn unknown_action_is_not_a_rejection() {
        assert_eq!(
            BridgeCommand::parse("flashDevice", &[]),
            Err(CommandError::UnknownAction("flashDevice".to_string()))
        );
    }

    #[test]
    fn missing_arguments_are_invalid() {
        let err = BridgeCommand::parse("startBlinkUp", &[json!("A".repeat(32))]).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Rejected(RejectionError::InvalidArguments(_))
        ));
    }

    #[test]
    fn wrongly_typed_arguments_are_invalid() {
        let cases = [
            vec![json!(42), json!("dev"), json!(true), json!(5000)],
            vec![json!("k"), json!(null), json!(true), json!(5000)],
            vec![json!("k"), json!("dev"), json!("true"), json!(5000)],
            vec![json!("k"), json!("dev"), json!(true), json!(-1)],
            vec![json!("k"), json!("dev"), json!(true), json!("5000")],
        ];
        for args in cases {
            assert!(
                matches!(
                    parse_start_args(&args),
                    Err(RejectionError::InvalidArguments(_))
                ),
                "{args:?} should be rejected"
            );
        }
    }
}
