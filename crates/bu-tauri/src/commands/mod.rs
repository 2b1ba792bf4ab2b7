//! BlinkUp bridge commands
//! BlinkUp 桥接命令
//!
//! Commands only acknowledge. Every result, including rejections, arrives
//! on the [`RESULT_EVENT`](crate::adapters::RESULT_EVENT) event.

use serde_json::Value;
use tauri::State;
use tracing::{info_span, Instrument};

use bu_app::usecases::commands::{ACTION_ABORT, ACTION_CLEAR, ACTION_START};
use bu_app::CommandError;

use crate::state::BridgeRuntime;

/// Run a bridge action by name with positional arguments.
/// 按名称执行桥接动作。
///
/// Returns `Err` for an unknown action or rejected arguments; the latter
/// has also been reported as an error envelope.
#[tauri::command]
pub async fn execute(
    runtime: State<'_, BridgeRuntime>,
    action: String,
    args: Option<Vec<Value>>,
) -> Result<(), String> {
    let span = info_span!("command.blinkup.execute", action = %action);
    dispatch(&runtime, &action, args.unwrap_or_default())
        .instrument(span)
        .await
}

#[tauri::command]
pub async fn start_blinkup(
    runtime: State<'_, BridgeRuntime>,
    args: Option<Vec<Value>>,
) -> Result<(), String> {
    let span = info_span!("command.blinkup.start");
    dispatch(&runtime, ACTION_START, args.unwrap_or_default())
        .instrument(span)
        .await
}

#[tauri::command]
pub async fn abort_blinkup(runtime: State<'_, BridgeRuntime>) -> Result<(), String> {
    let span = info_span!("command.blinkup.abort");
    dispatch(&runtime, ACTION_ABORT, Vec::new())
        .instrument(span)
        .await
}

#[tauri::command]
pub async fn clear_blinkup_data(runtime: State<'_, BridgeRuntime>) -> Result<(), String> {
    let span = info_span!("command.blinkup.clear");
    dispatch(&runtime, ACTION_CLEAR, Vec::new())
        .instrument(span)
        .await
}

/// Shared by every command. The follow-up work keeps running after the
/// acknowledgment is dropped.
pub(crate) async fn dispatch(
    runtime: &BridgeRuntime,
    action: &str,
    args: Vec<Value>,
) -> Result<(), String> {
    runtime
        .session()
        .execute(action, &args)
        .await
        .map(|_ack| ())
        .map_err(map_err)
}

fn map_err(err: CommandError) -> String {
    match err {
        CommandError::UnknownAction(action) => format!("invalid action: {action}"),
        CommandError::Rejected(rejection) => rejection.to_string(),
    }
}
