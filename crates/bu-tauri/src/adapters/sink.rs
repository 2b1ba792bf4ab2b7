//! Result sink forwarding envelopes to the webview
//! 将结果信封转发到前端的结果通道

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Emitter, Runtime};

use bu_core::ports::{DeliveryStatus, ResultMessage, ResultSinkPort};

/// Event every provisioning result is emitted on.
pub const RESULT_EVENT: &str = "blinkup://result";

/// Event payload seen by the frontend.
///
/// `message` is the envelope's JSON text, passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEventPayload {
    pub ok: bool,
    pub message: String,
}

impl From<ResultMessage> for ResultEventPayload {
    fn from(message: ResultMessage) -> Self {
        Self {
            ok: message.status == DeliveryStatus::Ok,
            message: message.payload,
        }
    }
}

pub struct TauriEventResultSink<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriEventResultSink<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

#[async_trait]
impl<R: Runtime> ResultSinkPort for TauriEventResultSink<R> {
    async fn deliver(&self, message: ResultMessage) -> anyhow::Result<()> {
        self.app
            .emit(RESULT_EVENT, ResultEventPayload::from(message))
            .map_err(|e| anyhow::anyhow!("Failed to emit {}: {}", RESULT_EVENT, e))
    }
}
