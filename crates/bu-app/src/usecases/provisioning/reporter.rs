use std::sync::Arc;

use tracing::{debug, error};

use bu_core::ports::{DeliveryStatus, ResultMessage, ResultSinkPort};
use bu_core::provisioning::{ResultEnvelope, FALLBACK_JSON_ERROR_MESSAGE};

/// Serializes envelopes and hands them to the host sink.
///
/// Reporting never fails and never recurses: if an envelope cannot be
/// serialized, the fixed `JSON_ERROR` message is delivered instead, and a
/// failed delivery is only logged.
#[derive(Clone)]
pub struct ResultReporter {
    sink: Arc<dyn ResultSinkPort>,
}

impl ResultReporter {
    pub fn new(sink: Arc<dyn ResultSinkPort>) -> Self {
        Self { sink }
    }

    pub async fn report(&self, envelope: &ResultEnvelope) {
        self.report_with(envelope, ResultEnvelope::to_json).await
    }

    pub(crate) async fn report_with<F>(&self, envelope: &ResultEnvelope, encode: F)
    where
        F: FnOnce(&ResultEnvelope) -> Result<String, serde_json::Error>,
    {
        let message = match encode(envelope) {
            Ok(payload) => ResultMessage {
                status: if envelope.is_error() {
                    DeliveryStatus::Error
                } else {
                    DeliveryStatus::Ok
                },
                payload,
            },
            Err(err) => {
                error!(error = %err, state = envelope.state().as_str(), "failed to serialize result envelope, sending fallback");
                ResultMessage {
                    status: DeliveryStatus::Error,
                    payload: FALLBACK_JSON_ERROR_MESSAGE.to_string(),
                }
            }
        };

        match self.sink.deliver(message).await {
            Ok(()) => debug!(state = envelope.state().as_str(), "result delivered"),
            Err(err) => error!(error = %err, "Failed to deliver result message to host"),
        }
    }
}
