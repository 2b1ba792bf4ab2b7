//! Provisioning session.
//!
//! Drives one BlinkUp flow at a time: validates the host's request, picks the
//! plan id, acknowledges the start, then runs the vendor gateway on a task and
//! reports its single terminal outcome.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, info_span, warn, Instrument};

use bu_core::codes::{PluginErrorCode, StatusCode};
use bu_core::config::BridgeConfig;
use bu_core::ports::{
    GatewayError, PlanIdStorePort, PollOutcome, ProvisioningGatewayPort, SetupFlowOutcome,
};
use bu_core::provisioning::{
    ProvisioningRequest, RejectionError, ResultEnvelope, SessionEvent, SessionPhase,
    ValidatedRequest,
};

use super::context::{ProvisioningContext, SessionTicket};
use super::reporter::ResultReporter;
use crate::deps::ProvisioningDeps;

/// Acknowledgment returned to the host once a command has been accepted.
///
/// Commands that continue asynchronously carry the handle of that work so
/// callers (and tests) can wait for the terminal message to be delivered.
#[derive(Debug)]
pub struct CommandAck {
    task: Option<JoinHandle<()>>,
}

impl CommandAck {
    fn immediate() -> Self {
        Self { task: None }
    }

    fn pending(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    pub fn is_pending(&self) -> bool {
        self.task.is_some()
    }

    /// Waits until any follow-up work started by the command has finished.
    pub async fn settled(self) {
        if let Some(task) = self.task {
            if let Err(err) = task.await {
                error!(error = %err, "provisioning task failed");
            }
        }
    }
}

#[derive(Clone)]
pub struct ProvisioningSession {
    context: Arc<ProvisioningContext>,
    reporter: ResultReporter,
    gateway: Arc<dyn ProvisioningGatewayPort>,
    plan_id_store: Arc<dyn PlanIdStorePort>,
    max_timeout_ms: u64,
}

impl ProvisioningSession {
    pub fn new(deps: ProvisioningDeps, config: &BridgeConfig) -> Self {
        Self {
            context: Arc::new(ProvisioningContext::new()),
            reporter: ResultReporter::new(deps.result_sink),
            gateway: deps.gateway,
            plan_id_store: deps.plan_id_store,
            max_timeout_ms: config.max_timeout_ms,
        }
    }

    pub fn context(&self) -> &ProvisioningContext {
        &self.context
    }

    pub(crate) fn reporter(&self) -> &ResultReporter {
        &self.reporter
    }

    /// Starts a provisioning flow.
    ///
    /// A rejected request is reported to the host as a plugin error and
    /// returned; no gateway call is made. Otherwise a `started` message is
    /// delivered before this returns, and the flow continues on a task.
    pub async fn start(&self, request: ProvisioningRequest) -> Result<CommandAck, RejectionError> {
        let span = info_span!(
            "usecase.provisioning.start",
            development = request.is_development_mode,
            timeout_ms = request.timeout_ms,
        );
        async {
            let request = match request.validate(self.max_timeout_ms) {
                Ok(request) => request,
                Err(err) => {
                    warn!(error = %err, "start rejected");
                    self.reporter
                        .report(&ResultEnvelope::from_plugin_error(err.plugin_code()))
                        .await;
                    return Err(err);
                }
            };

            let plan_id = self.select_plan_id(&request).await;

            let (ticket, previous) = self.context.begin_session().await;
            if previous == SessionPhase::Started {
                warn!("start received while a flow is in flight, superseding it");
                self.gateway.cancel_polling().await;
            }
            info!(session = ticket.generation(), "provisioning session started");

            self.reporter.report(&ResultEnvelope::started()).await;

            let this = self.clone();
            let flow_span = info_span!("usecase.provisioning.flow", session = ticket.generation());
            let task = tokio::spawn(
                async move { this.run_flow(ticket, request, plan_id).await }.instrument(flow_span),
            );
            Ok(CommandAck::pending(task))
        }
        .instrument(span)
        .await
    }

    /// Cancels polling and reports `CANCELLED_BY_USER`.
    ///
    /// Always emits exactly one error message, whether or not a flow was in
    /// flight. A late outcome from an aborted flow is not reported.
    pub async fn abort(&self) -> CommandAck {
        let span = info_span!("usecase.provisioning.abort");
        async {
            // Close the session before cancelling so a poll that wakes up
            // on cancellation finds it already finished.
            let was_active = self.context.abort().await;
            self.gateway.cancel_polling().await;
            info!(was_active, "provisioning aborted");
            self.reporter
                .report(&ResultEnvelope::from_plugin_error(
                    PluginErrorCode::CancelledByUser,
                ))
                .await;
            CommandAck::immediate()
        }
        .instrument(span)
        .await
    }

    /// Clears the cached plan id and the device's Wi-Fi settings.
    pub async fn clear(&self) -> CommandAck {
        let span = info_span!("usecase.provisioning.clear");
        async {
            if let Err(err) = self.plan_id_store.clear().await {
                warn!(error = %err, "failed to clear cached plan id");
            }
            self.context.mark_cache_cleared();

            let this = self.clone();
            let task = tokio::spawn(
                async move {
                    let envelope = match this.gateway.clear_device().await {
                        Ok(()) => this.clear_complete_envelope(),
                        Err(err) => {
                            // The flag belongs to this clear; do not leak it
                            // into a later completion.
                            this.context.take_cache_cleared();
                            error!(error = %err, "device clear failed");
                            ResultEnvelope::from_sdk_error(err.to_string())
                        }
                    };
                    this.reporter.report(&envelope).await;
                }
                .in_current_span(),
            );
            CommandAck::pending(task)
        }
        .instrument(span)
        .await
    }

    async fn select_plan_id(&self, request: &ValidatedRequest) -> Option<String> {
        if request.is_development_mode() {
            warn!(
                plan_id = request.developer_plan_id(),
                "using developer plan id; development mode must never ship to production devices"
            );
            return Some(request.developer_plan_id().to_string());
        }

        match self.plan_id_store.get().await {
            Ok(cached) => {
                debug!(cached = cached.is_some(), "loaded cached plan id");
                cached
            }
            Err(err) => {
                warn!(error = %err, "failed to read cached plan id, letting the SDK generate one");
                None
            }
        }
    }

    async fn run_flow(&self, ticket: SessionTicket, request: ValidatedRequest, plan_id: Option<String>) {
        if let Err(err) = self.gateway.acquire_setup_token(request.api_key()).await {
            // The Wi-Fi selection step reports its own failure.
            warn!(error = %err, "failed to acquire setup token");
        }
        if !self.still_current(ticket).await {
            return;
        }

        let envelope = match self
            .gateway
            .select_wifi_and_setup_device(request.api_key(), plan_id.as_deref())
            .await
        {
            Ok(SetupFlowOutcome::DeviceHandoff) => {
                if !self.still_current(ticket).await {
                    return;
                }
                let outcome = self.gateway.poll_device_status(request.timeout()).await;
                envelope_for_poll(outcome)
            }
            Ok(SetupFlowOutcome::WifiCleared) => {
                if !self.still_current(ticket).await {
                    return;
                }
                info!("user cleared device Wi-Fi from the setup flow");
                self.clear_complete_envelope()
            }
            Err(GatewayError::ApiKeyRejected(message)) => {
                warn!(%message, "vendor server rejected the api key");
                ResultEnvelope::from_plugin_error(PluginErrorCode::VerifyApiKeyFail)
            }
            Err(GatewayError::Sdk(message)) => ResultEnvelope::from_sdk_error(message),
        };

        let event = if envelope.is_error() {
            SessionEvent::Failed
        } else {
            SessionEvent::Completed
        };

        if !self.context.finish(ticket, event).await {
            info!(
                session = ticket.generation(),
                state = envelope.state().as_str(),
                "dropping outcome of an aborted or superseded session"
            );
            return;
        }

        // Only a reported success may touch the cache.
        if let Some(info) = envelope.device_info() {
            if !request.is_development_mode() {
                self.cache_plan_id(info.plan_id.clone()).await;
            }
        }
        self.reporter.report(&envelope).await;
    }

    async fn still_current(&self, ticket: SessionTicket) -> bool {
        let current = self.context.is_current(ticket).await;
        if !current {
            info!(
                session = ticket.generation(),
                "session aborted or superseded, stopping flow"
            );
        }
        current
    }

    async fn cache_plan_id(&self, plan_id: String) {
        match self.plan_id_store.set(Some(plan_id)).await {
            Ok(()) => debug!("cached plan id"),
            Err(err) => warn!(error = %err, "failed to cache plan id"),
        }
    }

    fn clear_complete_envelope(&self) -> ResultEnvelope {
        let cache_cleared = self.context.take_cache_cleared();
        ResultEnvelope::from_success(StatusCode::clear_complete(cache_cleared), None)
    }
}

fn envelope_for_poll(outcome: PollOutcome) -> ResultEnvelope {
    match outcome {
        PollOutcome::Success(raw) => {
            ResultEnvelope::from_success(StatusCode::DeviceConnected, raw.as_ref())
        }
        PollOutcome::Error(message) => ResultEnvelope::from_sdk_error(message),
        PollOutcome::Timeout => ResultEnvelope::from_timeout(),
    }
}
