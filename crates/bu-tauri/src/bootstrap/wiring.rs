//! Dependency wiring for the provisioning session.

use std::sync::Arc;

use bu_app::{ProvisioningDeps, ProvisioningSession};
use bu_core::config::BridgeConfig;
use bu_core::ports::{ProvisioningGatewayPort, ResultSinkPort};
use bu_infra::FilePlanIdStore;
use tracing::debug;

/// Builds the session around a gateway and sink, with the plan id cached
/// under `config.plan_id_dir`.
pub fn wire_session(
    gateway: Arc<dyn ProvisioningGatewayPort>,
    result_sink: Arc<dyn ResultSinkPort>,
    config: &BridgeConfig,
) -> ProvisioningSession {
    debug!(plan_id_dir = %config.plan_id_dir.display(), "wiring provisioning session");
    let plan_id_store = Arc::new(FilePlanIdStore::with_defaults(config.plan_id_dir.clone()));

    ProvisioningSession::new(
        ProvisioningDeps {
            gateway,
            result_sink,
            plan_id_store,
        },
        config,
    )
}
