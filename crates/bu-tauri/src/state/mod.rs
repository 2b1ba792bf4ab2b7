//! Tauri state management
//!
//! State shared by the plugin's commands.

use bu_app::ProvisioningSession;

/// Managed state holding the bridge's single provisioning session.
#[derive(Clone)]
pub struct BridgeRuntime {
    session: ProvisioningSession,
}

impl BridgeRuntime {
    pub fn new(session: ProvisioningSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &ProvisioningSession {
        &self.session
    }
}
