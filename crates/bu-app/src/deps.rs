//! # Provisioning Dependencies
//!
//! Dependency grouping for [`ProvisioningSession`](crate::usecases::ProvisioningSession)
//! construction.
//!
//! **Note**: This is NOT a Builder pattern. No defaults, no hidden logic,
//! just parameter grouping.

use std::sync::Arc;

use bu_core::ports::{PlanIdStorePort, ProvisioningGatewayPort, ResultSinkPort};

pub struct ProvisioningDeps {
    /// Vendor SDK surface
    pub gateway: Arc<dyn ProvisioningGatewayPort>,
    /// Host message channel
    pub result_sink: Arc<dyn ResultSinkPort>,
    /// Plan id cache
    pub plan_id_store: Arc<dyn PlanIdStorePort>,
}
