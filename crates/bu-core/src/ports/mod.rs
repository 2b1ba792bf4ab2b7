//! Port interfaces for the application layer
//!
//! Ports define the contract between the provisioning use cases and the
//! collaborators they drive: the vendor SDK, the host's message channel and
//! the plan id cache. Implementations live in `bu-infra` and `bu-tauri`.

pub mod gateway;
pub mod plan_id_store;
pub mod result_sink;

pub use gateway::{GatewayError, PollOutcome, ProvisioningGatewayPort, SetupFlowOutcome};
pub use plan_id_store::PlanIdStorePort;
pub use result_sink::{DeliveryStatus, ResultMessage, ResultSinkPort};
