//! Provisioning use cases.

mod context;
mod reporter;
mod session;

pub use context::{ProvisioningContext, SessionTicket};
pub use reporter::ResultReporter;
pub use session::{CommandAck, ProvisioningSession};
