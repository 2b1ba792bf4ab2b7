use async_trait::async_trait;

/// Which host callback a message is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Ok,
    Error,
}

/// One serialized message bound for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMessage {
    pub status: DeliveryStatus,
    /// JSON text of the envelope.
    pub payload: String,
}

/// Delivers result messages to the host application.
///
/// The channel stays open across deliveries: a single `start` produces a
/// `started` message and, later, a terminal one. Implementations serialize
/// their own deliveries.
#[async_trait]
pub trait ResultSinkPort: Send + Sync {
    async fn deliver(&self, message: ResultMessage) -> anyhow::Result<()>;
}
