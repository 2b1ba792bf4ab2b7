//! Plan id cache port
//!
//! This port defines the contract for persisting the single plan id the vendor
//! server assigned on the last successful provisioning. Implementations are
//! provided by the infrastructure layer (file-backed, in-memory).

use async_trait::async_trait;

#[async_trait]
pub trait PlanIdStorePort: Send + Sync {
    /// Get the cached plan id, if any
    async fn get(&self) -> anyhow::Result<Option<String>>;

    /// Replace the cached plan id (`None` removes it)
    async fn set(&self, plan_id: Option<String>) -> anyhow::Result<()>;

    /// Remove the cached plan id
    async fn clear(&self) -> anyhow::Result<()> {
        self.set(None).await
    }
}
