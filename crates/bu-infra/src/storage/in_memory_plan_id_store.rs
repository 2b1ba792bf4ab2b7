use async_trait::async_trait;
use tokio::sync::Mutex;

use bu_core::ports::PlanIdStorePort;

/// Keeps the plan id in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryPlanIdStore {
    plan_id: Mutex<Option<String>>,
}

impl InMemoryPlanIdStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plan_id(plan_id: impl Into<String>) -> Self {
        Self {
            plan_id: Mutex::new(Some(plan_id.into())),
        }
    }
}

#[async_trait]
impl PlanIdStorePort for InMemoryPlanIdStore {
    async fn get(&self) -> anyhow::Result<Option<String>> {
        Ok(self.plan_id.lock().await.clone())
    }

    async fn set(&self, plan_id: Option<String>) -> anyhow::Result<()> {
        *self.plan_id.lock().await = plan_id;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_store_defaults_to_empty() {
        assert_eq!(InMemoryPlanIdStore::new().get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn in_memory_store_set_and_clear() {
        let store = InMemoryPlanIdStore::with_plan_id("cached");
        assert_eq!(store.get().await.unwrap(), Some("cached".to_string()));

        store.clear().await.unwrap();
        assert_eq!(store.get().await.unwrap(), None);
    }
}
