//! File-based plan id cache
//!
//! This module provides a file-based implementation of the PlanIdStorePort,
//! persisting the plan id to a small JSON document in the application data
//! directory.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use bu_core::ports::PlanIdStorePort;

/// Storage namespace (file stem) of the plan id document.
pub const PLAN_ID_CACHE_NAME: &str = "DefaultPreferences";

#[derive(Debug, Default, Serialize, Deserialize)]
struct PlanIdDocument {
    #[serde(rename = "planId", default)]
    plan_id: Option<String>,
}

pub struct FilePlanIdStore {
    document_path: PathBuf,
}

impl FilePlanIdStore {
    /// Create store with custom file path
    pub fn new(document_path: PathBuf) -> Self {
        Self { document_path }
    }

    /// Create store with defaults under `base_dir`
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            document_path: base_dir.join(format!("{PLAN_ID_CACHE_NAME}.json")),
        }
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.document_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl PlanIdStorePort for FilePlanIdStore {
    async fn get(&self) -> anyhow::Result<Option<String>> {
        if !self.document_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.document_path).await?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let document: PlanIdDocument = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse plan id document: {}", e))?;

        Ok(document.plan_id)
    }

    async fn set(&self, plan_id: Option<String>) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(&PlanIdDocument { plan_id })
            .map_err(|e| anyhow::anyhow!("Failed to serialize plan id document: {}", e))?;

        let mut file = fs::File::create(&self.document_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create plan id document: {}", e))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write plan id document: {}", e))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync plan id document: {}", e))?;

        debug!(path = %self.document_path.display(), "plan id document written");
        Ok(())
    }
}
