//! Deployment record persistence.

use std::{collections::HashMap, path::PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::DeploymentRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed record {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} holds deployments for chain {found}, not {expected}", path.display())]
    ChainMismatch {
        path: PathBuf,
        expected: u64,
        found: u64,
    },
    #[error("invalid chain id marker {}: {value:?}", path.display())]
    InvalidChainId { path: PathBuf, value: String },
}

/// Environment-local store of deployment records, keyed by artifact name.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn lookup(&self, name: &str) -> Result<Option<DeploymentRecord>, StoreError>;

    async fn persist(&self, record: &DeploymentRecord) -> Result<(), StoreError>;
}

/// Records that live for the lifetime of the process, for in-process
/// networks that are discarded on exit.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<String, DeploymentRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn lookup(&self, name: &str) -> Result<Option<DeploymentRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(name).cloned().map(DeploymentRecord::reused))
    }

    async fn persist(&self, record: &DeploymentRecord) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(record.contract_name.clone(), record.clone());
        Ok(())
    }
}
