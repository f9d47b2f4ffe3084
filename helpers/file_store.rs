//! Record store on disk, one JSON file per contract:
//!
//! ```text
//! deployments/
//!   sepolia/
//!     .chainId
//!     FireToken.json
//! ```

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::{DeploymentRecord, Environment, RecordStore, StoreError};

const CHAIN_ID_FILE: &str = ".chainId";

#[derive(Debug, Clone)]
pub struct FileRecordStore {
    dir: PathBuf,
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl FileRecordStore {
    /// Opens `<deployments_dir>/<network name>`, creating it on first use.
    ///
    /// The directory is bound to the chain id it was created for; opening it
    /// against a different chain fails so records never cross chains.
    pub async fn open(
        deployments_dir: impl AsRef<Path>,
        env: &Environment,
    ) -> Result<Self, StoreError> {
        let dir = deployments_dir.as_ref().join(&env.name);
        tokio::fs::create_dir_all(&dir).await.map_err(io_err(&dir))?;

        let marker = dir.join(CHAIN_ID_FILE);
        match tokio::fs::read_to_string(&marker).await {
            Ok(raw) => {
                let found: u64 = raw.trim().parse().map_err(|_| StoreError::InvalidChainId {
                    path: marker.clone(),
                    value: raw.clone(),
                })?;
                if found != env.chain_id {
                    return Err(StoreError::ChainMismatch {
                        path: dir,
                        expected: env.chain_id,
                        found,
                    });
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(dir = %dir.display(), chain_id = env.chain_id, "initialising deployments directory");
                tokio::fs::write(&marker, env.chain_id.to_string())
                    .await
                    .map_err(io_err(&marker))?;
            }
            Err(e) => return Err(io_err(&marker)(e)),
        }

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn lookup(&self, name: &str) -> Result<Option<DeploymentRecord>, StoreError> {
        let path = self.record_path(name);
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_err(&path)(e)),
        };
        let record: DeploymentRecord = serde_json::from_slice(&raw)
            .map_err(|source| StoreError::Malformed { path, source })?;
        Ok(Some(record))
    }

    async fn persist(&self, record: &DeploymentRecord) -> Result<(), StoreError> {
        let path = self.record_path(&record.contract_name);
        let json = serde_json::to_vec_pretty(record).map_err(|source| StoreError::Malformed {
            path: path.clone(),
            source,
        })?;

        // rename is atomic, so readers see either no record or a whole one
        let tmp = self.dir.join(format!(".{}.json.tmp", record.contract_name));
        tokio::fs::write(&tmp, json).await.map_err(io_err(&tmp))?;
        tokio::fs::rename(&tmp, &path).await.map_err(io_err(&path))?;
        debug!(path = %path.display(), "deployment record written");
        Ok(())
    }
}
