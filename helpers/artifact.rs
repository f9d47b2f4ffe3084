//! Compiled contract artifacts and what to deploy from them.

use std::path::{Path, PathBuf};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::{abi, AbiError, DeployError};

/// What to deploy: an artifact name plus its constructor arguments, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSpec {
    pub name: String,
    pub constructor_args: Vec<String>,
}

impl ArtifactSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constructor_args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constructor_args = args.into_iter().map(Into::into).collect();
        self
    }
}

/// Bytecode and interface produced by the compile pipeline, in the
/// Hardhat artifact JSON layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

impl Artifact {
    pub fn from_json(name: &str, raw: &str) -> Result<Self, DeployError> {
        let artifact: Artifact =
            serde_json::from_str(raw).map_err(|e| DeployError::artifact(name, e))?;
        if artifact.bytecode.is_empty() {
            // abstract contracts and interfaces compile to empty creation code
            return Err(DeployError::artifact(name, "bytecode is empty"));
        }
        Ok(artifact)
    }

    /// Loads `<Name>.json` from `artifacts_dir`, searching nested directories
    /// (`artifacts/contracts/<Name>.sol/<Name>.json`) when it is not at the top.
    pub async fn load(artifacts_dir: impl AsRef<Path>, name: &str) -> Result<Self, DeployError> {
        let artifacts_dir = artifacts_dir.as_ref();
        let path = find_artifact(artifacts_dir, name)
            .await
            .map_err(|e| DeployError::artifact(name, e))?
            .ok_or_else(|| {
                DeployError::artifact(
                    name,
                    format!("no {name}.json under {}", artifacts_dir.display()),
                )
            })?;
        debug!(path = %path.display(), "loading artifact");
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| DeployError::artifact(name, format!("{}: {e}", path.display())))?;
        Self::from_json(name, &raw)
    }

    /// Creation code with the constructor arguments encoded after it.
    pub fn deploy_code(&self, args: &[String]) -> Result<Bytes, AbiError> {
        abi::encode_constructor(&self.abi, &self.bytecode, args)
    }
}

/// Where a deployment gets its artifact from. Only consulted when the
/// artifact actually has to be deployed.
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    async fn artifact(&self, name: &str) -> Result<Artifact, DeployError>;
}

#[async_trait]
impl ArtifactSource for Artifact {
    async fn artifact(&self, _name: &str) -> Result<Artifact, DeployError> {
        Ok(self.clone())
    }
}

/// An artifacts directory, searched on demand.
#[async_trait]
impl ArtifactSource for Path {
    async fn artifact(&self, name: &str) -> Result<Artifact, DeployError> {
        Artifact::load(self, name).await
    }
}

async fn find_artifact(root: &Path, name: &str) -> std::io::Result<Option<PathBuf>> {
    let file_name = format!("{name}.json");
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                pending.push(path);
            } else if entry.file_name() == file_name.as_str() {
                return Ok(Some(path));
            }
        }
    }
    Ok(None)
}
