use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use helpers::{
    ChainClient, DeployError, DeployOptions, Environment, FileRecordStore, MemoryRecordStore,
    RecordStore, RpcChainClient,
};
use tracing::info;

use crate::{DeployContext, DeployTag};

/// Every flag can also come from the environment or a `.env` file.
#[derive(Debug, Clone, Parser)]
#[command(name = "deploy")]
#[command(about = "Deploy contracts, skipping the ones already deployed to the network")]
pub struct Cli {
    /// JSON-RPC endpoint of the target network
    #[arg(long, env = "RPC_URL", default_value = "http://127.0.0.1:8545")]
    pub rpc_url: String,

    /// Deployer key; without it the node's first unlocked account deploys
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Network name used for the deployments directory (defaults to the chain's name)
    #[arg(long, env = "NETWORK")]
    pub network: Option<String>,

    /// Directory holding compiled contract artifacts
    #[arg(long = "artifacts", env = "ARTIFACTS_DIR", default_value = "artifacts")]
    pub artifacts_dir: PathBuf,

    /// Directory holding deployment records, one subdirectory per network
    #[arg(long = "deployments", env = "DEPLOYMENTS_DIR", default_value = "deployments")]
    pub deployments_dir: PathBuf,

    /// Confirmations to wait for on remote networks
    #[arg(long, env = "CONFIRMATIONS", default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub confirmations: u64,

    /// Keep deployment records in memory only (local networks)
    #[arg(long)]
    pub ephemeral: bool,

    /// Only run scripts with these tags, comma separated
    #[arg(long, env = "DEPLOY_TAGS", value_delimiter = ',')]
    pub tags: Vec<DeployTag>,
}

impl Cli {
    /// Connects to the network and opens its record store.
    pub async fn context(&self) -> Result<DeployContext, DeployError> {
        let offline = |source: helpers::ChainError| DeployError::StoreUnavailable {
            environment: self.rpc_url.clone(),
            source: source.into(),
        };

        let chain = RpcChainClient::connect(&self.rpc_url, self.private_key.as_deref())
            .await
            .map_err(offline)?;
        let chain_id = chain.chain_id().await.map_err(offline)?;

        let mut environment = Environment::from_chain_id(chain_id);
        if let Some(name) = &self.network {
            environment = environment.with_name(name.clone());
        }
        info!(%environment, classification = %environment.classification, "connected");

        let store = self.open_store(&environment).await?;

        Ok(DeployContext {
            deployer: chain.deployer(),
            environment,
            store,
            chain: Arc::new(chain),
            artifacts_dir: self.artifacts_dir.clone(),
            options: DeployOptions {
                confirmations: self.confirmations,
            },
        })
    }

    /// In-memory records with `--ephemeral`, refused on remote networks where
    /// losing them would mean deploying again; the deployments directory
    /// otherwise.
    pub async fn open_store(
        &self,
        environment: &Environment,
    ) -> Result<Arc<dyn RecordStore>, DeployError> {
        if self.ephemeral {
            if !environment.is_local() {
                return Err(DeployError::Config(format!(
                    "--ephemeral is only allowed on local networks, {environment} is remote"
                )));
            }
            return Ok(Arc::new(MemoryRecordStore::new()));
        }

        let store = FileRecordStore::open(&self.deployments_dir, environment)
            .await
            .map_err(|e| DeployError::StoreUnavailable {
                environment: environment.to_string(),
                source: e.into(),
            })?;
        Ok(Arc::new(store))
    }
}
