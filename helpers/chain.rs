//! Chain RPC access: submitting deployments and read-only calls.

use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, Bytes, TxHash},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    transports::{RpcError, TransportError},
};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("rpc transport: {0}")]
    Transport(String),
    /// The node refused the request, e.g. insufficient funds or a nonce clash.
    #[error("rejected by node: {0}")]
    Rejected(String),
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
    #[error("receipt for {0} carries no contract address")]
    MissingContractAddress(TxHash),
    #[error("node exposes no unlocked accounts and no private key was given")]
    NoAccounts,
    #[error("invalid private key: {0}")]
    Signer(String),
}

impl From<TransportError> for ChainError {
    fn from(err: TransportError) -> Self {
        match err {
            RpcError::ErrorResp(payload) => Self::Rejected(payload.message.to_string()),
            other => Self::Transport(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub from: Address,
    /// Creation bytecode with constructor arguments appended.
    pub code: Bytes,
    pub confirmations: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReceipt {
    pub address: Address,
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
}

#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn chain_id(&self) -> Result<u64, ChainError>;

    /// Sends a contract creation transaction and waits until it has the
    /// requested number of confirmations.
    async fn deploy(&self, request: DeployRequest) -> Result<DeployReceipt, ChainError>;

    /// Executes a read-only call against `to`.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError>;
}

/// JSON-RPC client backed by an alloy provider.
pub struct RpcChainClient {
    provider: DynProvider,
    deployer: Address,
}

impl RpcChainClient {
    /// Connects to `rpc_url`. With a private key, transactions are signed
    /// locally; without one, the node's first unlocked account deploys, which
    /// is how development nodes expose their funded accounts.
    pub async fn connect(rpc_url: &str, private_key: Option<&str>) -> Result<Self, ChainError> {
        match private_key {
            Some(key) => {
                let signer: PrivateKeySigner = key
                    .trim()
                    .parse()
                    .map_err(|e: alloy::signers::local::LocalSignerError| {
                        ChainError::Signer(e.to_string())
                    })?;
                let deployer = signer.address();
                let provider = ProviderBuilder::new()
                    .wallet(EthereumWallet::from(signer))
                    .connect(rpc_url)
                    .await?
                    .erased();
                info!(%deployer, "using local signer");
                Ok(Self { provider, deployer })
            }
            None => {
                let provider = ProviderBuilder::new().connect(rpc_url).await?.erased();
                let accounts = provider.get_accounts().await?;
                let deployer = accounts.first().copied().ok_or(ChainError::NoAccounts)?;
                info!(%deployer, "using first unlocked node account");
                Ok(Self { provider, deployer })
            }
        }
    }

    pub fn deployer(&self) -> Address {
        self.deployer
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn chain_id(&self) -> Result<u64, ChainError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn deploy(&self, request: DeployRequest) -> Result<DeployReceipt, ChainError> {
        let tx = TransactionRequest::default()
            .with_from(request.from)
            .with_deploy_code(request.code);

        let pending = self.provider.send_transaction(tx).await?;
        let transaction_hash = *pending.tx_hash();
        debug!(%transaction_hash, confirmations = request.confirmations, "awaiting deployment receipt");

        let receipt = pending
            .with_required_confirmations(request.confirmations)
            .get_receipt()
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))?;

        if !receipt.status() {
            return Err(ChainError::Reverted(transaction_hash));
        }
        let address = receipt
            .contract_address
            .ok_or(ChainError::MissingContractAddress(transaction_hash))?;

        Ok(DeployReceipt {
            address,
            transaction_hash,
            block_number: receipt.block_number,
        })
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError> {
        let tx = TransactionRequest::default().with_to(to).with_input(data);
        Ok(self.provider.call(tx).await?)
    }
}
