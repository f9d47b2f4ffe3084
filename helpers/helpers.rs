//! Common helper functions for deployment scripts and tests

mod abi;
mod artifact;
mod chain;
mod environment;
mod error;
mod file_store;
mod orchestrator;
mod record;
mod report;
mod store;

pub use abi::{format_value, format_values, AbiError};
pub use artifact::{Artifact, ArtifactSource, ArtifactSpec};
pub use chain::{ChainClient, ChainError, DeployReceipt, DeployRequest, RpcChainClient};
pub use environment::{chain_name, Classification, Environment, LOCAL_CHAIN_IDS};
pub use error::{BoxError, DeployError};
pub use file_store::FileRecordStore;
pub use orchestrator::{ensure_deployed, read_state, DeployOptions};
pub use record::DeploymentRecord;
pub use report::Report;
pub use store::{MemoryRecordStore, RecordStore, StoreError};
