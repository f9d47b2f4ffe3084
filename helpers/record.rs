use alloy::{
    json_abi::JsonAbi,
    primitives::{Address, TxHash},
};
use serde::{Deserialize, Serialize};

/// Persisted fact that a named artifact lives at `address` in one environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub contract_name: String,
    pub address: Address,
    pub deployer: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<TxHash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(default)]
    pub args: Vec<String>,
    pub abi: JsonAbi,
    /// Outcome of the current run only; records read back from a store are
    /// always pre-existing.
    #[serde(skip)]
    pub newly_deployed: bool,
}

impl DeploymentRecord {
    pub fn reused(mut self) -> Self {
        self.newly_deployed = false;
        self
    }
}
