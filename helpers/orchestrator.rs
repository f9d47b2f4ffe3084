//! Idempotent deployment: an artifact is deployed at most once per environment.
//!
//! The lookup and the submission are two separate steps with no lock between
//! them. Two runs racing against the same environment can both see no record
//! and both deploy; runs against one environment must be serialised by the
//! caller.

use alloy::{dyn_abi::DynSolValue, primitives::Address};
use tracing::{info, instrument, warn};

use crate::{
    abi, ArtifactSource, ArtifactSpec, ChainClient, DeployError, DeployRequest, DeploymentRecord,
    Environment, RecordStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployOptions {
    /// Confirmations to wait for on remote networks.
    pub confirmations: u64,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self { confirmations: 1 }
    }
}

impl DeployOptions {
    /// Local networks mine instantly and never reorg, one block is final.
    pub fn confirmations_for(&self, env: &Environment) -> u64 {
        if env.is_local() {
            1
        } else {
            self.confirmations.max(1)
        }
    }
}

/// Returns the record for `spec.name` in `env`, deploying the artifact first
/// if the store has none.
///
/// A record that already exists is returned as is with `newly_deployed`
/// unset, no transaction is sent and `artifacts` is never consulted. Otherwise
/// the artifact is fetched and the deployment is submitted
/// from `deployer`, awaited, and only then persisted: a failed deployment
/// leaves the store untouched so the next run tries again.
#[instrument(skip_all, fields(artifact = %spec.name, environment = %env))]
pub async fn ensure_deployed<A, S, C>(
    spec: &ArtifactSpec,
    artifacts: &A,
    env: &Environment,
    deployer: Address,
    store: &S,
    chain: &C,
    options: &DeployOptions,
) -> Result<DeploymentRecord, DeployError>
where
    A: ArtifactSource + ?Sized,
    S: RecordStore + ?Sized,
    C: ChainClient + ?Sized,
{
    if let Some(existing) = store
        .lookup(&spec.name)
        .await
        .map_err(|e| DeployError::store(env, e))?
    {
        info!(address = %existing.address, "already deployed, skipping");
        return Ok(existing.reused());
    }

    let artifact = artifacts.artifact(&spec.name).await?;
    let code = artifact
        .deploy_code(&spec.constructor_args)
        .map_err(|e| DeployError::deployment(&spec.name, env, e))?;

    let request = DeployRequest {
        from: deployer,
        code,
        confirmations: options.confirmations_for(env),
    };
    let receipt = chain
        .deploy(request)
        .await
        .map_err(|e| DeployError::deployment(&spec.name, env, e))?;
    info!(address = %receipt.address, tx = %receipt.transaction_hash, "deployed");

    let record = DeploymentRecord {
        contract_name: spec.name.clone(),
        address: receipt.address,
        deployer,
        transaction_hash: Some(receipt.transaction_hash),
        block_number: receipt.block_number,
        args: spec.constructor_args.clone(),
        abi: artifact.abi,
        newly_deployed: true,
    };

    if let Err(e) = store.persist(&record).await {
        // the contract exists on chain; without the record the next run deploys again
        warn!(address = %record.address, error = %e, "deployed but failed to record deployment");
        return Err(DeployError::store(env, e));
    }

    Ok(record)
}

/// Read-only call against a deployed contract, for reporting.
///
/// Failures come back as [`DeployError::ReportingReadFailed`] and never touch
/// the record.
pub async fn read_state<C>(
    chain: &C,
    record: &DeploymentRecord,
    method: &str,
    args: &[String],
) -> Result<Vec<DynSolValue>, DeployError>
where
    C: ChainClient + ?Sized,
{
    let fail = |e: crate::BoxError| DeployError::reporting(&record.contract_name, method, e);

    let (function, calldata) =
        abi::encode_call(&record.abi, method, args).map_err(|e| fail(e.into()))?;
    let output = chain
        .call(record.address, calldata)
        .await
        .map_err(|e| fail(e.into()))?;
    abi::decode_output(function, &output).map_err(|e| fail(e.into()))
}
