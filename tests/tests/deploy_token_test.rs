use std::sync::Arc;

use alloy::primitives::U256;
use helpers::{ChainError, DeployError, DeployOptions, Environment, FileRecordStore};
use scripts::{DeployContext, DeployTag, TOKEN_CONTRACT};
use temp_dir::TempDir;
use tests::{fixtures_dir, ScriptedChain, DEV_DEPLOYER};

async fn context(
    deployments: &TempDir,
    chain: Arc<ScriptedChain>,
    chain_id: u64,
) -> anyhow::Result<DeployContext> {
    let environment = Environment::from_chain_id(chain_id);
    let store = FileRecordStore::open(deployments.path(), &environment).await?;
    Ok(DeployContext {
        environment,
        deployer: DEV_DEPLOYER,
        store: Arc::new(store),
        chain,
        artifacts_dir: fixtures_dir(),
        options: DeployOptions::default(),
    })
}

async fn run(ctx: &DeployContext, tags: &[DeployTag]) -> (Result<usize, DeployError>, String) {
    let mut out = Vec::new();
    let result = scripts::run(ctx, tags, &mut out).await.map(|records| records.len());
    (result, String::from_utf8(out).expect("utf8 report"))
}

#[tokio::test]
async fn deploys_then_reuses_token() -> anyhow::Result<()> {
    let deployments = TempDir::new()?;
    let chain = Arc::new(ScriptedChain::new(31337));
    chain.set_balance(Some(U256::from(21_000_000u64)));
    let ctx = context(&deployments, chain.clone(), 31337).await?;

    let (result, report) = run(&ctx, &[DeployTag::Token]).await;
    assert_eq!(result?, 1);
    assert!(report.contains("FireToken - Deploy"));
    assert!(report.contains("network: hardhat (local)"));
    assert!(report.contains(&format!("deployer: {DEV_DEPLOYER}")));
    assert!(report.contains("deployed \"FireToken\" at "));
    assert!(report.contains("Deployer balance:\n21000000"));
    assert!(report.trim_end().ends_with("Done!"));

    let record_file = deployments
        .path()
        .join("hardhat")
        .join(format!("{TOKEN_CONTRACT}.json"));
    let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&record_file)?)?;
    assert_eq!(saved["contractName"], "FireToken");
    assert!(saved.get("newlyDeployed").is_none());

    let (result, report) = run(&ctx, &[]).await;
    assert_eq!(result?, 1);
    assert!(report.contains("reusing \"FireToken\" at "));
    assert_eq!(chain.deploy_count(), 1);
    Ok(())
}

#[tokio::test]
async fn records_are_reused_by_a_fresh_process() -> anyhow::Result<()> {
    let deployments = TempDir::new()?;

    let first_chain = Arc::new(ScriptedChain::new(137));
    let ctx = context(&deployments, first_chain.clone(), 137).await?;
    let (result, report) = run(&ctx, &[]).await;
    result?;
    assert!(report.contains("network: polygon (remote)"));

    // same deployments directory, new store and client
    let second_chain = Arc::new(ScriptedChain::new(137));
    let ctx = context(&deployments, second_chain.clone(), 137).await?;
    let (result, report) = run(&ctx, &[]).await;
    result?;
    assert!(report.contains("reusing \"FireToken\""));
    assert_eq!(first_chain.deploy_count(), 1);
    assert_eq!(second_chain.deploy_count(), 0);
    Ok(())
}

#[tokio::test]
async fn balance_failure_does_not_fail_the_run() -> anyhow::Result<()> {
    let deployments = TempDir::new()?;
    let chain = Arc::new(ScriptedChain::new(31337));
    chain.set_balance(None);
    let ctx = context(&deployments, chain.clone(), 31337).await?;

    let (result, report) = run(&ctx, &[]).await;
    assert_eq!(result?, 1);
    assert!(report.contains("Deployer balance unavailable: reading balanceOf on FireToken failed"));
    assert!(report.contains("Done!"));
    assert!(deployments.path().join("hardhat").join("FireToken.json").exists());
    Ok(())
}

#[tokio::test]
async fn insufficient_funds_fails_the_run_without_a_record() -> anyhow::Result<()> {
    let deployments = TempDir::new()?;
    let chain = Arc::new(ScriptedChain::new(1));
    chain.fail_next_deploy(ChainError::Rejected("insufficient funds".to_string()));
    let ctx = context(&deployments, chain.clone(), 1).await?;

    let (result, report) = run(&ctx, &[]).await;
    assert!(matches!(result, Err(DeployError::DeploymentFailed { .. })));
    assert!(!report.contains("Done!"));
    assert!(!deployments.path().join("mainnet").join("FireToken.json").exists());

    let (result, _) = run(&ctx, &[]).await;
    result?;
    assert_eq!(chain.deploy_count(), 1);
    Ok(())
}

#[tokio::test]
async fn missing_artifact_is_reported() -> anyhow::Result<()> {
    let deployments = TempDir::new()?;
    let empty = TempDir::new()?;
    let chain = Arc::new(ScriptedChain::new(31337));
    let mut ctx = context(&deployments, chain.clone(), 31337).await?;
    ctx.artifacts_dir = empty.path().to_path_buf();

    let (result, _) = run(&ctx, &[]).await;
    assert!(matches!(result, Err(DeployError::Artifact { .. })));
    assert_eq!(chain.deploy_count(), 0);
    Ok(())
}

#[tokio::test]
async fn recorded_token_is_reused_without_its_artifact() -> anyhow::Result<()> {
    let deployments = TempDir::new()?;
    let chain = Arc::new(ScriptedChain::new(31337));
    let mut ctx = context(&deployments, chain.clone(), 31337).await?;
    run(&ctx, &[]).await.0?;

    // artifacts are only needed to deploy, not to reuse
    let empty = TempDir::new()?;
    ctx.artifacts_dir = empty.path().to_path_buf();
    let (result, report) = run(&ctx, &[]).await;
    assert_eq!(result?, 1);
    assert!(report.contains("reusing \"FireToken\" at "));
    assert!(report.contains("Done!"));
    assert_eq!(chain.deploy_count(), 1);
    Ok(())
}
