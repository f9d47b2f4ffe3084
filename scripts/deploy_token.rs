//! Deployment script for the FireToken contract

use std::io::Write;

use async_trait::async_trait;
use helpers::{ensure_deployed, read_state, ArtifactSpec, DeployError, DeploymentRecord, Report};
use tracing::warn;

use crate::{DeployContext, DeployScript, DeployTag};

pub const TOKEN_CONTRACT: &str = "FireToken";

pub struct DeployToken;

#[async_trait]
impl DeployScript for DeployToken {
    fn name(&self) -> &'static str {
        "deploy_token"
    }

    fn tags(&self) -> &'static [DeployTag] {
        &[DeployTag::Token]
    }

    async fn run(
        &self,
        ctx: &DeployContext,
        out: &mut (dyn Write + Send),
    ) -> Result<DeploymentRecord, DeployError> {
        let mut report = Report::new(out);
        report.banner("FireToken - Deploy")?;
        report.network(&ctx.environment)?;
        report.deployer(ctx.deployer)?;
        report.step("Deploying Token Contract...")?;

        let spec = ArtifactSpec::new(TOKEN_CONTRACT);
        let record = ensure_deployed(
            &spec,
            ctx.artifacts_dir.as_path(),
            &ctx.environment,
            ctx.deployer,
            ctx.store.as_ref(),
            ctx.chain.as_ref(),
            &ctx.options,
        )
        .await?;
        report.outcome(&record)?;

        // informational only, the deployment above already stands
        let holder = [ctx.deployer.to_string()];
        match read_state(ctx.chain.as_ref(), &record, "balanceOf", &holder).await {
            Ok(balance) => report.value("Deployer balance", &balance)?,
            Err(err) => {
                warn!(error = %err, "post-deploy balance read failed");
                report.unavailable("Deployer balance", &err)?;
            }
        }

        report.done()?;
        Ok(record)
    }
}
