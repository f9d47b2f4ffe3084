//! Deployment scripts, selected by tag and run in declaration order.

use std::{io::Write, path::PathBuf, sync::Arc};

use alloy::primitives::Address;
use async_trait::async_trait;
use helpers::{ChainClient, DeployError, DeployOptions, DeploymentRecord, Environment, RecordStore};
use tracing::{info, warn};

pub mod cli;
mod deploy_token;
mod tags;

pub use deploy_token::{DeployToken, TOKEN_CONTRACT};
pub use tags::{DeployTag, UnknownTag};

/// Everything a script needs, passed explicitly.
pub struct DeployContext {
    pub environment: Environment,
    pub deployer: Address,
    pub store: Arc<dyn RecordStore>,
    pub chain: Arc<dyn ChainClient>,
    pub artifacts_dir: PathBuf,
    pub options: DeployOptions,
}

/// A named, tagged unit of deployment work.
#[async_trait]
pub trait DeployScript: Send + Sync {
    fn name(&self) -> &'static str;

    fn tags(&self) -> &'static [DeployTag];

    async fn run(
        &self,
        ctx: &DeployContext,
        out: &mut (dyn Write + Send),
    ) -> Result<DeploymentRecord, DeployError>;
}

/// All deployment scripts in the order they run.
pub fn scripts() -> Vec<Box<dyn DeployScript>> {
    vec![Box::new(DeployToken)]
}

/// Scripts carrying any of `tags`; all of them when `tags` is empty.
pub fn select<'a>(
    scripts: &'a [Box<dyn DeployScript>],
    tags: &[DeployTag],
) -> Vec<&'a dyn DeployScript> {
    scripts
        .iter()
        .filter(|script| tags.is_empty() || script.tags().iter().any(|t| tags.contains(t)))
        .map(|script| script.as_ref())
        .collect()
}

/// Runs the selected scripts one after another, stopping at the first failure.
pub async fn run(
    ctx: &DeployContext,
    tags: &[DeployTag],
    out: &mut (dyn Write + Send),
) -> Result<Vec<DeploymentRecord>, DeployError> {
    let all = scripts();
    let selected = select(&all, tags);
    if selected.is_empty() {
        warn!(?tags, "no deployment script matches the requested tags");
    }

    let mut records = Vec::with_capacity(selected.len());
    for script in selected {
        info!(script = script.name(), environment = %ctx.environment, "running deployment script");
        records.push(script.run(ctx, &mut *out).await?);
    }
    Ok(records)
}
