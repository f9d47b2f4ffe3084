use thiserror::Error;

use crate::Environment;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced to the operator by a deployment run.
///
/// Every variant carries the artifact and/or environment it happened in, so a
/// failed run can be diagnosed and re-run. Re-running is always safe: an
/// artifact that made it into the record store is never deployed twice.
#[derive(Debug, Error)]
pub enum DeployError {
    /// The deployment transaction was rejected, reverted or never confirmed.
    /// Nothing was persisted.
    #[error("deployment of {artifact} to {environment} failed: {source}")]
    DeploymentFailed {
        artifact: String,
        environment: String,
        #[source]
        source: BoxError,
    },

    /// The record store or the chain RPC endpoint could not be reached.
    #[error("deployment store for {environment} unavailable: {source}")]
    StoreUnavailable {
        environment: String,
        #[source]
        source: BoxError,
    },

    /// The informational post-deploy read failed. The deployment itself stands.
    #[error("reading {method} on {artifact} failed: {source}")]
    ReportingReadFailed {
        artifact: String,
        method: String,
        #[source]
        source: BoxError,
    },

    #[error("artifact {name}: {reason}")]
    Artifact { name: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

impl DeployError {
    pub(crate) fn deployment(
        artifact: &str,
        environment: &Environment,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::DeploymentFailed {
            artifact: artifact.to_string(),
            environment: environment.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn store(environment: &Environment, source: impl Into<BoxError>) -> Self {
        Self::StoreUnavailable {
            environment: environment.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn reporting(artifact: &str, method: &str, source: impl Into<BoxError>) -> Self {
        Self::ReportingReadFailed {
            artifact: artifact.to_string(),
            method: method.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn artifact(name: &str, reason: impl std::fmt::Display) -> Self {
        Self::Artifact {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for failures that leave an already-deployed contract untouched.
    pub fn is_reporting(&self) -> bool {
        matches!(self, Self::ReportingReadFailed { .. })
    }
}
