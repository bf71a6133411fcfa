use crate::account::AccountError;
use bearchain_script_sequence::{ContractNotFound, DecodeError};
use std::{io, path::PathBuf, process::ExitStatus, time::Duration};

/// Errors that can happen while managing the node process.
#[derive(Debug, thiserror::Error)]
pub enum AnvilError {
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error("invalid node url {url}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("node is already running")]
    AlreadyRunning,
    #[error("failed to start {}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("node exited during startup: {status}")]
    Exited { status: ExitStatus },
    #[error("node at {url} was not ready after {timeout:?}")]
    Readiness { url: String, timeout: Duration },
    #[error("node reports chain id {actual}, expected {expected}")]
    ChainIdMismatch { expected: u64, actual: u64 },
    #[error("failed to poll node process")]
    Wait(#[source] io::Error),
    #[error("failed to kill node process")]
    Kill(#[source] io::Error),
}

/// Errors that can happen while deploying a contract with `forge script`.
///
/// [`DeployError::Spawn`] and [`DeployError::Tool`] mean the deployment itself failed; the
/// other variants mean forge succeeded but its broadcast artifact was unusable.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("failed to run {}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("deploying {contract} failed ({status}):\n{output}")]
    Tool { contract: String, status: ExitStatus, output: String },
    #[error("reading broadcast file {}", path.display())]
    ReadArtifact {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("decoding broadcast file {}", path.display())]
    DecodeArtifact {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
    #[error(transparent)]
    ContractNotFound(#[from] ContractNotFound),
}

impl DeployError {
    /// Returns `true` if forge could not be run or rejected the deployment.
    pub fn is_tool_failure(&self) -> bool {
        matches!(self, Self::Spawn { .. } | Self::Tool { .. })
    }

    /// Returns `true` if forge succeeded but the deployed address could not be recovered.
    pub fn is_artifact_failure(&self) -> bool {
        !self.is_tool_failure()
    }

    /// Returns the combined stdout and stderr of a failed forge run.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Tool { output, .. } => Some(output),
            _ => None,
        }
    }
}
