//! An anvil process owned by a single test.

use crate::{
    account::Account,
    config::AnvilConfig,
    error::{AnvilError, DeployError},
};
use alloy_primitives::Address;
use alloy_provider::{Provider, RootProvider};
use bearchain_script_sequence::{Broadcast, Record};
use std::process::{Output, Stdio};
use tokio::process::{Child, Command};
use tracing::{debug, instrument, trace, warn};
use url::Url;

/// Lifecycle of the node process: `Stopped -> Starting -> Running -> Stopped`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeStatus {
    Stopped,
    Starting,
    Running,
}

/// Runs an anvil node and deploys contracts to it with `forge script`.
///
/// Each test should own its harness. Tests running concurrently need distinct ports, which is
/// up to the caller to configure. The node is killed when the harness is dropped.
#[derive(Debug)]
pub struct Anvil {
    config: AnvilConfig,
    accounts: Vec<Account>,
    url: String,
    endpoint: Url,
    node: Option<Child>,
    status: NodeStatus,
}

impl Anvil {
    /// Creates a stopped harness for the given configuration.
    pub fn new(config: AnvilConfig) -> Result<Self, AnvilError> {
        let accounts = config.genesis.build_accounts()?;
        let url = config.url();
        let endpoint =
            url.parse().map_err(|source| AnvilError::Url { url: url.clone(), source })?;
        Ok(Self { config, accounts, url, endpoint, node: None, status: NodeStatus::Stopped })
    }

    pub fn config(&self) -> &AnvilConfig {
        &self.config
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Returns the `i`th genesis account.
    pub fn account(&self, i: usize) -> Option<&Account> {
        self.accounts.get(i)
    }

    pub fn base_fee(&self) -> u64 {
        self.config.genesis.base_fee
    }

    pub fn chain_id(&self) -> u64 {
        self.config.genesis.chain_id
    }

    pub fn gas_limit(&self) -> u64 {
        self.config.genesis.gas_limit
    }

    pub fn genesis_timestamp(&self) -> u64 {
        self.config.genesis.timestamp
    }

    pub fn genesis_number(&self) -> u64 {
        self.config.genesis.number
    }

    /// Returns the node's HTTP URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> NodeStatus {
        self.status
    }

    /// Returns a JSON-RPC client connected to the node.
    pub fn client(&self) -> RootProvider {
        RootProvider::new_http(self.endpoint.clone())
    }

    /// Spawns the node and waits until it answers `eth_chainId`.
    ///
    /// With `silent` the node's output is discarded, otherwise it is forwarded to this process.
    /// If the node does not come up the process is killed and the harness is stopped again.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn start(&mut self, silent: bool) -> Result<(), AnvilError> {
        if self.node.is_some() {
            return Err(AnvilError::AlreadyRunning);
        }

        let mut cmd = Command::new(&self.config.node_program);
        cmd.args(self.config.node_command_args()).stdin(Stdio::null()).kill_on_drop(true);
        if silent {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }
        trace!(program = ?cmd.as_std().get_program(), args = ?cmd.as_std().get_args(), "spawning node");

        let child = cmd.spawn().map_err(|source| AnvilError::Spawn {
            program: self.config.node_program.clone(),
            source,
        })?;
        self.node = Some(child);
        self.status = NodeStatus::Starting;

        match self.wait_until_ready().await {
            Ok(()) => {
                self.status = NodeStatus::Running;
                debug!("node ready");
                Ok(())
            }
            Err(err) => {
                if let Err(stop_err) = self.stop().await {
                    warn!(%stop_err, "failed to clean up node");
                }
                Err(err)
            }
        }
    }

    /// Polls the node until it answers with the expected chain id.
    async fn wait_until_ready(&mut self) -> Result<(), AnvilError> {
        let client = self.client();
        let expected = self.chain_id();
        let interval = self.config.poll_interval();
        let timeout = self.config.readiness_timeout();
        let node = &mut self.node;

        let probe = async {
            loop {
                if let Some(child) = node.as_mut()
                    && let Some(status) = child.try_wait().map_err(AnvilError::Wait)?
                {
                    return Err(AnvilError::Exited { status });
                }

                match client.get_chain_id().await {
                    Ok(actual) if actual == expected => return Ok(()),
                    Ok(actual) => return Err(AnvilError::ChainIdMismatch { expected, actual }),
                    Err(err) => trace!(%err, "node not ready"),
                }
                tokio::time::sleep(interval).await;
            }
        };

        match tokio::time::timeout(timeout, probe).await {
            Ok(result) => result,
            Err(_) => Err(AnvilError::Readiness { url: self.url.clone(), timeout }),
        }
    }

    /// Kills the node if it is running.
    ///
    /// Calling this on a stopped harness is a no-op.
    pub async fn stop(&mut self) -> Result<(), AnvilError> {
        self.status = NodeStatus::Stopped;
        let Some(mut child) = self.node.take() else { return Ok(()) };

        if let Some(status) = child.try_wait().map_err(AnvilError::Wait)? {
            debug!(%status, "node had already exited");
            return Ok(());
        }
        child.kill().await.map_err(AnvilError::Kill)?;
        debug!("node stopped");
        Ok(())
    }

    /// Deploys `name` by running its deployment script and returns the contract's address.
    ///
    /// Runs
    /// `forge script <script_dir>/<name>.s.sol:<name>Script --rpc-url <url> --private-key <key> --broadcast`
    /// and reads the address back from the broadcast artifact.
    #[instrument(skip(self, signer), fields(signer = %signer.address()))]
    pub async fn deploy_contract(&self, name: &str, signer: &Account) -> Result<Address, DeployError> {
        let script_name = format!("{name}.s.sol");
        let script = format!("{}/{script_name}:{name}Script", self.config.script_dir.display());

        let mut cmd = Command::new(&self.config.forge_program);
        cmd.arg("script")
            .arg(&script)
            .arg("--rpc-url")
            .arg(&self.url)
            .arg("--private-key")
            .arg(signer.private_key_hex())
            .arg("--broadcast")
            .stdin(Stdio::null())
            .kill_on_drop(true);
        // the arguments carry the private key
        trace!(program = ?cmd.as_std().get_program(), %script, "running forge script");

        let output = cmd.output().await.map_err(|source| DeployError::Spawn {
            program: self.config.forge_program.clone(),
            source,
        })?;
        if !output.status.success() {
            return Err(DeployError::Tool {
                contract: name.to_string(),
                status: output.status,
                output: combined_output(&output),
            });
        }

        let path = Broadcast::artifact_path(&self.config.broadcast_dir, &script_name, self.chain_id());
        trace!(path = %path.display(), "reading broadcast");
        let json = match tokio::fs::read(&path).await {
            Ok(json) => json,
            Err(source) => return Err(DeployError::ReadArtifact { path, source }),
        };
        let broadcast = match Broadcast::decode(&json) {
            Ok(broadcast) => broadcast,
            Err(source) => return Err(DeployError::DecodeArtifact { path, source }),
        };

        let address = broadcast.find_contract_address(name)?;
        debug!(%address, "deployed contract");
        Ok(address)
    }
}

/// Joins the captured stdout and stderr of a process.
fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    match (stdout.trim().is_empty(), stderr.trim().is_empty()) {
        (false, false) => format!("{}\n{}", stdout.trim_end(), stderr.trim_end()),
        (false, true) => stdout.trim_end().to_string(),
        _ => stderr.trim_end().to_string(),
    }
}
