//! Harness configuration.
//!
//! Values are resolved in order of increasing priority: [`AnvilConfig::default`], the
//! `bearchain.toml` file and `BEARCHAIN_*` environment variables. Nested keys use a double
//! underscore, e.g. `BEARCHAIN_GENESIS__CHAIN_ID`.

use crate::account::{Account, AccountError};
use alloy_primitives::{Address, address};
use figment::{
    Figment, Provider,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Name of the configuration file.
pub const CONFIG_FILE: &str = "bearchain.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "BEARCHAIN_";

/// Error returned when the configuration cannot be resolved.
#[derive(Debug, thiserror::Error)]
#[error("failed to load harness configuration")]
pub struct ConfigError(#[source] Box<figment::Error>);

/// Everything the harness needs to start a node and deploy to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnvilConfig {
    /// Host the node listens on.
    pub host: String,
    /// Port the node listens on.
    pub port: u16,
    /// Node executable.
    pub node_program: PathBuf,
    /// Extra arguments for the node, passed after the ones derived from this configuration.
    pub node_args: Vec<String>,
    /// `forge` executable.
    pub forge_program: PathBuf,
    /// Directory `forge script` writes broadcast artifacts to.
    pub broadcast_dir: PathBuf,
    /// Directory holding the `<Name>.s.sol` deployment scripts.
    pub script_dir: PathBuf,
    /// How long to wait for the node to answer after it was spawned, in milliseconds.
    pub readiness_timeout_ms: u64,
    /// Delay between readiness probes, in milliseconds.
    pub poll_interval_ms: u64,
    pub genesis: GenesisConfig,
}

impl Default for AnvilConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8545,
            node_program: "anvil".into(),
            node_args: Vec::new(),
            forge_program: "forge".into(),
            broadcast_dir: "contracts/broadcast".into(),
            script_dir: "contracts/scripts".into(),
            readiness_timeout_ms: 10_000,
            poll_interval_ms: 50,
            genesis: GenesisConfig::default(),
        }
    }
}

impl AnvilConfig {
    /// Loads the configuration from [`CONFIG_FILE`] in the current directory and the
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Loads the configuration from the given file and the environment.
    ///
    /// A missing file is not an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_provider(Self::figment(path))
    }

    /// Returns the figment used by [`AnvilConfig::load_from`], without defaults.
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Toml::file(path.as_ref())).merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extracts the configuration from `provider` layered over the defaults.
    pub fn from_provider(provider: impl Provider) -> Result<Self, ConfigError> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(provider)
            .extract()
            .map_err(|err| ConfigError(Box::new(err)))
    }

    /// Returns the node's HTTP URL, `http://<host>:<port>`.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Returns the node's command line: the listen address and chain id followed by
    /// [`AnvilConfig::node_args`].
    pub fn node_command_args(&self) -> Vec<String> {
        let mut args = vec![
            "--host".to_string(),
            self.host.clone(),
            "--port".to_string(),
            self.port.to_string(),
            "--chain-id".to_string(),
            self.genesis.chain_id.to_string(),
        ];
        args.extend(self.node_args.iter().cloned());
        args
    }

    pub fn readiness_timeout(&self) -> Duration {
        Duration::from_millis(self.readiness_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// The node's deterministic genesis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisConfig {
    pub base_fee: u64,
    pub chain_id: u64,
    pub gas_limit: u64,
    pub timestamp: u64,
    pub number: u64,
    /// Balance of every genesis account, in ether.
    pub starting_balance: u64,
    pub accounts: Vec<GenesisAccount>,
}

/// A funded genesis account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAccount {
    pub address: Address,
    pub private_key: String,
}

impl GenesisAccount {
    fn new(address: Address, private_key: &str) -> Self {
        Self { address, private_key: private_key.to_string() }
    }
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            base_fee: 1_000_000_000,
            chain_id: 31337,
            gas_limit: 30_000_000,
            timestamp: 1769011998,
            number: 0,
            starting_balance: 10_000,
            accounts: default_accounts(),
        }
    }
}

impl GenesisConfig {
    /// Builds the genesis accounts, checking every key against its address.
    pub fn build_accounts(&self) -> Result<Vec<Account>, AccountError> {
        self.accounts
            .iter()
            .map(|account| {
                Account::new(account.address, account.private_key.clone(), self.starting_balance)
            })
            .collect()
    }
}

/// The accounts anvil funds when started without a mnemonic.
fn default_accounts() -> Vec<GenesisAccount> {
    vec![
        GenesisAccount::new(
            address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        ),
        GenesisAccount::new(
            address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"),
            "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
        ),
        GenesisAccount::new(
            address!("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC"),
            "0x5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a",
        ),
        GenesisAccount::new(
            address!("0x90F79bf6EB2c4f870365E785982E1f101E93b906"),
            "0x7c852118294e51e653712a81e05800f419141751be58f605c371e15141b007a6",
        ),
        GenesisAccount::new(
            address!("0x15d34AAf54267DB7D7c367839AAf71A00a2C6A65"),
            "0x47e179ec197488593b187f80a00eb0da91f1b9d0b13f8733639f19c30a34926a",
        ),
        GenesisAccount::new(
            address!("0x9965507D1a55bcC2695C58ba16FB37d819B0A4dc"),
            "0x8b3a350cf5c34c9194ca85829a2df0ec3153be0318b5e2d3348e872092edffba",
        ),
        GenesisAccount::new(
            address!("0x976EA74026E726554dB657fA54763abd0C3a0aa9"),
            "0x92db14e403b83dfe3df233f83dfa3a0d7096f21ca9b0d6d6b8d88b2b4ec1564e",
        ),
        GenesisAccount::new(
            address!("0x14dC79964da2C08b23698B3D3cc7Ca32193d9955"),
            "0x4bbbf85ce3377467afe5d46f804f221813b2bb87f24d81f60f1fcdbf7cbf4356",
        ),
        GenesisAccount::new(
            address!("0x23618e81E3f5cdF7f54C3d65f7FBc0aBf5B21E8f"),
            "0xdbda1821b80551c9d65939329250298aa3472ba22feea921c0cf5d620ea67b97",
        ),
        GenesisAccount::new(
            address!("0xa0Ee7A142d267C1f36714E4a8F75612F20a79720"),
            "0x2a871d0798f97d79848a013d4936a73bf4cc922c825d33c1cf7073dff6d409c6",
        ),
    ]
}
