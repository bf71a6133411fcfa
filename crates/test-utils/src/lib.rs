//! # bearchain-test-utils
//!
//! Starts a local anvil node for integration tests and deploys contracts to it with
//! `forge script`.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod account;
pub use account::{Account, AccountError};

pub mod config;
pub use config::{AnvilConfig, ConfigError, GenesisAccount, GenesisConfig};

mod error;
pub use error::{AnvilError, DeployError};

mod anvil;
pub use anvil::{Anvil, NodeStatus};

/// Initializes tracing for tests, filtered by `RUST_LOG`.
///
/// Calling this more than once is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Loads the configuration, starts a node and waits until it is ready.
pub async fn spawn_anvil(silent: bool) -> eyre::Result<Anvil> {
    use eyre::WrapErr;

    let config = AnvilConfig::load()?;
    let mut anvil = Anvil::new(config)?;
    anvil.start(silent).await.wrap_err_with(|| format!("failed to start node at {}", anvil.url()))?;
    tracing::trace!(url = anvil.url(), "spawned node");
    Ok(anvil)
}
