use crate::test_helpers::{config, free_port, write_script};
use alloy_primitives::address;
use bearchain_script_sequence::Broadcast;
use bearchain_test_utils::{Anvil, AnvilConfig, DeployError};
use std::{fs, path::Path};

const BROADCAST: &str = include_str!("../../../script-sequence/testdata/broadcast.json");

/// A harness whose `forge` runs `body`.
fn harness(dir: &Path, body: &str) -> Anvil {
    let config = AnvilConfig {
        forge_program: write_script(dir, "forge", body),
        ..config(dir, free_port())
    };
    Anvil::new(config).unwrap()
}

/// Places a broadcast artifact where forge would write it for `script_name`.
fn write_artifact(anvil: &Anvil, script_name: &str, contents: &str) {
    let path = Broadcast::artifact_path(&anvil.config().broadcast_dir, script_name, anvil.chain_id());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[tokio::test]
async fn deploys_contract() {
    let dir = tempfile::tempdir().unwrap();
    let args_file = dir.path().join("forge-args");
    let anvil = harness(dir.path(), &format!("printf '%s\\n' \"$@\" > {}", args_file.display()));
    write_artifact(&anvil, "BearCoin.s.sol", BROADCAST);

    let signer = anvil.account(0).unwrap();
    let address = anvil.deploy_contract("BearCoin", signer).await.unwrap();
    assert_eq!(address, address!("0x5fbdb2315678afecb367f032d93f642f64180aa3"));

    let args = fs::read_to_string(args_file).unwrap();
    let args: Vec<_> = args.lines().collect();
    let script = format!("{}/BearCoin.s.sol:BearCoinScript", dir.path().join("scripts").display());
    similar_asserts::assert_eq!(
        args,
        vec![
            "script",
            script.as_str(),
            "--rpc-url",
            anvil.url(),
            "--private-key",
            signer.private_key_hex(),
            "--broadcast",
        ]
    );
}

#[tokio::test]
async fn reports_forge_failure_with_output() {
    let dir = tempfile::tempdir().unwrap();
    let anvil = harness(
        dir.path(),
        "echo 'Compiling 1 files'\necho 'Error: could not find script' >&2\nexit 1",
    );
    // a stale artifact must not be picked up
    write_artifact(&anvil, "Missing.s.sol", BROADCAST);

    let err = anvil.deploy_contract("Missing", anvil.account(0).unwrap()).await.unwrap_err();
    assert!(err.is_tool_failure(), "{err}");
    assert!(!err.is_artifact_failure());
    match &err {
        DeployError::Tool { contract, status, .. } => {
            assert_eq!(contract, "Missing");
            assert_eq!(status.code(), Some(1));
        }
        err => panic!("unexpected error: {err}"),
    }
    assert_eq!(err.output(), Some("Compiling 1 files\nError: could not find script"));
    assert!(err.to_string().contains("could not find script"));
}

#[tokio::test]
async fn reports_missing_forge() {
    let dir = tempfile::tempdir().unwrap();
    let config = AnvilConfig {
        forge_program: dir.path().join("no-such-forge"),
        ..config(dir.path(), free_port())
    };
    let anvil = Anvil::new(config).unwrap();

    let err = anvil.deploy_contract("BearCoin", anvil.account(0).unwrap()).await.unwrap_err();
    assert!(matches!(err, DeployError::Spawn { .. }), "{err}");
    assert!(err.is_tool_failure());
    assert_eq!(err.output(), None);
}

#[tokio::test]
async fn reports_missing_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let anvil = harness(dir.path(), "exit 0");

    let err = anvil.deploy_contract("BearCoin", anvil.account(0).unwrap()).await.unwrap_err();
    match &err {
        DeployError::ReadArtifact { path, source } => {
            assert!(path.ends_with("BearCoin.s.sol/31337/run-latest.json"), "{}", path.display());
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        err => panic!("unexpected error: {err}"),
    }
    assert!(err.is_artifact_failure());
}

#[tokio::test]
async fn reports_malformed_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let anvil = harness(dir.path(), "exit 0");
    let corrupt = BROADCAST.replacen("\"0x5fbdb2315678afecb367f032d93f642f64180aa3\"", "\"0xzz\"", 1);
    write_artifact(&anvil, "BearCoin.s.sol", &corrupt);

    let err = anvil.deploy_contract("BearCoin", anvil.account(0).unwrap()).await.unwrap_err();
    assert!(matches!(err, DeployError::DecodeArtifact { .. }), "{err}");
    assert!(err.is_artifact_failure());

    write_artifact(&anvil, "BearCoin.s.sol", "{ not json");
    let err = anvil.deploy_contract("BearCoin", anvil.account(0).unwrap()).await.unwrap_err();
    assert!(matches!(err, DeployError::DecodeArtifact { .. }), "{err}");
}

#[tokio::test]
async fn reports_contract_missing_from_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let anvil = harness(dir.path(), "exit 0");
    write_artifact(&anvil, "HoneyPot.s.sol", BROADCAST);

    let err = anvil.deploy_contract("HoneyPot", anvil.account(0).unwrap()).await.unwrap_err();
    match &err {
        DeployError::ContractNotFound(not_found) => assert_eq!(not_found.name, "HoneyPot"),
        err => panic!("unexpected error: {err}"),
    }
    assert!(err.is_artifact_failure());
    assert_eq!(err.to_string(), "contract not found: HoneyPot");
}

#[tokio::test]
#[ignore = "requires anvil and forge"]
async fn live_deploy() {
    bearchain_test_utils::init_tracing();
    let mut anvil = bearchain_test_utils::spawn_anvil(true).await.unwrap();
    let signer = anvil.account(0).unwrap().clone();
    let address = anvil.deploy_contract("BearCoin", &signer).await.unwrap();
    assert!(!address.is_zero());
    anvil.stop().await.unwrap();
}
