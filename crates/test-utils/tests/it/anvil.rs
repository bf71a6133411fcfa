use crate::test_helpers::{config, free_port, serve_chain_id, write_script};
use alloy_provider::Provider;
use bearchain_test_utils::{Anvil, AnvilConfig, AnvilError, NodeStatus, init_tracing};
use std::time::Duration;

#[tokio::test]
async fn starts_once_node_answers() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let server = serve_chain_id("0x7a69");

    let mut anvil = Anvil::new(config(dir.path(), server.addr().port())).unwrap();
    anvil.start(true).await.unwrap();
    assert_eq!(anvil.status(), NodeStatus::Running);
    assert_eq!(anvil.client().get_chain_id().await.unwrap(), anvil.chain_id());

    let err = anvil.start(true).await.unwrap_err();
    assert!(matches!(err, AnvilError::AlreadyRunning), "{err}");
    assert_eq!(anvil.status(), NodeStatus::Running);

    anvil.stop().await.unwrap();
    assert_eq!(anvil.status(), NodeStatus::Stopped);
    anvil.stop().await.unwrap();
    assert_eq!(anvil.status(), NodeStatus::Stopped);
}

#[tokio::test]
async fn restarts_after_stop() {
    let dir = tempfile::tempdir().unwrap();
    let server = serve_chain_id("0x7a69");

    let mut anvil = Anvil::new(config(dir.path(), server.addr().port())).unwrap();
    for _ in 0..2 {
        anvil.start(true).await.unwrap();
        assert_eq!(anvil.status(), NodeStatus::Running);
        anvil.stop().await.unwrap();
    }
}

#[tokio::test]
async fn times_out_when_node_never_answers() {
    let dir = tempfile::tempdir().unwrap();
    let config = AnvilConfig { readiness_timeout_ms: 200, ..config(dir.path(), free_port()) };

    let mut anvil = Anvil::new(config).unwrap();
    let err = anvil.start(true).await.unwrap_err();
    match err {
        AnvilError::Readiness { url, timeout } => {
            assert_eq!(url, anvil.url());
            assert_eq!(timeout, Duration::from_millis(200));
        }
        err => panic!("unexpected error: {err}"),
    }
    assert_eq!(anvil.status(), NodeStatus::Stopped);
}

#[tokio::test]
async fn reports_node_exiting_during_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = AnvilConfig {
        node_program: write_script(dir.path(), "crashing-node", "exit 3"),
        ..config(dir.path(), free_port())
    };

    let mut anvil = Anvil::new(config).unwrap();
    let err = anvil.start(false).await.unwrap_err();
    match err {
        AnvilError::Exited { status } => assert_eq!(status.code(), Some(3)),
        err => panic!("unexpected error: {err}"),
    }
    assert_eq!(anvil.status(), NodeStatus::Stopped);
}

#[tokio::test]
async fn rejects_foreign_chain() {
    let dir = tempfile::tempdir().unwrap();
    let server = serve_chain_id("0x1");

    let mut anvil = Anvil::new(config(dir.path(), server.addr().port())).unwrap();
    let err = anvil.start(true).await.unwrap_err();
    assert!(
        matches!(err, AnvilError::ChainIdMismatch { expected: 31337, actual: 1 }),
        "{err}"
    );
    assert_eq!(anvil.status(), NodeStatus::Stopped);
}

#[tokio::test]
async fn reports_missing_node_program() {
    let dir = tempfile::tempdir().unwrap();
    let config = AnvilConfig {
        node_program: dir.path().join("no-such-node"),
        ..config(dir.path(), free_port())
    };

    let mut anvil = Anvil::new(config).unwrap();
    let err = anvil.start(true).await.unwrap_err();
    assert!(matches!(err, AnvilError::Spawn { .. }), "{err}");
    assert_eq!(anvil.status(), NodeStatus::Stopped);
}

#[tokio::test]
async fn passes_node_args() {
    let dir = tempfile::tempdir().unwrap();
    let server = serve_chain_id("0x539");
    let args_file = dir.path().join("node-args");
    let node = write_script(
        dir.path(),
        "recording-node",
        &format!("printf '%s\\n' \"$@\" > {}\nexec sleep 30", args_file.display()),
    );
    let port = server.addr().port();
    let mut config = AnvilConfig {
        node_program: node,
        node_args: vec!["--silent".to_string()],
        ..config(dir.path(), port)
    };
    config.genesis.chain_id = 1337;

    let mut anvil = Anvil::new(config).unwrap();
    anvil.start(true).await.unwrap();

    // the fake server may answer before the script got to record its arguments
    for _ in 0..100 {
        if args_file.exists() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    anvil.stop().await.unwrap();

    let args = std::fs::read_to_string(args_file).unwrap();
    assert_eq!(args, format!("--host\n127.0.0.1\n--port\n{port}\n--chain-id\n1337\n--silent\n"));
}

#[tokio::test]
#[ignore = "requires anvil and forge"]
async fn live_anvil() {
    init_tracing();
    let mut anvil = bearchain_test_utils::spawn_anvil(false).await.unwrap();
    assert_eq!(anvil.client().get_chain_id().await.unwrap(), anvil.chain_id());
    anvil.stop().await.unwrap();
}
