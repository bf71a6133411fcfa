//! Fake node and forge executables for exercising the harness without foundry installed.

use bearchain_test_utils::AnvilConfig;
use httptest::{
    Expectation, Server, ServerBuilder, all_of,
    matchers::{eq, json_decoded, request},
    responders::json_encoded,
};
use serde::Deserialize;
use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

/// Writes an executable shell script named `name` into `dir`.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Returns a port nothing is listening on.
pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// A harness configuration rooted in `dir` that fails fast.
pub fn config(dir: &Path, port: u16) -> AnvilConfig {
    AnvilConfig {
        port,
        node_program: write_script(dir, "node", "exec sleep 30"),
        broadcast_dir: dir.join("broadcast"),
        script_dir: dir.join("scripts"),
        readiness_timeout_ms: 2_000,
        poll_interval_ms: 20,
        ..Default::default()
    }
}

/// The method of a JSON-RPC request.
#[derive(Debug, PartialEq, Deserialize)]
struct RpcMethod {
    method: String,
}

/// Starts a JSON-RPC server answering `eth_chainId` with `chain_id`.
///
/// The server checks on drop that it was queried at least once.
pub fn serve_chain_id(chain_id: &str) -> Server {
    let server = ServerBuilder::new().bind_addr(([127, 0, 0, 1], 0).into()).run().unwrap();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/"),
            request::body(json_decoded(eq(RpcMethod { method: "eth_chainId".to_string() }))),
        ])
        .times(1..)
        .respond_with(json_encoded(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 0,
            "result": chain_id,
        }))),
    );
    server
}
