#![cfg(test)]
//! Full-stack config snapshot: a real `JsonClient` against a canned HTTP
//! node double on localhost, persisted to a temporary directory.

use std::collections::HashMap;
use std::net::SocketAddr;

use nodectl_core::discovery::DiscoverySession;
use nodectl_protocols::http::JsonClient;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Minimal HTTP/1.1 responder: GET path -> canned JSON, else 404.
async fn spawn_node_double(routes: HashMap<&'static str, Value>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (mut stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 2048];
                let len = stream.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..len]).to_string();
                let path = request
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("/")
                    .to_string();

                let response = match routes.get(path.as_str()) {
                    Some(payload) => {
                        let body = payload.to_string();
                        format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        )
                    }
                    None => {
                        "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                            .to_string()
                    }
                };

                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    addr
}

#[tokio::test]
async fn snapshot_against_a_live_http_double() {
    let routes: HashMap<&'static str, Value> = HashMap::from([
        ("/json/version", json!({"version": "2.10", "board": "GD32F450"})),
        ("/json/list", json!({"list": {"name": "node_486149"}})),
        (
            "/json/config/directory",
            json!({"files": {"artnet/params": {"size": 96}, "network": {"size": 48}}}),
        ),
        ("/json/artnet/params", json!({"universe": 1, "merge": "HTP"})),
        ("/json/network", json!({"dhcp": true})),
    ]);
    let addr = spawn_node_double(routes).await;
    let dir = tempfile::tempdir().unwrap();

    let client = JsonClient::new().unwrap();
    let session =
        DiscoverySession::for_authority(&client, addr.to_string(), dir.path().to_path_buf());
    let report = session.run().await.unwrap();

    assert!(report.is_clean(), "report: {report:?}");
    assert_eq!(report.tally.ok, 5);

    // Round-trip: what was persisted decodes back to what was served.
    let text = std::fs::read_to_string(dir.path().join("params.json")).unwrap();
    let reread: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(reread, json!({"universe": 1, "merge": "HTP"}));

    for name in ["version.json", "list.json", "config_directory.json", "network.json"] {
        assert!(dir.path().join(name).is_file(), "missing {name}");
    }
}

#[tokio::test]
async fn missing_manifest_fails_the_session_without_entry_fetches() {
    let routes: HashMap<&'static str, Value> = HashMap::from([
        ("/json/version", json!({"version": "2.10"})),
        ("/json/list", json!({"list": {}})),
        // No /json/config/directory: the double answers 404.
    ]);
    let addr = spawn_node_double(routes).await;
    let dir = tempfile::tempdir().unwrap();

    let client = JsonClient::new().unwrap();
    let session =
        DiscoverySession::for_authority(&client, addr.to_string(), dir.path().to_path_buf());
    let report = session.run().await.unwrap();

    assert!(report.aborted);
    assert_eq!(report.tally.ok, 2);
    assert_eq!(report.tally.failed, 1);
    assert!(!dir.path().join("config_directory.json").exists());
}
