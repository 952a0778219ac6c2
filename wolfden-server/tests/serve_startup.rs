use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use tempfile::tempdir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use wolfden_core::DocumentStore;
use wolfden_server::{serve, ServerConfig};

fn local_config(root: &std::path::Path, port: u16) -> ServerConfig {
    ServerConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port,
        root: root.to_path_buf(),
        ..ServerConfig::default()
    }
}

#[tokio::test]
async fn test_port_in_use_returns_without_serving() {
    let root = tempdir().unwrap();
    let store = DocumentStore::new(root.path());
    store.ensure_layout().await.unwrap();

    // Hold the port for the duration of the test.
    let occupied = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let port = occupied.local_addr().unwrap().port();
    let config = local_config(root.path(), port);

    let served = tokio::time::timeout(
        Duration::from_secs(5),
        serve(&config, store, std::future::pending::<()>()),
    )
    .await
    .expect("serve should return promptly when the port is taken")
    .unwrap();
    assert!(!served);
}

#[tokio::test]
async fn test_serves_until_shutdown() {
    let root = tempdir().unwrap();
    let store = DocumentStore::new(root.path());
    store.ensure_layout().await.unwrap();

    // Find a free port, then release it for the server.
    let port = {
        let scratch = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        scratch.local_addr().unwrap().port()
    };
    let config = local_config(root.path(), port);

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        serve(&config, store, async move {
            let _ = stop_rx.await;
        })
        .await
    });

    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{port}/api/saves");
    let mut listing = None;
    for _ in 0..50 {
        if let Ok(resp) = client.get(&url).send().await {
            listing = Some(resp.json::<serde_json::Value>().await.unwrap());
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(listing, Some(serde_json::json!([])));

    stop_tx.send(()).unwrap();
    let served = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server should stop after shutdown")
        .unwrap()
        .unwrap();
    assert!(served);
}
