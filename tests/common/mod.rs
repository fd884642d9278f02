//! Shared utilities for integration testing.

use std::net::SocketAddr;

use pathmux::config::{parse_config, ServerConfig};
use pathmux::http::HttpServer;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Parse a TOML configuration, panicking on invalid input.
#[allow(dead_code)]
pub fn config(toml: &str) -> ServerConfig {
    parse_config(toml).expect("test config should be valid")
}

/// A server running on an ephemeral local port.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Start the HTTP host for `config` on 127.0.0.1 with a random port.
#[allow(dead_code)]
pub async fn start_server(config: ServerConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let _ = server
            .run(listener, async {
                let _ = rx.await;
            })
            .await;
    });

    TestServer {
        addr,
        shutdown: Some(tx),
    }
}

/// HTTP client that bypasses any system proxy.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
