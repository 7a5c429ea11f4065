//! API server lifecycle — starts/stops the axum HTTP server.
//!
//! bind → spawn background task → return handle with shutdown channel.

use std::net::SocketAddr;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::api_router;
use crate::core_state::CoreState;

/// Metadata for a running server.
#[derive(Debug, Clone, Serialize)]
pub struct ApiServerInfo {
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running API server.
pub struct ApiServer {
    pub info: ApiServerInfo,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ApiServer {
    /// Signal graceful shutdown. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish.
    pub async fn stopped(self) {
        if let Err(e) = self.task.await {
            tracing::error!("API server task failed: {e}");
        }
    }
}

/// Bind `addr` (port 0 picks an ephemeral port) and serve the API in a
/// background tokio task.
pub async fn start_api_server(core: Arc<CoreState>, addr: SocketAddr) -> Result<ApiServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind API server: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    let app = api_router(core);

    let info = ApiServerInfo {
        server_addr: addr.to_string(),
        port: addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        tracing::info!(%addr, "API server started");

        // Connect info feeds the login rate limiter with the peer address.
        let service = app.into_make_service_with_connect_info::<SocketAddr>();
        if let Err(e) = axum::serve(listener, service)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("API server error: {e}");
        }

        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        info,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use super::*;
    use crate::session::StaticCredentials;

    fn localhost() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
    }

    fn test_core(tmp: &tempfile::TempDir) -> Arc<CoreState> {
        Arc::new(CoreState::new(
            tmp.path().join("dispensary.db"),
            Box::new(StaticCredentials::with_iterations("admin", "pw", 1_000)),
        ))
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let tmp = tempfile::tempdir().unwrap();
        let mut server = start_api_server(test_core(&tmp), localhost())
            .await
            .expect("server should start");
        assert!(server.info.port > 0);

        let url = format!("http://127.0.0.1:{}/api/health", server.info.port);
        let status = reqwest::get(&url).await.unwrap().status();
        assert_eq!(status, reqwest::StatusCode::OK);

        // Protected route without a token
        let url = format!("http://127.0.0.1:{}/api/medicines", server.info.port);
        let status = reqwest::get(&url).await.unwrap().status();
        assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);

        server.shutdown();
        server.stopped().await;
    }

    #[tokio::test]
    async fn login_and_buy_over_the_wire() {
        let tmp = tempfile::tempdir().unwrap();
        let mut server = start_api_server(test_core(&tmp), localhost())
            .await
            .expect("server should start");
        let base = format!("http://127.0.0.1:{}", server.info.port);
        let client = reqwest::Client::new();

        let login: serde_json::Value = client
            .post(format!("{base}/api/auth/login"))
            .json(&serde_json::json!({"username": "admin", "password": "pw"}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let token = login["token"].as_str().unwrap().to_string();

        let status = client
            .post(format!("{base}/api/medicines"))
            .bearer_auth(&token)
            .json(&serde_json::json!({"name": "Ibuprofen", "price": 4.0, "quantity": 3}))
            .send()
            .await
            .unwrap()
            .status();
        assert_eq!(status, reqwest::StatusCode::CREATED);

        let status = client
            .post(format!("{base}/api/purchases"))
            .bearer_auth(&token)
            .json(&serde_json::json!({"medicine_name": "Ibuprofen", "quantity": 3}))
            .send()
            .await
            .unwrap()
            .status();
        assert_eq!(status, reqwest::StatusCode::CREATED);
        drop(client);

        server.shutdown();
        server.stopped().await;
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let mut server = start_api_server(test_core(&tmp), localhost())
            .await
            .expect("server should start");
        server.shutdown();
        server.shutdown(); // Second call should be safe
        server.stopped().await;
    }
}
