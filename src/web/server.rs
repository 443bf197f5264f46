//! Web server for Yatube.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::{Result, YatubeError};

use super::router::create_router;
use super::state::AppState;

/// HTTP server serving the site.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &ServerConfig, app_state: AppState) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| {
                YatubeError::Config(format!(
                    "invalid server address {}:{}: {}",
                    config.host, config.port, e
                ))
            })?;

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    async fn bind(&self) -> Result<TcpListener> {
        let listener = TcpListener::bind(self.addr).await?;
        tracing::info!("Web server listening on http://{}", listener.local_addr()?);
        Ok(listener)
    }

    /// Run the web server.
    pub async fn run(self) -> Result<()> {
        let listener = self.bind().await?;
        axum::serve(listener, create_router(self.app_state)).await?;
        Ok(())
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let listener = self.bind().await?;
        let local_addr = listener.local_addr()?;
        let router = create_router(self.app_state);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionKeys;
    use crate::web::middleware::SessionState;
    use crate::web::templates;
    use crate::Database;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    async fn test_state() -> AppState {
        AppState::new(
            Database::open_in_memory().await.unwrap(),
            templates::builtin().unwrap(),
            SessionState::new(SessionKeys::new("test-secret", 3600), "yatube_session"),
            "Yatube",
        )
    }

    fn test_config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Use random port
        }
    }

    #[tokio::test]
    async fn test_web_server_new() {
        let server = WebServer::new(&test_config(), test_state().await).unwrap();
        assert_eq!(server.addr().ip().to_string(), "127.0.0.1");
    }

    #[tokio::test]
    async fn test_invalid_address() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            port: 8000,
        };
        let result = WebServer::new(&config, test_state().await);
        assert!(matches!(result, Err(YatubeError::Config(_))));
    }

    #[tokio::test]
    async fn test_web_server_run() {
        let server = WebServer::new(&test_config(), test_state().await).unwrap();
        let addr = server.run_with_addr().await.unwrap();

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("OK"));
    }
}
