use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, ToSocketAddrs};

use crate::{split_socket, WebsocketConfig, WebsocketReceiver, WebsocketResult, WebsocketSender};

/// A listening websocket server.
pub struct WebsocketListener {
    config: Arc<WebsocketConfig>,
    listener: TcpListener,
}

impl std::fmt::Debug for WebsocketListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebsocketListener")
            .field("local_addr", &self.listener.local_addr().ok())
            .finish()
    }
}

impl WebsocketListener {
    /// Bind a new websocket listener.
    pub async fn bind(
        config: Arc<WebsocketConfig>,
        addr: impl ToSocketAddrs,
    ) -> WebsocketResult<Self> {
        let listener = TcpListener::bind(addr).await?;
        tracing::debug!(local_addr = ?listener.local_addr().ok(), "websocket listener bound");
        Ok(Self { config, listener })
    }

    /// Get the bound local address of this listener.
    pub fn local_addr(&self) -> WebsocketResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept an incoming connection and complete the websocket handshake.
    pub async fn accept(&self) -> WebsocketResult<(WebsocketSender, WebsocketReceiver)> {
        let (socket, peer) = self.listener.accept().await?;
        let socket = tokio_tungstenite::accept_async_with_config(
            socket,
            Some(self.config.to_tungstenite()),
        )
        .await?;
        tracing::debug!(?peer, "accepted websocket connection");
        Ok(split_socket(socket))
    }
}
