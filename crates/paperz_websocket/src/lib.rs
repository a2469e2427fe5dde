#![deny(missing_docs)]
//! Msgpack request/response framing over websockets.
//!
//! Every binary frame carries one envelope: a signal, a request tagged
//! with a numeric id, or the response to such a request. The payload
//! inside the envelope is itself msgpack, so any serde type can be sent.
//!
//! To establish an outgoing connection, use [`connect`]
//! which will return a tuple
//! ([`WebsocketSender`], [`WebsocketReceiver`]).
//!
//! To open a listening socket, use [`WebsocketListener::bind`]
//! and call [`WebsocketListener::accept`] for each incoming connection.
//!
//! # Example
//!
//! ```no_run
//! use paperz_websocket::*;
//! use std::sync::Arc;
//!
//! # async fn doc_test() -> WebsocketResult<()> {
//! let config = Arc::new(WebsocketConfig::CLIENT_DEFAULT);
//! let url = url2::Url2::parse("ws://localhost:8888");
//! let (send, mut recv) = connect(config, url).await?;
//!
//! // responses are only routed while the receiver is polled
//! tokio::task::spawn(async move {
//!     while let Ok(_msg) = recv.recv::<serde::de::IgnoredAny>().await {}
//! });
//!
//! let echoed: String = send.request("hello".to_string()).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use futures::StreamExt;
use tracing::instrument;
use url2::Url2;

#[allow(missing_docs)]
mod error;
mod util;
mod websocket_config;
mod websocket_listener;
mod websocket_receiver;
mod websocket_sender;
mod wire;
mod ws_core;

pub use error::*;
pub use websocket_config::*;
pub use websocket_listener::*;
pub use websocket_receiver::*;
pub use websocket_sender::*;

#[instrument(skip(config))]
/// Create a new external websocket connection.
pub async fn connect(
    config: Arc<WebsocketConfig>,
    url: Url2,
) -> WebsocketResult<(WebsocketSender, WebsocketReceiver)> {
    let addr = util::url_to_addr(&url).await?;
    let socket = tokio::net::TcpStream::connect(addr).await?;
    socket.set_nodelay(true)?;
    let (socket, _) = tokio_tungstenite::client_async_with_config(
        url.as_str(),
        socket,
        Some(config.to_tungstenite()),
    )
    .await?;
    tracing::debug!(%url, "Client connected");
    Ok(split_socket(socket))
}

pub(crate) fn split_socket(socket: ws_core::WsStream) -> (WebsocketSender, WebsocketReceiver) {
    let (sink, stream) = socket.split();
    let core = ws_core::WsCore::new(sink);
    (
        WebsocketSender::new(core.clone()),
        WebsocketReceiver::new(core, stream),
    )
}
