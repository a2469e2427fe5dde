//! defines the read/recv half of a websocket pair

use std::fmt::Debug;

use futures::stream::SplitStream;
use futures::StreamExt;
use holochain_serialized_bytes::{decode, encode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_bytes::ByteBuf;
use tokio_tungstenite::tungstenite::Message;

use crate::ws_core::{WsCoreSync, WsStream};
use crate::wire::WireMessage;
use crate::{WebsocketError, WebsocketResult};

/// Respond to an incoming request.
pub struct WebsocketRespond {
    id: u64,
    core: WsCoreSync,
}

impl std::fmt::Debug for WebsocketRespond {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebsocketRespond")
            .field("id", &self.id)
            .finish()
    }
}

impl WebsocketRespond {
    /// Send the response to the remote end that made the request.
    pub async fn respond<S>(self, msg: S) -> WebsocketResult<()>
    where
        S: Serialize + Debug,
    {
        tracing::trace!(response_msg = ?msg);
        let data = encode(&msg)?;
        self.core
            .send(WireMessage::Response {
                id: self.id,
                data: Some(ByteBuf::from(data)),
            })
            .await
    }
}

/// Types of messages that can be received by a WebsocketReceiver.
#[derive(Debug)]
pub enum ReceiveMessage<D>
where
    D: DeserializeOwned + Debug,
{
    /// Received a signal from the remote. The bytes are the msgpack
    /// encoding of whatever the remote sent.
    Signal(Vec<u8>),

    /// Received a request from the remote.
    Request(D, WebsocketRespond),
}

/// The Receiver/Read half of a split websocket.
///
/// Responses to requests made through the paired
/// [WebsocketSender](crate::WebsocketSender) are only delivered while
/// something is calling [WebsocketReceiver::recv].
pub struct WebsocketReceiver {
    core: WsCoreSync,
    stream: SplitStream<WsStream>,
}

impl std::fmt::Debug for WebsocketReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebsocketReceiver").finish()
    }
}

impl WebsocketReceiver {
    pub(crate) fn new(core: WsCoreSync, stream: SplitStream<WsStream>) -> Self {
        Self { core, stream }
    }

    /// Receive the next signal or request from the remote.
    ///
    /// Returns an error once the connection has closed, after failing
    /// every request still waiting on a response.
    pub async fn recv<D>(&mut self) -> WebsocketResult<ReceiveMessage<D>>
    where
        D: DeserializeOwned + Debug,
    {
        loop {
            let msg = match self.stream.next().await {
                Some(Ok(msg)) => msg,
                Some(Err(err)) => {
                    tracing::error!(websocket_error_from_network = ?err);
                    self.core.shutdown(err.to_string());
                    return Err(err.into());
                }
                None => {
                    self.core.shutdown("stream ended".into());
                    return Err(WebsocketError::Close("stream ended".into()));
                }
            };

            let bytes = match msg {
                Message::Binary(bytes) => bytes,
                Message::Close(frame) => {
                    let reason = frame
                        .map(|f| f.reason.to_string())
                        .unwrap_or_else(|| "closed by remote".into());
                    self.core.shutdown(reason.clone());
                    return Err(WebsocketError::Close(reason));
                }
                // tungstenite answers pings on the next write
                Message::Ping(_) | Message::Pong(_) => continue,
                m => {
                    tracing::error!("Websocket: Bad message type {:?}", m);
                    continue;
                }
            };

            let wire = match WireMessage::decode(&bytes) {
                Ok(wire) => wire,
                Err(e) => {
                    // a single bad frame should not kill the websocket
                    tracing::error!("Websocket failed to deserialize {:?}", e);
                    continue;
                }
            };
            tracing::trace!(received_msg = ?wire);

            match wire {
                WireMessage::Signal { data } => return Ok(ReceiveMessage::Signal(data)),
                WireMessage::Request { id, data } => {
                    let request: Result<D, _> = decode(&data);
                    match request {
                        Ok(request) => {
                            return Ok(ReceiveMessage::Request(
                                request,
                                WebsocketRespond {
                                    id,
                                    core: self.core.clone(),
                                },
                            ))
                        }
                        Err(e) => {
                            tracing::error!(id, "Websocket failed to deserialize request {:?}", e);
                            continue;
                        }
                    }
                }
                WireMessage::Response { id, data } => {
                    self.core.respond(id, data.map(ByteBuf::into_vec));
                }
            }
        }
    }
}
