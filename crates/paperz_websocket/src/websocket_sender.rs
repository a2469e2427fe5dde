//! defines the write/send half of a websocket pair

use std::fmt::Debug;
use std::time::Duration;

use holochain_serialized_bytes::{decode, encode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::oneshot;
use tracing::Instrument;

use crate::ws_core::WsCoreSync;
use crate::wire::WireMessage;
use crate::{WebsocketError, WebsocketResult};

/// The Sender/Write half of a split websocket. Use this to make
/// outgoing requests to the remote end of this websocket connection.
/// This struct is cheaply clone-able.
#[derive(Clone)]
pub struct WebsocketSender {
    core: WsCoreSync,
}

impl std::fmt::Debug for WebsocketSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebsocketSender")
            .field("closed", &self.core.is_closed())
            .finish()
    }
}

impl WebsocketSender {
    pub(crate) fn new(core: WsCoreSync) -> Self {
        Self { core }
    }

    /// Emit a signal (message without response) to the remote end of this websocket
    pub async fn signal<S>(&self, msg: S) -> WebsocketResult<()>
    where
        S: Serialize + Debug,
    {
        tracing::trace!(signal_msg = ?msg);
        let data = encode(&msg)?;
        self.core.send(WireMessage::Signal { data }).await
    }

    /// Make a rpc request of the remote end of this websocket.
    ///
    /// There is no deadline, the request resolves when the remote
    /// responds or the connection closes. The paired
    /// [WebsocketReceiver](crate::WebsocketReceiver) must be polled
    /// for responses to be delivered.
    pub async fn request<S, R>(&self, msg: S) -> WebsocketResult<R>
    where
        S: Serialize + Debug,
        R: DeserializeOwned + Debug,
    {
        async move {
            tracing::trace!(request_msg = ?msg);
            let data = encode(&msg)?;

            let (send_response, recv_response) = oneshot::channel();
            let guard = self.core.register(send_response)?;

            self.core
                .send(WireMessage::Request {
                    id: guard.id(),
                    data,
                })
                .await?;

            let bytes = recv_response
                .await
                .map_err(|_| WebsocketError::Close("response slot dropped".into()))??;
            drop(guard);

            Ok(decode(&bytes)?)
        }
        .instrument(tracing::debug_span!("sender_request"))
        .await
    }

    /// Same as [WebsocketSender::request] but gives up after `timeout`.
    /// Giving up releases the pending response slot.
    pub async fn request_timeout<S, R>(&self, msg: S, timeout: Duration) -> WebsocketResult<R>
    where
        S: Serialize + Debug,
        R: DeserializeOwned + Debug,
    {
        tokio::time::timeout(timeout, self.request(msg))
            .await
            .map_err(|_| WebsocketError::RespTimeout)?
    }

    /// Close the websocket with a normal close frame.
    pub async fn close(&self, reason: &str) -> WebsocketResult<()> {
        self.core.send_close(reason).await
    }

    /// Whether the underlying connection has shut down.
    pub fn is_closed(&self) -> bool {
        self.core.is_closed()
    }
}
