//! State shared between the sender and receiver halves of one connection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use futures::stream::SplitSink;
use futures::SinkExt;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

use crate::wire::WireMessage;
use crate::{WebsocketError, WebsocketResult};

pub(crate) type WsStream = WebSocketStream<TcpStream>;
type WsSink = SplitSink<WsStream, Message>;

/// Where a response for a pending request gets delivered.
type ResponseSlot = oneshot::Sender<WebsocketResult<Vec<u8>>>;

/// Pending outgoing requests keyed by request id.
#[derive(Default)]
struct ResponseMap(HashMap<u64, ResponseSlot>);

impl ResponseMap {
    fn insert(&mut self, id: u64, slot: ResponseSlot) {
        self.0.insert(id, slot);
    }

    fn remove(&mut self, id: u64) -> Option<ResponseSlot> {
        self.0.remove(&id)
    }

    fn drain(&mut self) -> Vec<ResponseSlot> {
        self.0.drain().map(|(_, slot)| slot).collect()
    }
}

pub(crate) struct WsCore {
    sink: tokio::sync::Mutex<WsSink>,
    responses: parking_lot::Mutex<ResponseMap>,
    next_id: AtomicU64,
    closed: AtomicBool,
}

pub(crate) type WsCoreSync = Arc<WsCore>;

impl WsCore {
    pub(crate) fn new(sink: WsSink) -> WsCoreSync {
        Arc::new(Self {
            sink: tokio::sync::Mutex::new(sink),
            responses: parking_lot::Mutex::new(ResponseMap::default()),
            next_id: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        })
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Register a response slot under a fresh request id.
    /// The returned guard releases the slot when dropped.
    pub(crate) fn register(
        self: &Arc<Self>,
        slot: ResponseSlot,
    ) -> WebsocketResult<ResponseGuard> {
        if self.is_closed() {
            return Err(WebsocketError::Close("connection already closed".into()));
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.responses.lock().insert(id, slot);
        Ok(ResponseGuard {
            core: self.clone(),
            id,
        })
    }

    /// Hand a response from the remote to whoever is waiting on it.
    pub(crate) fn respond(&self, id: u64, data: Option<Vec<u8>>) {
        let slot = self.responses.lock().remove(id);
        match slot {
            Some(slot) => {
                let result = data.ok_or_else(|| {
                    WebsocketError::Close("request canceled by remote".into())
                });
                // the requester may have given up already
                let _ = slot.send(result);
            }
            None => {
                tracing::warn!(
                    id,
                    "Websocket: Received response for request that doesn't exist or has gone stale"
                );
            }
        }
    }

    pub(crate) async fn send(&self, msg: WireMessage) -> WebsocketResult<()> {
        if self.is_closed() {
            return Err(WebsocketError::Close("connection already closed".into()));
        }
        tracing::trace!(sending_msg = ?msg);
        let bytes = msg.encode()?;
        let mut sink = self.sink.lock().await;
        if let Err(err) = sink.send(Message::Binary(bytes)).await {
            drop(sink);
            self.shutdown(format!("send failed: {}", err));
            return Err(err.into());
        }
        Ok(())
    }

    pub(crate) async fn send_close(&self, reason: &str) -> WebsocketResult<()> {
        let frame = CloseFrame {
            code: CloseCode::Normal,
            reason: reason.to_string().into(),
        };
        let res = self.sink.lock().await.send(Message::Close(Some(frame))).await;
        self.shutdown(reason.to_string());
        match res {
            Ok(()) => Ok(()),
            // closing an already closed socket is not an error
            Err(tokio_tungstenite::tungstenite::Error::ConnectionClosed)
            | Err(tokio_tungstenite::tungstenite::Error::AlreadyClosed) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Mark the connection dead and fail every pending request.
    pub(crate) fn shutdown(&self, reason: String) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::debug!(%reason, "websocket shutting down");
        let pending = self.responses.lock().drain();
        for slot in pending {
            let _ = slot.send(Err(WebsocketError::Close(reason.clone())));
        }
    }

    fn release(&self, id: u64) {
        self.responses.lock().remove(id);
    }
}

/// Releases a pending response slot when the requester goes away.
pub(crate) struct ResponseGuard {
    core: WsCoreSync,
    id: u64,
}

impl ResponseGuard {
    pub(crate) fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for ResponseGuard {
    fn drop(&mut self) {
        self.core.release(self.id);
    }
}
