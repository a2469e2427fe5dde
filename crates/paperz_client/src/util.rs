use std::fmt::Debug;

use paperz_websocket::{ReceiveMessage, WebsocketReceiver};
use serde::de::IgnoredAny;

/// Aborts the wrapped task when dropped.
pub(crate) struct AbortOnDropHandle(tokio::task::AbortHandle);

impl AbortOnDropHandle {
    pub(crate) fn new(handle: tokio::task::AbortHandle) -> Self {
        Self(handle)
    }
}

impl Drop for AbortOnDropHandle {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl Debug for AbortOnDropHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbortOnDropHandle").finish()
    }
}

/// Poll the read half of a client connection until it closes.
///
/// Responses are routed to waiting requests as a side effect of polling.
/// The node never makes requests of a client, so any it sends are dropped.
pub(crate) async fn drive_receiver(interface: &'static str, mut rx: WebsocketReceiver) {
    loop {
        match rx.recv::<IgnoredAny>().await {
            Ok(ReceiveMessage::Signal(bytes)) => {
                tracing::trace!(interface, len = bytes.len(), "Signal received");
            }
            Ok(ReceiveMessage::Request(_, _)) => {
                tracing::warn!(interface, "Ignoring request from the node");
            }
            Err(err) => {
                tracing::debug!(interface, ?err, "Connection closed");
                break;
            }
        }
    }
}
