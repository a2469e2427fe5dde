//! The envelope carried by every binary websocket frame.

use holochain_serialized_bytes::{decode, encode, SerializedBytesError};
use serde_bytes::ByteBuf;

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub(crate) enum WireMessage {
    /// A message that does not expect a response.
    Signal {
        #[serde(with = "serde_bytes")]
        data: Vec<u8>,
    },

    /// A message that expects a [WireMessage::Response] with the same id.
    Request {
        id: u64,
        #[serde(with = "serde_bytes")]
        data: Vec<u8>,
    },

    /// A reply to a request. `None` data means the remote canceled.
    Response { id: u64, data: Option<ByteBuf> },
}

impl WireMessage {
    pub(crate) fn encode(&self) -> Result<Vec<u8>, SerializedBytesError> {
        encode(self)
    }

    pub(crate) fn decode(bytes: &[u8]) -> Result<Self, SerializedBytesError> {
        decode(bytes)
    }
}
