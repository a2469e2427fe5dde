use holochain_serialized_bytes::SerializedBytesError;

#[derive(Debug, thiserror::Error)]
pub enum WebsocketError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Websocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error(transparent)]
    Serialization(#[from] SerializedBytesError),
    #[error("No response received before timeout")]
    RespTimeout,
    #[error("Websocket closed: {0}")]
    Close(String),
    #[error("Websocket error: {0}")]
    Other(String),
}

pub type WebsocketResult<T> = Result<T, WebsocketError>;
