use crate::api::{ExternalApiWireError, FunctionName, InstalledAppId};
use holochain_serialized_bytes::SerializedBytesError;
use paperz_websocket::WebsocketError;

#[derive(Debug, thiserror::Error)]
pub enum ConductorApiError {
    #[error("Could not connect to {url}: {source}")]
    ConnectionFailed {
        url: String,
        #[source]
        source: WebsocketError,
    },
    #[error("Websocket error: {0}")]
    WebsocketError(#[from] WebsocketError),
    #[error("External API wire error: {0:?}")]
    ExternalApiWireError(ExternalApiWireError),
    #[error("App not found: {0}")]
    AppNotFound(InstalledAppId),
    #[error("App {0} has no cells")]
    NoCellAvailable(InstalledAppId),
    #[error("Unable to encode the payload for {fn_name}: {source}")]
    EncodeError {
        fn_name: FunctionName,
        #[source]
        source: SerializedBytesError,
    },
    #[error("Unable to decode the result of {fn_name}: {source}")]
    DecodeError {
        fn_name: FunctionName,
        #[source]
        source: SerializedBytesError,
    },
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
    #[error("Invalid url: {0}")]
    InvalidUrl(String),
    #[error("Config error: {0}")]
    ConfigError(#[from] serde_yaml::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<ExternalApiWireError> for ConductorApiError {
    fn from(err: ExternalApiWireError) -> Self {
        ConductorApiError::ExternalApiWireError(err)
    }
}

pub type ConductorApiResult<T> = Result<T, ConductorApiError>;
