use serde::{Deserialize, Serialize};

use super::{CellId, InstalledAppId};

/// Represents the node functions this client uses over an admin interface.
///
/// The admin connection is held for the lifetime of the client, only a
/// small read-only subset of the admin API is spoken here.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "data")]
pub enum AdminRequest {
    /// List the ids of every cell running in the node.
    ///
    /// # Returns
    ///
    /// [`AdminResponse::CellIdsListed`]
    ListCellIds,

    /// List the ids of every app that is currently active.
    ///
    /// # Returns
    ///
    /// [`AdminResponse::ActiveAppsListed`]
    ListActiveApps,
}

/// Represents the possible responses to an [`AdminRequest`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "data")]
pub enum AdminResponse {
    /// Can occur in response to any [`AdminRequest`].
    Error(ExternalApiWireError),

    /// The successful response to an [`AdminRequest::ListCellIds`].
    CellIdsListed(Vec<CellId>),

    /// The successful response to an [`AdminRequest::ListActiveApps`].
    ActiveAppsListed(Vec<InstalledAppId>),
}

/// Error type that goes over the websocket wire.
/// This intends to be application developer facing
/// so it should be readable and relevant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case", tag = "type", content = "data")]
pub enum ExternalApiWireError {
    /// Any internal error
    #[error("Internal error: {0}")]
    InternalError(String),
    /// The input to the API failed to deseralize.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    /// There was an error in the ribosome, for example the zome function
    /// returned an error or does not exist.
    #[error("Ribosome error: {0}")]
    RibosomeError(String),
    /// Error activating app.
    #[error("Activate app error: {0}")]
    ActivateApp(String),
    /// The zome call is unauthorized.
    #[error("Zome call unauthorized: {0}")]
    ZomeCallUnauthorized(String),
}

impl ExternalApiWireError {
    /// Convert the error from the display.
    pub fn internal<T: std::fmt::Display>(e: T) -> Self {
        // Display format is used because
        // this version intended for users.
        ExternalApiWireError::InternalError(e.to_string())
    }
}
