use holo_hash::AgentPubKey;
use serde::{Deserialize, Serialize};

use super::{
    CapSecret, CellId, ExternIO, ExternalApiWireError, FunctionName, InstalledAppId, ZomeName,
};

/// Represents the available node functions to call over an app interface
/// and will result in a corresponding [`AppResponse`] message being sent back over the
/// interface connection.
///
/// # Errors
///
/// Returns an [`AppResponse::Error`] with a reason why the request failed.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "data")]
pub enum AppRequest {
    /// Get info about the app identified by the given `installed_app_id` argument,
    /// including info about each cell installed by this app.
    ///
    /// # Returns
    ///
    /// [`AppResponse::AppInfo`]
    AppInfo {
        /// The app ID for which to get information
        installed_app_id: InstalledAppId,
    },

    /// Call a zome function. See [`ZomeCall`]
    /// to understand the data that must be provided.
    ///
    /// # Returns
    ///
    /// [`AppResponse::ZomeCall`]
    ZomeCall(Box<ZomeCall>),
}

/// Represents the possible responses to an [`AppRequest`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "data")]
pub enum AppResponse {
    /// Can occur in response to any [`AppRequest`].
    ///
    /// There has been an error during the handling of the request.
    Error(ExternalApiWireError),

    /// The successful response to an [`AppRequest::AppInfo`].
    ///
    /// Option will be `None` if there is no installed app with the given `installed_app_id`.
    AppInfo(Option<InstalledAppInfo>),

    /// The successful response to an [`AppRequest::ZomeCall`].
    ///
    /// The client has to decode this back into the data returned by the zome.
    ZomeCall(Box<ExternIO>),
}

/// The data provided over an app interface in order to make a zome call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZomeCall {
    /// The ID of the cell containing the zome to be called
    pub cell_id: CellId,
    /// The zome containing the function to be called
    pub zome_name: ZomeName,
    /// The name of the zome function to call
    pub fn_name: FunctionName,
    /// The serialized data to pass as an argument to the zome function call
    pub payload: ExternIO,
    /// The capability request authorization
    ///
    /// `None` succeeds when the function has been granted `Unrestricted` access.
    pub cap_secret: Option<CapSecret>,
    /// The provenance (source) of the call
    ///
    /// The node trusts whoever holds the app connection to assert this.
    pub provenance: AgentPubKey,
}

/// Info about an installed app, returned as part of [`AppResponse::AppInfo`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledAppInfo {
    /// The unique identifier for an installed app in this node
    pub installed_app_id: InstalledAppId,
    /// Info about the cells installed in this app
    pub cell_data: Vec<InstalledCell>,
    /// The app's current status, in an API-friendly format
    pub status: InstalledAppInfoStatus,
}

/// A cell provisioned for an app, tagged with the role it fills.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledCell {
    /// The cell's identity
    pub cell_id: CellId,
    /// The role this cell plays in its app
    pub role_id: String,
}

impl InstalledCell {
    /// Constructor
    pub fn new(cell_id: CellId, role_id: impl Into<String>) -> Self {
        Self {
            cell_id,
            role_id: role_id.into(),
        }
    }
}

/// A flat, slightly more API-friendly representation of an app's status
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum InstalledAppInfoStatus {
    Paused { reason: PausedAppReason },
    Disabled { reason: DisabledAppReason },
    Running,
}

/// Why an app was paused by the node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PausedAppReason {
    /// The pause was caused by an error.
    Error(String),
}

/// Why an app is disabled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabledAppReason {
    /// The app was freshly installed and never started.
    NeverStarted,
    /// Disabled by a user.
    User,
    /// Disabled because of an error.
    Error(String),
}
