//! The seams between [PaperzClient](crate::PaperzClient) and the node.
//!
//! The client only ever talks to these traits, so tests can swap the
//! websocket implementations for mocks.

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{CellId, ExternIO, InstalledAppId, InstalledAppInfo, ZomeCall};
use crate::ConductorApiResult;

/// Shared handle to an app interface.
pub type DynAppInterface = Arc<dyn AppInterface + Send + Sync>;

/// Shared handle to an admin interface.
pub type DynAdminInterface = Arc<dyn AdminInterface + Send + Sync>;

/// The app functions of a node the client depends on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppInterface {
    /// Fetch the info of an installed app, `None` if no such app exists.
    async fn app_info(
        &self,
        installed_app_id: InstalledAppId,
    ) -> ConductorApiResult<Option<InstalledAppInfo>>;

    /// Run a zome function and hand back its still-encoded result.
    async fn zome_call(&self, call: ZomeCall) -> ConductorApiResult<ExternIO>;
}

/// The admin functions of a node the client depends on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminInterface {
    /// List every cell running in the node.
    async fn list_cell_ids(&self) -> ConductorApiResult<Vec<CellId>>;

    /// List every active app.
    async fn list_active_apps(&self) -> ConductorApiResult<Vec<InstalledAppId>>;
}

/// Send a request and unpack the expected response variant.
///
/// An `Error` response becomes [ConductorApiError::ExternalApiWireError](crate::ConductorApiError),
/// any other variant is an [UnexpectedResponse](crate::ConductorApiError::UnexpectedResponse).
macro_rules! impl_handler {
    ($self: ident , $in: expr => $enum: ident , $res: ident (Box(_))) => {{
        let response: $enum = $self.tx.request($in).await?;
        match response {
            $enum::$res(v) => Ok(*v),
            $enum::Error(err) => Err(err.into()),
            r => Err($crate::ConductorApiError::UnexpectedResponse(format!(
                "expected a {}::{} but got: {:?}",
                stringify!($enum),
                stringify!($res),
                r
            ))),
        }
    }};
    ($self: ident , $in: expr => $enum: ident , $res: ident (_)) => {{
        let response: $enum = $self.tx.request($in).await?;
        match response {
            $enum::$res(v) => Ok(v),
            $enum::Error(err) => Err(err.into()),
            r => Err($crate::ConductorApiError::UnexpectedResponse(format!(
                "expected a {}::{} but got: {:?}",
                stringify!($enum),
                stringify!($res),
                r
            ))),
        }
    }};
}

pub(crate) use impl_handler;
