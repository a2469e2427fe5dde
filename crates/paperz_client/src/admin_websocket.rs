use std::sync::Arc;

use async_trait::async_trait;
use paperz_websocket::{connect, WebsocketConfig, WebsocketSender};
use url2::Url2;

use crate::api::{AdminRequest, AdminResponse, CellId, InstalledAppId};
use crate::interface::{impl_handler, AdminInterface};
use crate::util::{drive_receiver, AbortOnDropHandle};
use crate::{ConductorApiError, ConductorApiResult};

/// A websocket connection to the admin interface of a node.
#[derive(Clone)]
pub struct AdminWebsocket {
    tx: WebsocketSender,
    _poll_handle: Arc<AbortOnDropHandle>,
}

impl std::fmt::Debug for AdminWebsocket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminWebsocket").finish()
    }
}

impl AdminWebsocket {
    /// Connect to a node's admin interface, e.g. `ws://localhost:9999`.
    pub async fn connect(url: Url2) -> ConductorApiResult<Self> {
        Self::connect_with_config(url, Arc::new(WebsocketConfig::CLIENT_DEFAULT)).await
    }

    /// Connect to a node's admin interface with a custom [WebsocketConfig].
    pub async fn connect_with_config(
        url: Url2,
        websocket_config: Arc<WebsocketConfig>,
    ) -> ConductorApiResult<Self> {
        let (tx, rx) = connect(websocket_config, url.clone())
            .await
            .map_err(|source| ConductorApiError::ConnectionFailed {
                url: url.to_string(),
                source,
            })?;

        let poll_handle = tokio::task::spawn(drive_receiver("admin", rx));

        Ok(Self {
            tx,
            _poll_handle: Arc::new(AbortOnDropHandle::new(poll_handle.abort_handle())),
        })
    }

    /// Close the connection with a normal close frame.
    pub async fn close(&self) -> ConductorApiResult<()> {
        Ok(self.tx.close("client closed").await?)
    }
}

#[async_trait]
impl AdminInterface for AdminWebsocket {
    async fn list_cell_ids(&self) -> ConductorApiResult<Vec<CellId>> {
        impl_handler!(self, AdminRequest::ListCellIds => AdminResponse, CellIdsListed(_))
    }

    async fn list_active_apps(&self) -> ConductorApiResult<Vec<InstalledAppId>> {
        impl_handler!(self, AdminRequest::ListActiveApps => AdminResponse, ActiveAppsListed(_))
    }
}
