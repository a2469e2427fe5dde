use std::sync::Arc;

use async_trait::async_trait;
use paperz_websocket::{connect, WebsocketConfig, WebsocketSender};
use url2::Url2;

use crate::api::{AppRequest, AppResponse, ExternIO, InstalledAppId, InstalledAppInfo, ZomeCall};
use crate::interface::{impl_handler, AppInterface};
use crate::util::{drive_receiver, AbortOnDropHandle};
use crate::{ConductorApiError, ConductorApiResult};

/// A websocket connection to the app interface of a node.
#[derive(Clone)]
pub struct AppWebsocket {
    tx: WebsocketSender,
    _poll_handle: Arc<AbortOnDropHandle>,
}

impl std::fmt::Debug for AppWebsocket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppWebsocket").finish()
    }
}

impl AppWebsocket {
    /// Connect to a node's app interface, e.g. `ws://localhost:8888`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # #[tokio::main]
    /// # async fn main() {
    /// use paperz_client::AppWebsocket;
    ///
    /// let app_ws = AppWebsocket::connect(url2::Url2::parse("ws://localhost:8888"))
    ///     .await
    ///     .unwrap();
    /// # }
    /// ```
    pub async fn connect(url: Url2) -> ConductorApiResult<Self> {
        Self::connect_with_config(url, Arc::new(WebsocketConfig::CLIENT_DEFAULT)).await
    }

    /// Connect to a node's app interface with a custom [WebsocketConfig].
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

        // WebsocketReceiver needs to be polled in order to receive responses
        // from remote to sender requests.
        let poll_handle = tokio::task::spawn(drive_receiver("app", rx));

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
impl AppInterface for AppWebsocket {
    async fn app_info(
        &self,
        installed_app_id: InstalledAppId,
    ) -> ConductorApiResult<Option<InstalledAppInfo>> {
        impl_handler!(
            self, AppRequest::AppInfo { installed_app_id } => AppResponse, AppInfo(_)
        )
    }

    async fn zome_call(&self, call: ZomeCall) -> ConductorApiResult<ExternIO> {
        impl_handler!(
            self, AppRequest::ZomeCall(Box::new(call)) => AppResponse, ZomeCall(Box(_))
        )
    }
}
