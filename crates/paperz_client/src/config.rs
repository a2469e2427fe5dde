//! Where the node lives and which app and zome the client targets.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url2::Url2;

use crate::api::{InstalledAppId, ZomeName};
use crate::{ConductorApiError, ConductorApiResult};

/// The app id the node installs the paperz happ under.
pub const DEFAULT_INSTALLED_APP_ID: &str = "test-app";

/// The zome hosting every paperz function.
pub const DEFAULT_ZOME_NAME: &str = "paperz_main_zome";

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "localhost";

/// Connection and targeting settings for a [PaperzClient](crate::PaperzClient).
///
/// Only the two ports are required when deserializing:
///
/// ```yaml
/// app_port: 8888
/// admin_port: 9999
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Host of both interfaces.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port of the app interface.
    pub app_port: u16,
    /// Port of the admin interface.
    pub admin_port: u16,
    /// App queried for the target cell.
    #[serde(default = "default_installed_app_id")]
    pub installed_app_id: InstalledAppId,
    /// Zome every call is addressed to.
    #[serde(default = "default_zome_name")]
    pub zome_name: ZomeName,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_installed_app_id() -> InstalledAppId {
    DEFAULT_INSTALLED_APP_ID.to_string()
}

fn default_zome_name() -> ZomeName {
    DEFAULT_ZOME_NAME.into()
}

impl ClientConfig {
    /// Config for a node on localhost with the default app and zome.
    pub fn new(app_port: u16, admin_port: u16) -> Self {
        Self {
            host: default_host(),
            app_port,
            admin_port,
            installed_app_id: default_installed_app_id(),
            zome_name: default_zome_name(),
        }
    }

    /// Parse a config from yaml.
    pub fn from_yaml_str(yaml: &str) -> ConductorApiResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a yaml config file.
    pub fn load(path: impl AsRef<Path>) -> ConductorApiResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        tracing::debug!(?path, "Loaded client config");
        Self::from_yaml_str(&yaml)
    }

    /// `ws://<host>:<app_port>`
    pub fn app_url(&self) -> ConductorApiResult<Url2> {
        self.ws_url(self.app_port)
    }

    /// `ws://<host>:<admin_port>`
    pub fn admin_url(&self) -> ConductorApiResult<Url2> {
        self.ws_url(self.admin_port)
    }

    fn ws_url(&self, port: u16) -> ConductorApiResult<Url2> {
        let url = format!("ws://{}:{}", self.host, port);
        Url2::try_parse(&url).map_err(|e| ConductorApiError::InvalidUrl(format!("{url}: {e}")))
    }
}
