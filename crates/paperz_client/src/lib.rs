//! A typed client for the paperz zome.
//!
//! [PaperzClient] holds one app connection, one admin connection and the
//! id of the single cell it targets. Every zome function is exposed as a
//! typed method that funnels into [PaperzClient::call_zome].
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() {
//! use paperz_client::PaperzClient;
//!
//! let client = PaperzClient::initialize(8888, 9999).await.unwrap();
//! let accepted = client
//!     .set_state_machine_comp("widget.paperz", "(+ 1 2)")
//!     .await
//!     .unwrap();
//! # }
//! ```

mod admin_websocket;
pub mod api;
mod app_websocket;
mod client;
mod config;
mod error;
pub mod interface;
pub mod types;
mod util;

pub use admin_websocket::AdminWebsocket;
pub use api::{CellId, ExternIO, ExternalApiWireError, FunctionName, InstalledAppId, ZomeName};
pub use app_websocket::AppWebsocket;
pub use client::PaperzClient;
pub use config::{ClientConfig, DEFAULT_HOST, DEFAULT_INSTALLED_APP_ID, DEFAULT_ZOME_NAME};
pub use error::{ConductorApiError, ConductorApiResult};
pub use holo_hash::{ActionHash, AgentPubKey, DnaHash, EntryHash};
pub use interface::{AdminInterface, AppInterface, DynAdminInterface, DynAppInterface};
pub use paperz_websocket::{WebsocketConfig, WebsocketError};
