//! Wire types for the node's app and admin interfaces.

mod admin_interface;
mod app_interface;
mod zome_types;

pub use admin_interface::*;
pub use app_interface::*;
pub use zome_types::*;
