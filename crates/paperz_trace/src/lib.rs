#![warn(missing_docs)]
//! # Structured logging for paperz tests
//!
//! Events are filtered with the standard `RUST_LOG` syntax:
//! ```bash
//! RUST_LOG='paperz_client[call_zome{fn_name="upload_paper"}]=trace' cargo test
//! ```
//! Or more simply:
//! ```bash
//! RUST_LOG=debug cargo test
//! ```
//! If `CUSTOM_FILTER` is set it replaces the `RUST_LOG` filter entirely.

use tracing_subscriber::{
    filter::EnvFilter, fmt::TestWriter, layer::SubscriberExt, util::SubscriberInitExt, Layer,
    Registry,
};

pub use tracing;

/// Run logging in a unit test.
///
/// RUST_LOG must be set or this is a no-op.
/// Calling it more than once is harmless, later calls return an error
/// that tests are expected to ignore with `.ok()`.
pub fn test_run() -> Result<(), errors::TracingError> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }

    let layer = tracing_subscriber::fmt::Layer::default()
        .with_writer(TestWriter::new)
        .with_file(true)
        .with_line_number(true)
        .with_target(true);
    Registry::default()
        .with(layer.with_filter(standard_filter()?))
        .try_init()?;
    Ok(())
}

/// Build the canonical filter based on env
pub fn standard_filter() -> Result<EnvFilter, errors::TracingError> {
    match std::env::var("CUSTOM_FILTER") {
        Ok(custom) => Ok(EnvFilter::try_new(custom)?),
        Err(_) => Ok(EnvFilter::from_default_env()),
    }
}

pub mod errors {
    //! Error in the tracing/logging framework

    use thiserror::Error;

    /// Error in the tracing/logging framework
    #[allow(missing_docs)] // should be self-explanatory
    #[derive(Error, Debug)]
    pub enum TracingError {
        #[error(transparent)]
        TryInit(#[from] tracing_subscriber::util::TryInitError),
        #[error(transparent)]
        BadDirective(#[from] tracing_subscriber::filter::ParseError),
    }
}
