//! Command implementations.

pub mod analytics;
pub mod analyze;
pub mod assist;
pub mod completions;
pub mod files;
pub mod goals;
pub mod journal;
pub mod new;
pub mod outputs;
pub mod patterns;
pub mod search;
pub mod status;
pub mod template;
pub mod version;

use crate::error::{Error, Result};

/// Build the async runtime used for model calls.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))
}

/// Current local time, second precision.
pub(crate) fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}
