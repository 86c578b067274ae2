//! Simulator error definitions.
//!
//! Every fallible operation in the crate returns [`SimError`]. A run either
//! consumes its whole trace or aborts with one of these; there is no
//! partial-failure mode and nothing is retried.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the cache simulator.
#[derive(Debug, Error)]
pub enum SimError {
    /// The cache configuration cannot describe a buildable cache.
    ///
    /// Raised for an associativity below 1, bit widths whose sum exceeds the
    /// address width, a cache too large to allocate, or a configuration file
    /// that cannot be read or parsed.
    #[error("invalid cache configuration: {0}")]
    ConfigurationInvalid(String),

    /// The trace file cannot be opened or read.
    #[error("trace '{}' unavailable: {source}", .path.display())]
    TraceUnavailable {
        /// Path of the trace that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing verbose output or a results file failed.
    #[error("output failed: {0}")]
    Output(#[from] io::Error),
}

impl SimError {
    /// Builds a `ConfigurationInvalid` from anything displayable.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigurationInvalid(msg.into())
    }

    /// Builds a `TraceUnavailable` for `path`.
    pub fn trace(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::TraceUnavailable {
            path: path.into(),
            source,
        }
    }
}
