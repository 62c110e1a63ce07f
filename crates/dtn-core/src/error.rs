//! Framework error type.
//!
//! Sub-crates define their own error enums and convert them into `DtnError`
//! via `From` impls, or keep them separate and wrap `DtnError` as one variant.
//! Both patterns are acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::{ConnectionId, HostId};

/// The top-level error type for `dtn-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum DtnError {
    #[error("host {0} not found")]
    HostNotFound(HostId),

    #[error("connection {0} not found")]
    ConnectionNotFound(ConnectionId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    /// A simulation invariant was violated —
    /// asymmetric connection state, negative remaining bytes, buffer
    /// over-occupancy, etc. Fatal: the caller must halt the run, because
    /// results would be meaningless past this point.
    #[error("invariant violation: {0}")]
    Invariant(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `dtn-*` crates.
pub type DtnResult<T> = Result<T, DtnError>;
