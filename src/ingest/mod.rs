//! Ingestion adapters producing [`JobSnapshot`]s.
//!
//! Two producers share the snapshot model: [`junit::load_report`] parses
//! a local JUnit document (any failure there is fatal — the merge needs
//! a complete snapshot), and [`testgrid::TestGridClient`] fetches job
//! tables from a TestGrid instance (a failing pair is logged and
//! skipped).
//!
//! [`JobSnapshot`]: crate::data::JobSnapshot

pub mod junit;
pub mod testgrid;

pub use testgrid::TestGridClient;

use std::path::PathBuf;

use thiserror::Error;

use crate::data::SnapshotError;

/// Errors produced while ingesting job status data.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A local report could not be read. Fatal.
    #[error("failed to read report {path}: {source}")]
    ReadReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A local report could not be parsed. Fatal.
    #[error("failed to parse report {path}: {source}")]
    ParseReport {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },

    /// An HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The remote endpoint could not be reached.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The per-request timeout elapsed.
    #[error("request timed out")]
    Timeout,

    /// A response body could not be decoded.
    #[error("failed to decode payload: {0}")]
    Decode(String),

    /// A decoded snapshot violated a model invariant.
    #[error("invalid snapshot for job {job}: {source}")]
    InvalidSnapshot {
        job: String,
        #[source]
        source: SnapshotError,
    },
}

impl From<reqwest::Error> for IngestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            IngestError::Timeout
        } else if err.is_connect() {
            IngestError::Connection(err.to_string())
        } else if err.is_decode() {
            IngestError::Decode(err.to_string())
        } else {
            IngestError::Http(err.to_string())
        }
    }
}
