//! Data models shared between ingestion and the merge engine.
//!
//! ## Submodules
//!
//! - [`status`]: the wire model — run-length-encoded status timelines
//!   ([`StatusRun`], [`TestRecord`]) grouped into per-job snapshots
//!   ([`JobSnapshot`]), plus boundary validation
//! - [`label`]: the [`Label`] display union for one-or-many strings
//!
//! ## Data flow
//!
//! ```text
//! TestGrid table JSON ──┐
//!                       ├──▶ JobSnapshot ──▶ merge::merge()
//! local JUnit report ───┘
//! ```

pub mod label;
pub mod status;

pub use label::Label;
pub use status::{JobSnapshot, SnapshotError, StatusRun, TestRecord, TestStatus};
