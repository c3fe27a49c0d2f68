//! # testgrid-triage
//!
//! Merge recent per-test failures across CI jobs into a single index.
//!
//! Job status histories come from two places — TestGrid's HTTP endpoints
//! or local JUnit reports ("rehearsal" jobs) — and are decoded into a
//! shared snapshot model. A depth-windowed merge then attributes each
//! recent FAIL observation to its job (and revision, when known). When
//! no explicit selection is configured, an interactive two-level picker
//! chooses the dashboards and jobs to fetch.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  select (Picker + tui)                                   │
//! │      │  (dashboard, job) pairs                           │
//! │      ▼                                                   │
//! │  ingest ── testgrid (HTTP) ──┐                           │
//! │         └─ junit (local) ────┼──▶ data::JobSnapshot      │
//! │                              │                           │
//! │                              ▼                           │
//! │  merge ──▶ MergedFailureIndex ──▶ output (+ style)       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`data`]**: the wire model — run-length-encoded status timelines
//!   grouped into per-job snapshots, validated at the ingestion boundary
//! - **[`ingest`]**: the two snapshot producers and their error taxonomy
//!   (local failures fatal, per-pair remote failures skipped)
//! - **[`merge`]**: the depth-windowed merge into a deterministic index
//! - **[`select`]**: the pure picker state machine and its terminal driver
//! - **[`style`]**: stable hash-derived color/emoji assignment
//! - **[`output`]**: the annotated JSON handoff for external renderers
//!
//! ## Library usage
//!
//! ```
//! use std::collections::BTreeMap;
//! use testgrid_triage::data::{JobSnapshot, StatusRun, TestRecord, TestStatus};
//! use testgrid_triage::merge;
//!
//! let snapshot = JobSnapshot {
//!     job: "periodic-nightly".into(),
//!     depth: 5,
//!     tests: vec![TestRecord {
//!         name: "upgrade works".into(),
//!         statuses: vec![StatusRun { count: 2, value: TestStatus::Fail }],
//!         short_texts: Vec::new(),
//!     }],
//!     ..Default::default()
//! };
//!
//! let mut snapshots = BTreeMap::new();
//! snapshots.insert(snapshot.job.clone(), snapshot);
//! let index = merge::merge(snapshots);
//! assert_eq!(index["upgrade works"], vec!["periodic-nightly".to_string()]);
//! ```

pub mod config;
pub mod data;
pub mod ingest;
pub mod merge;
pub mod output;
pub mod select;
pub mod style;

// Re-export the main types for convenience
pub use config::Config;
pub use data::{JobSnapshot, Label, SnapshotError, StatusRun, TestRecord, TestStatus};
pub use ingest::{IngestError, TestGridClient};
pub use merge::MergedFailureIndex;
pub use select::{Picker, PickerEvent, Selection, Theme};
