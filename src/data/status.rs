//! Wire model for job status histories.
//!
//! These types match the JSON format served by TestGrid's table endpoint.
//! They are the common data format between the two ingestion adapters and
//! the merge engine: both the remote fetcher and the local JUnit adapter
//! produce a [`JobSnapshot`] per job.

use serde::Deserialize;
use thiserror::Error;

/// Status of a single observation, using TestGrid's integer encoding.
///
/// TestGrid serializes statuses as bare integers; only the values the
/// merge cares about get named variants, everything else is carried
/// through as [`TestStatus::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "i32")]
pub enum TestStatus {
    NoResult,
    Pass,
    Fail,
    Other(i32),
}

impl From<i32> for TestStatus {
    fn from(value: i32) -> Self {
        match value {
            0 => TestStatus::NoResult,
            1 => TestStatus::Pass,
            12 => TestStatus::Fail,
            other => TestStatus::Other(other),
        }
    }
}

impl From<TestStatus> for i32 {
    fn from(status: TestStatus) -> i32 {
        match status {
            TestStatus::NoResult => 0,
            TestStatus::Pass => 1,
            TestStatus::Fail => 12,
            TestStatus::Other(other) => other,
        }
    }
}

/// A run-length-encoded segment of a test's observation history.
///
/// Means "the next `count` observations, most-recent-first, all have
/// status `value`". A valid run has `count >= 1`; that is enforced by
/// [`JobSnapshot::validate`] at the ingestion boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StatusRun {
    pub count: u32,
    pub value: TestStatus,
}

/// One test's full encoded history for one job.
#[derive(Debug, Clone, Deserialize)]
pub struct TestRecord {
    pub name: String,
    /// Run-length-encoded timeline, most-recent-first.
    #[serde(default)]
    pub statuses: Vec<StatusRun>,
    /// Free-text snippets attached to recent observations.
    #[serde(default)]
    pub short_texts: Vec<String>,
}

/// A complete status snapshot for one job.
///
/// `job` and `depth` are not part of the wire payload; the producing
/// adapter stamps them after decoding. `change_lists[i]` is the revision
/// identifier for the observation at decoded position `i + 1`; a short or
/// absent list simply means some attributions carry no revision.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobSnapshot {
    #[serde(skip)]
    pub job: String,
    /// Recency window: how many most-recent observations count.
    #[serde(skip)]
    pub depth: usize,
    #[serde(default, rename = "changeLists")]
    pub change_lists: Vec<String>,
    #[serde(default)]
    pub tests: Vec<TestRecord>,
    /// Upstream query string, surfaced in ingestion progress output.
    #[serde(default)]
    pub query: String,
}

/// Invariant violations caught at the ingestion boundary.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("recency depth must be at least 1")]
    ZeroDepth,
    #[error("test {test:?} has a status run with count 0")]
    ZeroCount { test: String },
    #[error("duplicate test name {test:?} within one snapshot")]
    DuplicateTest { test: String },
}

impl JobSnapshot {
    /// Check the model invariants.
    ///
    /// Adapters must call this before handing a snapshot to the merge
    /// engine; a violation is a defect in the producer, not a condition
    /// the merge recovers from.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.depth == 0 {
            return Err(SnapshotError::ZeroDepth);
        }
        let mut seen = std::collections::BTreeSet::new();
        for test in &self.tests {
            if !seen.insert(test.name.as_str()) {
                return Err(SnapshotError::DuplicateTest {
                    test: test.name.clone(),
                });
            }
            for run in &test.statuses {
                if run.count == 0 {
                    return Err(SnapshotError::ZeroCount {
                        test: test.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
