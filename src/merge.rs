//! Depth-windowed merge of job snapshots into a failure index.
//!
//! The merge walks each test's run-length-encoded timeline
//! most-recent-first and records an attribution for every FAIL run whose
//! starting position still falls inside the job's recency window. The
//! result maps test names to the jobs (optionally `job/revision`) that
//! failed that test recently.

use std::collections::BTreeMap;

use crate::data::{JobSnapshot, TestStatus};

/// Merged failure index: test name -> attributions.
///
/// Ordering is deterministic: test names sort via the map, and
/// attributions append iterating jobs in sorted job-id order, then in
/// timeline discovery order within a job.
pub type MergedFailureIndex = BTreeMap<String, Vec<String>>;

/// Merge a set of job snapshots, keyed by job id, into a failure index.
///
/// For each test, the timeline is consumed run by run: the position
/// advances by the run's full count, and the window check happens after
/// that advance. A run that starts inside the window but overshoots the
/// depth is therefore still evaluated once in full; only runs that begin
/// at or past the depth are skipped entirely. Repeated FAIL runs inside
/// the window each append their own attribution, none deduplicated —
/// intermittent flakiness shows up as repeated entries.
///
/// Performs no I/O. Snapshots are expected to have passed
/// [`JobSnapshot::validate`] at the ingestion boundary.
pub fn merge(snapshots: BTreeMap<String, JobSnapshot>) -> MergedFailureIndex {
    let mut merged = MergedFailureIndex::new();

    for (job, snapshot) in snapshots {
        let depth = snapshot.depth as u64;
        for test in &snapshot.tests {
            let mut pos: u64 = 0;
            for run in &test.statuses {
                debug_assert!(run.count >= 1, "zero-count run reached the merge");
                pos += u64::from(run.count);
                if pos > depth {
                    // Window exhausted; this run is not evaluated at all.
                    break;
                }
                if run.value == TestStatus::Fail {
                    let attribution = match snapshot.change_lists.get(pos as usize - 1) {
                        Some(revision) => format!("{job}/{revision}"),
                        None => job.clone(),
                    };
                    merged
                        .entry(test.name.clone())
                        .or_default()
                        .push(attribution);
                }
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{StatusRun, TestRecord};

    fn snapshot(job: &str, depth: usize, tests: Vec<TestRecord>) -> JobSnapshot {
        JobSnapshot {
            job: job.to_string(),
            depth,
            tests,
            ..Default::default()
        }
    }

    fn record(name: &str, runs: &[(u32, TestStatus)]) -> TestRecord {
        TestRecord {
            name: name.to_string(),
            statuses: runs
                .iter()
                .map(|&(count, value)| StatusRun { count, value })
                .collect(),
            short_texts: Vec::new(),
        }
    }

    fn merge_one(snapshot: JobSnapshot) -> MergedFailureIndex {
        let mut snapshots = BTreeMap::new();
        snapshots.insert(snapshot.job.clone(), snapshot);
        merge(snapshots)
    }

    #[test]
    fn test_single_fail_run_inside_window() {
        let index = merge_one(snapshot(
            "job-a",
            5,
            vec![record("t1", &[(3, TestStatus::Fail)])],
        ));
        assert_eq!(index.len(), 1);
        assert_eq!(index["t1"], vec!["job-a".to_string()]);
    }

    #[test]
    fn test_run_past_window_is_never_evaluated() {
        // Second run lands exactly at the depth and is evaluated; the
        // third pushes pos to 7 > 2 and is skipped outright.
        let index = merge_one(snapshot(
            "job-a",
            2,
            vec![record(
                "t1",
                &[
                    (1, TestStatus::Pass),
                    (1, TestStatus::Fail),
                    (5, TestStatus::Fail),
                ],
            )],
        ));
        assert_eq!(index["t1"], vec!["job-a".to_string()]);
    }

    #[test]
    fn test_straddling_run_is_evaluated_once_in_full() {
        // A run starting inside the window whose count overshoots the
        // depth still contributes exactly one attribution.
        let index = merge_one(snapshot(
            "job-a",
            5,
            vec![record("t1", &[(2, TestStatus::Pass), (4, TestStatus::Fail)])],
        ));
        assert!(index.is_empty(), "pos=6 exceeds depth 5, run skipped");

        let index = merge_one(snapshot(
            "job-a",
            6,
            vec![record("t1", &[(2, TestStatus::Pass), (4, TestStatus::Fail)])],
        ));
        assert_eq!(index["t1"], vec!["job-a".to_string()]);
    }

    #[test]
    fn test_change_list_attribution() {
        let mut snap = snapshot(
            "job-a",
            5,
            vec![record("t1", &[(1, TestStatus::Pass), (1, TestStatus::Fail)])],
        );
        snap.change_lists = vec!["rev1".into(), "rev2".into(), "rev3".into()];
        // The FAIL run is evaluated at pos=2, so it picks changeLists[1].
        let index = merge_one(snap);
        assert_eq!(index["t1"], vec!["job-a/rev2".to_string()]);
    }

    #[test]
    fn test_short_change_list_falls_back_to_job_id() {
        let mut snap = snapshot(
            "job-a",
            5,
            vec![record("t1", &[(3, TestStatus::Fail)])],
        );
        snap.change_lists = vec!["rev1".into()];
        // pos=3, no changeLists[2], so the job id alone is used.
        let index = merge_one(snap);
        assert_eq!(index["t1"], vec!["job-a".to_string()]);
    }

    #[test]
    fn test_intermittent_failures_append_all() {
        let index = merge_one(snapshot(
            "job-a",
            5,
            vec![record(
                "t1",
                &[
                    (1, TestStatus::Fail),
                    (1, TestStatus::Pass),
                    (1, TestStatus::Fail),
                ],
            )],
        ));
        assert_eq!(index["t1"], vec!["job-a".to_string(), "job-a".to_string()]);
    }

    #[test]
    fn test_all_pass_contributes_nothing() {
        let index = merge_one(snapshot(
            "job-a",
            5,
            vec![record("t1", &[(5, TestStatus::Pass)])],
        ));
        assert!(index.is_empty());
    }

    #[test]
    fn test_empty_snapshot_contributes_nothing() {
        let index = merge_one(snapshot("job-a", 5, Vec::new()));
        assert!(index.is_empty());
    }

    #[test]
    fn test_deterministic_ordering_across_jobs() {
        let mut snapshots = BTreeMap::new();
        for job in ["job-b", "job-a", "job-c"] {
            let snap = snapshot(job, 5, vec![record("t1", &[(1, TestStatus::Fail)])]);
            snapshots.insert(job.to_string(), snap);
        }
        let index = merge(snapshots);
        assert_eq!(
            index["t1"],
            vec!["job-a".to_string(), "job-b".to_string(), "job-c".to_string()]
        );
    }

    #[test]
    fn test_other_statuses_are_ignored() {
        let index = merge_one(snapshot(
            "job-a",
            5,
            vec![record(
                "t1",
                &[(1, TestStatus::NoResult), (1, TestStatus::Other(13))],
            )],
        ));
        assert!(index.is_empty());
    }
}
