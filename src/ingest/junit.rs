//! Local JUnit report adapter.
//!
//! Parses a `<testsuite>` document into a single-observation
//! [`JobSnapshot`]: each test case becomes one run of count 1, FAIL when
//! a `<failure>` child is present and PASS otherwise. Local reports
//! carry no revision information, so no change lists are produced.
//!
//! Read and parse failures are fatal by design: downstream comparison
//! assumes a complete snapshot, so there is no partial ingestion.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::IngestError;
use crate::data::{JobSnapshot, StatusRun, TestRecord, TestStatus};

/// A JUnit `<testsuite>` document, reduced to what ingestion consumes.
///
/// Unknown attributes and children (timings, properties, system-out)
/// are skipped during deserialization.
#[derive(Debug, Deserialize)]
struct TestSuite {
    #[serde(rename = "testcase", default)]
    cases: Vec<TestCase>,
}

#[derive(Debug, Deserialize)]
struct TestCase {
    #[serde(rename = "@name")]
    name: String,
    failure: Option<Failure>,
}

/// Presence alone marks the case failed; the message is not consumed.
#[derive(Debug, Deserialize)]
struct Failure {
    #[serde(rename = "@message", default)]
    #[allow(dead_code)]
    message: Option<String>,
}

/// Load a local JUnit report as a job snapshot.
///
/// The job id is the report's path string, matching how these rehearsal
/// jobs are named on the command line.
pub fn load_report(path: &Path, depth: usize) -> Result<JobSnapshot, IngestError> {
    let content = fs::read_to_string(path).map_err(|source| IngestError::ReadReport {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = parse_report(&content, &path.display().to_string(), depth).map_err(
        |source| IngestError::ParseReport {
            path: path.to_path_buf(),
            source,
        },
    )?;
    snapshot
        .validate()
        .map_err(|source| IngestError::InvalidSnapshot {
            job: snapshot.job.clone(),
            source,
        })?;
    Ok(snapshot)
}

fn parse_report(content: &str, job: &str, depth: usize) -> Result<JobSnapshot, quick_xml::DeError> {
    let suite: TestSuite = quick_xml::de::from_str(content)?;

    let tests = suite
        .cases
        .into_iter()
        .map(|case| {
            let value = if case.failure.is_some() {
                TestStatus::Fail
            } else {
                TestStatus::Pass
            };
            TestRecord {
                name: case.name,
                statuses: vec![StatusRun { count: 1, value }],
                short_texts: Vec::new(),
            }
        })
        .collect();

    Ok(JobSnapshot {
        job: job.to_string(),
        depth,
        tests,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuite name="openshift-tests" tests="3" failures="1" time="120.5">
    <testcase name="install succeeds" time="30.1"/>
    <testcase name="upgrade works" time="60.0">
        <failure message="timed out">operator never became ready</failure>
    </testcase>
    <testcase name="teardown is clean" time="30.4">
        <system-out>cleanup logs</system-out>
    </testcase>
</testsuite>"#;

    #[test]
    fn test_parse_report_maps_failure_markers() {
        let snapshot = parse_report(SAMPLE, "rehearse-pull-123", 5).unwrap();
        assert_eq!(snapshot.job, "rehearse-pull-123");
        assert_eq!(snapshot.depth, 5);
        assert!(snapshot.change_lists.is_empty());
        assert_eq!(snapshot.tests.len(), 3);

        let statuses: Vec<(&str, TestStatus)> = snapshot
            .tests
            .iter()
            .map(|t| (t.name.as_str(), t.statuses[0].value))
            .collect();
        assert_eq!(
            statuses,
            vec![
                ("install succeeds", TestStatus::Pass),
                ("upgrade works", TestStatus::Fail),
                ("teardown is clean", TestStatus::Pass),
            ]
        );
        for test in &snapshot.tests {
            assert_eq!(test.statuses, vec![StatusRun { count: 1, value: test.statuses[0].value }]);
        }
        snapshot.validate().unwrap();
    }

    #[test]
    fn test_load_report_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let snapshot = load_report(file.path(), 3).unwrap();
        assert_eq!(snapshot.job, file.path().display().to_string());
        assert_eq!(snapshot.tests.len(), 3);
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = load_report(Path::new("/nonexistent/junit.xml"), 5).unwrap_err();
        assert!(matches!(err, IngestError::ReadReport { .. }));
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not xml at all").unwrap();
        let err = load_report(file.path(), 5).unwrap_err();
        assert!(matches!(err, IngestError::ParseReport { .. }));
    }

    #[test]
    fn test_duplicate_case_names_are_fatal() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"<testsuite><testcase name="t"/><testcase name="t"/></testsuite>"#,
        )
        .unwrap();
        let err = load_report(file.path(), 5).unwrap_err();
        assert!(matches!(err, IngestError::InvalidSnapshot { .. }));
    }

    #[test]
    fn test_empty_suite_yields_empty_snapshot() {
        let snapshot = parse_report(r#"<testsuite name="empty"/>"#, "job", 5).unwrap();
        assert!(snapshot.tests.is_empty());
    }
}
