//! Run configuration.
//!
//! Built once at startup from command-line arguments and passed by
//! reference into each component; nothing reads ambient process state.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use regex::Regex;

/// Immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Recency window shared by every job in the run. Always >= 1.
    pub depth: usize,
    /// Which dashboards are offered in the interactive picker.
    pub dashboard_filter: Regex,
    /// Which jobs are offered in the interactive picker.
    pub job_filter: Regex,
    /// Explicit (dashboard -> jobs) selection; `None` means interactive.
    pub selection: Option<BTreeMap<String, Vec<String>>>,
    /// Local JUnit reports to ingest as rehearsal jobs.
    pub rehearse_reports: Vec<PathBuf>,
    /// Where the merged failure index is written.
    pub output: PathBuf,
    /// Base URL of the TestGrid instance.
    pub base_url: String,
    /// Per-request timeout for remote fetches.
    pub request_timeout: Duration,
}

/// Parse an explicit selection of the form `dash=job,job:dash=job`.
///
/// Malformed fragments are fatal; the error names the offending piece.
/// Duplicate jobs within one dashboard are dropped, keeping first
/// occurrence order.
pub fn parse_dashboard_jobs(raw: &str) -> Result<BTreeMap<String, Vec<String>>> {
    let mut selection = BTreeMap::new();
    for fragment in raw.split(':') {
        let Some((dashboard, jobs)) = fragment.split_once('=') else {
            bail!("{fragment:?} is not of the form dashboard=job,job");
        };
        if dashboard.is_empty() || jobs.is_empty() {
            bail!("{fragment:?} is not of the form dashboard=job,job");
        }
        let mut deduped: Vec<String> = Vec::new();
        for job in jobs.split(',').filter(|j| !j.is_empty()) {
            if !deduped.iter().any(|seen| seen == job) {
                deduped.push(job.to_string());
            }
        }
        selection.insert(dashboard.to_string(), deduped);
    }
    Ok(selection)
}
