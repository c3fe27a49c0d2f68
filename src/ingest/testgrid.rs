//! Remote TestGrid adapter.
//!
//! Fetches per-job status tables and the dashboard listing from a
//! TestGrid instance. A failure on one (dashboard, job) pair is not
//! fatal: [`TestGridClient::fetch_selection`] logs it and moves on to
//! the remaining pairs. No retries are performed.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Client;
use tracing::{info, warn};

use super::IngestError;
use crate::data::JobSnapshot;

/// Public TestGrid instance used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://testgrid.k8s.io";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for a TestGrid instance.
#[derive(Debug, Clone)]
pub struct TestGridClient {
    client: Client,
    base: String,
}

impl TestGridClient {
    /// Create a client with a per-request timeout baked in.
    pub fn new(base: impl Into<String>, timeout: Duration) -> Result<Self, IngestError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IngestError::Http(e.to_string()))?;
        Ok(Self {
            client,
            base: base.into(),
        })
    }

    /// Fetch the status table for one (dashboard, job) pair.
    pub async fn fetch_job(
        &self,
        dashboard: &str,
        job: &str,
        depth: usize,
    ) -> Result<JobSnapshot, IngestError> {
        let url = self.job_url(dashboard, job);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(IngestError::Http(format!(
                "{url} returned status {}",
                response.status()
            )));
        }

        let mut snapshot: JobSnapshot = response
            .json()
            .await
            .map_err(|e| IngestError::Decode(e.to_string()))?;
        snapshot.job = job.to_string();
        snapshot.depth = depth;
        snapshot
            .validate()
            .map_err(|source| IngestError::InvalidSnapshot {
                job: job.to_string(),
                source,
            })?;
        Ok(snapshot)
    }

    /// Fetch the dashboard listing: dashboard name -> job names.
    pub async fn fetch_dashboards(&self) -> Result<BTreeMap<String, Vec<String>>, IngestError> {
        let url = self.list_url();
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(IngestError::Http(format!(
                "{url} returned status {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| IngestError::Decode(e.to_string()))
    }

    /// Fetch every job in `selection`, skipping pairs that fail.
    ///
    /// A failing pair is logged at warn level and excluded from the
    /// result; the remaining pairs proceed. Snapshots are keyed by job
    /// id, so no two entries ever collide.
    pub async fn fetch_selection(
        &self,
        selection: &BTreeMap<String, Vec<String>>,
        depth: usize,
    ) -> BTreeMap<String, JobSnapshot> {
        let mut snapshots = BTreeMap::new();
        for (dashboard, jobs) in selection {
            info!(%dashboard, jobs = jobs.len(), "fetching job tables");
            for job in jobs {
                match self.fetch_job(dashboard, job, depth).await {
                    Ok(snapshot) => {
                        info!(
                            %job,
                            tests = snapshot.tests.len(),
                            depth,
                            query = %snapshot.query,
                            "ingested"
                        );
                        snapshots.insert(job.clone(), snapshot);
                    }
                    Err(error) => {
                        warn!(%dashboard, %job, %error, "skipping job");
                    }
                }
            }
        }
        snapshots
    }

    fn job_url(&self, dashboard: &str, job: &str) -> String {
        format!("{}/{}/table?tab={}", self.base, dashboard, job)
    }

    fn list_url(&self) -> String {
        format!("{}/q/list", self.base)
    }
}
