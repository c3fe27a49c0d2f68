use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use regex::Regex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use testgrid_triage::config::{self, Config};
use testgrid_triage::ingest::junit;
use testgrid_triage::ingest::testgrid::{TestGridClient, DEFAULT_BASE_URL};
use testgrid_triage::select::{tui, Theme};
use testgrid_triage::{merge, output};

#[derive(Parser, Debug)]
#[command(name = "testgrid-triage")]
#[command(about = "Merge recent per-test failures across TestGrid jobs and local JUnit reports")]
struct Args {
    /// Local JUnit report paths to ingest as rehearsal jobs
    #[arg(long, value_delimiter = ',')]
    rehearse: Vec<PathBuf>,

    /// Explicit selection, e.g. "dash=job-a,job-b:other-dash=job-c".
    /// Skips the interactive picker.
    #[arg(long)]
    dashboard_jobs: Option<String>,

    /// Regex filtering which dashboards the picker offers
    #[arg(long, default_value = "redhat-openshift-ocp-release")]
    dashboard_filter: String,

    /// Regex filtering which jobs the picker offers
    #[arg(long, default_value = ".*")]
    job_filter: String,

    /// How many most-recent observations count toward a failure
    #[arg(short, long, default_value = "5")]
    depth: usize,

    /// Where to write the merged failure index
    #[arg(short, long, default_value = "triage-result.json")]
    output: PathBuf,

    /// Base URL of the TestGrid instance
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds for remote fetches
    #[arg(long, default_value = "10")]
    timeout: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = build_config(Args::parse())?;
    run(&config)
}

/// Turn raw arguments into the immutable run configuration.
///
/// Everything that can be malformed here is fatal: invalid filter
/// regexes, a zero depth, or a `--dashboard-jobs` value that does not
/// parse.
fn build_config(args: Args) -> Result<Config> {
    if args.depth == 0 {
        bail!("--depth must be at least 1");
    }
    let dashboard_filter = Regex::new(&args.dashboard_filter)
        .with_context(|| format!("invalid --dashboard-filter {:?}", args.dashboard_filter))?;
    let job_filter = Regex::new(&args.job_filter)
        .with_context(|| format!("invalid --job-filter {:?}", args.job_filter))?;
    let selection = args
        .dashboard_jobs
        .as_deref()
        .map(config::parse_dashboard_jobs)
        .transpose()
        .context("invalid --dashboard-jobs")?;

    Ok(Config {
        depth: args.depth,
        dashboard_filter,
        job_filter,
        selection,
        rehearse_reports: args.rehearse,
        output: args.output,
        base_url: args.base_url,
        request_timeout: Duration::from_secs(args.timeout),
    })
}

fn run(config: &Config) -> Result<()> {
    let client = TestGridClient::new(&config.base_url, config.request_timeout)?;
    let runtime = tokio::runtime::Runtime::new()?;

    let selection = match &config.selection {
        Some(selection) => selection.clone(),
        None => {
            let dashboards = runtime
                .block_on(client.fetch_dashboards())
                .context("fetching the dashboard list")?;
            match pick_selection(config, &dashboards)? {
                Some(selection) => {
                    print_flag_hint(&selection);
                    selection
                }
                None => {
                    println!("goodbye!");
                    return Ok(());
                }
            }
        }
    };

    // Local reports first; any failure here aborts the whole run.
    let mut snapshots = BTreeMap::new();
    for path in &config.rehearse_reports {
        info!(path = %path.display(), "ingesting rehearsal report");
        let snapshot = junit::load_report(path, config.depth)?;
        info!(tests = snapshot.tests.len(), depth = snapshot.depth, "report ingested");
        snapshots.insert(snapshot.job.clone(), snapshot);
    }

    snapshots.extend(runtime.block_on(client.fetch_selection(&selection, config.depth)));

    let index = merge::merge(snapshots);
    output::write_json(&config.output, &index)?;
    print!("{}", output::summary(&index));
    println!(
        "wrote {} failing tests to {}",
        index.len(),
        config.output.display()
    );
    Ok(())
}

/// Two-level interactive selection: dashboards, then jobs per dashboard.
///
/// Returns `None` when the operator cancels at either level, which
/// aborts the entire flow.
fn pick_selection(
    config: &Config,
    dashboards: &BTreeMap<String, Vec<String>>,
) -> Result<Option<BTreeMap<String, Vec<String>>>> {
    let theme = Theme::auto_detect();

    let names: Vec<String> = dashboards
        .keys()
        .filter(|name| config.dashboard_filter.is_match(name))
        .cloned()
        .collect();
    let picked = tui::pick("Dashboards", names, &theme)?;
    if picked.cancelled {
        return Ok(None);
    }

    let mut selection = BTreeMap::new();
    for dashboard in picked.chosen {
        let jobs: Vec<String> = dashboards
            .get(&dashboard)
            .map(|jobs| {
                jobs.iter()
                    .filter(|job| config.job_filter.is_match(job))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        let picked_jobs = tui::pick(&format!("Jobs in {dashboard}"), jobs, &theme)?;
        if picked_jobs.cancelled {
            return Ok(None);
        }
        if !picked_jobs.chosen.is_empty() {
            selection.insert(dashboard, picked_jobs.chosen);
        }
    }
    Ok(Some(selection))
}

/// Print the equivalent `--dashboard-jobs` value so the operator can
/// repeat the same query non-interactively.
fn print_flag_hint(selection: &BTreeMap<String, Vec<String>>) {
    let parts: Vec<String> = selection
        .iter()
        .map(|(dashboard, jobs)| format!("{dashboard}={}", jobs.join(",")))
        .collect();
    println!("=== Flag arg for future use ===");
    println!("--dashboard-jobs=\"{}\"", parts.join(":"));
    println!("===============================");
}
