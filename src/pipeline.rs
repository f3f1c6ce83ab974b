#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The per-version state machine and the batch loop around it.
//!
//! A version is either skipped (already collected), built (toolchain
//! resolved, BuildTools run, pom patched, docs generated, jar collected), or
//! failed at one of those steps. Failures are contained to their version;
//! only catalog errors stop the batch.

use std::fmt;

use anyhow::{Context, Result};
use itertools::Itertools;
use reqwest::blocking::Client;
use tabled::{
    Table, Tabled,
    settings::{Panel, Style},
};

use crate::{
    buildtools::{ensure_build_tools, generate_docs, run_build_tools},
    catalog::{RemoteCatalog, VersionCatalog},
    collect::{collect_javadoc, is_processed},
    config::Config,
    pom::patch_pom,
    process::{CommandRunner, SystemRunner},
    toolchain::CompilerRange,
    version::{Version, sort_ascending},
};

/// Result of processing one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionOutcome {
    /// The jar was collected by an earlier run.
    Skipped,
    /// The jar was built and collected.
    Built,
    /// A step failed; the reason is kept for the report.
    Failed(String),
}

impl fmt::Display for VersionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionOutcome::Skipped => f.write_str("skipped"),
            VersionOutcome::Built => f.write_str("built"),
            VersionOutcome::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Outcomes of a batch run, in processing order.
#[derive(Debug, Default, Clone)]
pub struct BatchReport {
    /// One entry per version.
    outcomes: Vec<(Version, VersionOutcome)>,
}

/// Row of the summary table.
#[derive(Tabled)]
struct ReportRow {
    /// Version identifier.
    #[tabled(rename = "Version")]
    version: String,
    /// Rendered outcome.
    #[tabled(rename = "Outcome")]
    outcome: String,
}

impl BatchReport {
    /// Outcomes in processing order.
    pub fn outcomes(&self) -> &[(Version, VersionOutcome)] {
        &self.outcomes
    }

    /// Outcome recorded for `version`.
    pub fn outcome(&self, version: &str) -> Option<&VersionOutcome> {
        self.outcomes
            .iter()
            .find(|(v, _)| v.as_str() == version)
            .map(|(_, o)| o)
    }

    /// Number of versions built in this run.
    pub fn built(&self) -> usize {
        self.count(|o| matches!(o, VersionOutcome::Built))
    }

    /// Number of versions skipped as already processed.
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, VersionOutcome::Skipped))
    }

    /// Number of versions that failed.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, VersionOutcome::Failed(_)))
    }

    /// Counts outcomes matching `pred`.
    fn count(&self, pred: impl Fn(&VersionOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }

    /// Renders the report as a table.
    pub fn table(&self) -> String {
        let rows = self.outcomes.iter().map(|(version, outcome)| ReportRow {
            version: version.to_string(),
            outcome: outcome.to_string(),
        });

        Table::new(rows)
            .with(Style::modern())
            .with(Panel::header(format!(
                "{} built, {} skipped, {} failed",
                self.built(),
                self.skipped(),
                self.failed()
            )))
            .to_string()
    }
}

/// Runs the whole pipeline for `version`.
///
/// `Err` is only returned when the catalog cannot provide the version's
/// compiler range; every later failure is reported as
/// [`VersionOutcome::Failed`].
pub fn process_version(
    config: &Config,
    catalog: &dyn VersionCatalog,
    runner: &mut dyn CommandRunner,
    version: &Version,
) -> Result<VersionOutcome> {
    if is_processed(config, version) {
        tracing::info!("Version {version} has already been processed. Skipping.");
        return Ok(VersionOutcome::Skipped);
    }

    tracing::info!("Processing version {version}");
    let range = catalog
        .compiler_range(version)
        .with_context(|| format!("Could not read the Java range of version {version}"))?;

    let outcome = match build_version(config, runner, version, range) {
        Ok(outcome) => outcome,
        Err(e) => VersionOutcome::Failed(format!("{e:#}")),
    };

    match &outcome {
        VersionOutcome::Built => tracing::info!("Completed processing version {version}"),
        VersionOutcome::Failed(reason) => {
            tracing::error!("Error processing version {version}: {reason}")
        }
        VersionOutcome::Skipped => {}
    }

    Ok(outcome)
}

/// Steps after the range is known: toolchain, BuildTools, pom, docs, collect.
fn build_version(
    config: &Config,
    runner: &mut dyn CommandRunner,
    version: &Version,
    range: CompilerRange,
) -> Result<VersionOutcome> {
    let java_home = match config.toolchains().resolve(range) {
        Ok(path) => path.to_path_buf(),
        Err(e) => {
            tracing::warn!(
                "Installed toolchains: {}",
                config.toolchains().majors().join(", ")
            );
            return Err(e.into());
        }
    };
    tracing::debug!("Using {} for {version}", java_home.display());

    if !run_build_tools(runner, config, &java_home, version)? {
        return Ok(VersionOutcome::Failed(format!(
            "Failed to build version {version}"
        )));
    }

    patch_pom(&config.pom_path())?;

    if !generate_docs(runner, config, &java_home)? {
        return Ok(VersionOutcome::Failed(format!(
            "Failed to generate javadoc for version {version}"
        )));
    }

    collect_javadoc(config, version)?;
    Ok(VersionOutcome::Built)
}

/// Processes every version from `catalog`, oldest first.
pub fn run_batch(
    config: &Config,
    catalog: &dyn VersionCatalog,
    runner: &mut dyn CommandRunner,
) -> Result<BatchReport> {
    let mut versions = catalog
        .versions()
        .context("Could not fetch the list of versions")?;
    sort_ascending(&mut versions);
    tracing::info!("Found {} versions to process", versions.len());

    let mut report = BatchReport::default();
    for version in versions {
        let outcome = process_version(config, catalog, runner, &version)?;
        report.outcomes.push((version, outcome));
    }

    tracing::info!(
        "All versions processed: {} built, {} skipped, {} failed",
        report.built(),
        report.skipped(),
        report.failed()
    );
    Ok(report)
}

/// Entry point of the `build` command: bootstraps BuildTools, then runs the
/// batch against the live catalog with real processes.
pub fn build_all(config: &Config) -> Result<BatchReport> {
    let client = Client::builder()
        .build()
        .context("Failed to construct HTTP client")?;

    std::fs::create_dir_all(config.build_tools_dir()).with_context(|| {
        format!("Could not create {}", config.build_tools_dir().display())
    })?;
    std::fs::create_dir_all(config.output_dir())
        .with_context(|| format!("Could not create {}", config.output_dir().display()))?;

    ensure_build_tools(config, &client)?;

    let catalog = RemoteCatalog::new(client, config);
    run_batch(config, &catalog, &mut SystemRunner)
}
