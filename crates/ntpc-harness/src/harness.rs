// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scenario runner and CLI driver.
//!
//! [`Harness`] iterates the acceptance suite against one client binary,
//! feeding every outcome to the report. A scenario the runner cannot drive
//! (spawn failure, signal death, timeout) is recorded as failed and the run
//! continues — no error crosses a scenario boundary, so the summary always
//! prints.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::process::{BoundedRunner, ProcessRunner, SystemRunner};
use crate::report::Report;
use crate::scenario::{Scenario, ACCEPTANCE_SUITE};

/// Observed result of one scenario, as carried in the JSON run report.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Scenario label.
    pub label: String,
    /// Arguments the client was invoked with.
    pub args: Vec<String>,
    /// Exit code, when the client terminated on its own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Harness-level failure (spawn error, signal, timeout), when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether the observed outcome satisfied the expectation.
    pub passed: bool,
}

/// Aggregate of a full run, written to disk with `--report`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunReport {
    /// Path of the client binary under test.
    pub program: String,
    /// Scenarios attempted.
    pub total: u32,
    /// Scenarios whose expectation held.
    pub passed: u32,
    /// Scenarios whose expectation did not hold.
    pub failed: u32,
    /// Per-scenario detail, in display order.
    pub scenarios: Vec<ScenarioOutcome>,
}

/// Drives the acceptance suite against one client binary.
pub struct Harness<'r, W: Write> {
    program: PathBuf,
    runner: &'r dyn ProcessRunner,
    report: Report<W>,
}

impl<'r, W: Write> Harness<'r, W> {
    /// A harness for `program`, spawning through `runner` and rendering
    /// through `report`'s sink.
    pub fn new(program: PathBuf, runner: &'r dyn ProcessRunner, report: Report<W>) -> Self {
        Self {
            program,
            runner,
            report,
        }
    }

    /// Run every scenario in `suite` in order, render the summary, and
    /// return the aggregate.
    ///
    /// The only errors that escape are sink/render failures; scenario-level
    /// trouble is folded into the per-scenario outcome.
    pub fn run_all(&mut self, suite: &[Scenario]) -> Result<RunReport> {
        let mut outcomes = Vec::with_capacity(suite.len());
        for scenario in suite {
            outcomes.push(self.run_one(scenario)?);
        }
        self.report.summary().context("failed to render summary")?;
        Ok(RunReport {
            program: self.program.display().to_string(),
            total: self.report.total(),
            passed: self.report.passed(),
            failed: self.report.failed(),
            scenarios: outcomes,
        })
    }

    fn run_one(&mut self, scenario: &Scenario) -> Result<ScenarioOutcome> {
        // the suite always discards client output; it would interleave with
        // the report
        let (exit_code, error, passed) = match self.runner.run(&self.program, scenario.args, true) {
            Ok(code) => (Some(code), None, scenario.expect.matches(code)),
            Err(err) => {
                warn!(label = scenario.label, %err, "scenario could not be driven");
                (None, Some(err.to_string()), false)
            }
        };
        self.report
            .record(passed, scenario.label)
            .context("failed to render scenario line")?;
        Ok(ScenarioOutcome {
            label: scenario.label.to_owned(),
            args: scenario.args.iter().map(|a| (*a).to_owned()).collect(),
            exit_code,
            error,
            passed,
        })
    }
}

/// Harness command line.
#[derive(Parser, Debug)]
#[command(name = "ntpc-harness")]
#[command(about = "Black-box acceptance drills for the ntpc client")]
pub struct Cli {
    /// Path to the client binary under test.
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Kill any scenario still running after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Write a machine-readable run report to this path.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// CLI entry point: parse arguments, set up diagnostics, run the suite
/// against stdout.
pub fn entrypoint() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    Ok(ExitCode::from(run(&cli, io::stdout())?))
}

// Diagnostics go to stderr; the report owns stdout.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

/// Run the harness for an already-parsed command line, rendering into
/// `sink`, and return the process exit status.
///
/// Exits 1 before any scenario when the client path is missing or does not
/// exist. Exits 0 after attempting all scenarios, however many failed — the
/// aggregate is informational, carried by the summary and the JSON report.
pub fn run<W: Write>(cli: &Cli, mut sink: W) -> Result<u8> {
    let Some(program) = cli.file.as_deref() else {
        writeln!(sink, "Unspecified file name").context("failed to write to sink")?;
        return Ok(1);
    };
    if !program.exists() {
        writeln!(sink, "File {} not found", program.display())
            .context("failed to write to sink")?;
        return Ok(1);
    }

    let system = SystemRunner;
    let bounded;
    let runner: &dyn ProcessRunner = match cli.timeout {
        Some(secs) => {
            bounded = BoundedRunner::new(Duration::from_secs(secs));
            &bounded
        }
        None => &system,
    };

    let mut harness = Harness::new(program.to_path_buf(), runner, Report::new(sink));
    let run_report = harness.run_all(ACCEPTANCE_SUITE)?;
    if let Some(path) = cli.report.as_deref() {
        write_report(&run_report, path)?;
    }
    Ok(0)
}

fn write_report(report: &RunReport, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create report file {}", path.display()))?;
    serde_json::to_writer_pretty(file, report).context("failed to serialize run report")?;
    Ok(())
}
