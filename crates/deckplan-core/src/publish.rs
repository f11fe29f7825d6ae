//! Publication of run outcomes to the hosting workflow.

use crate::config::ActionConfig;
use crate::error::ActionError;
use crate::matrix::Matrix;
use anyhow::Context;
use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info};

/// Output key under which the canonical matrix is recorded.
pub const MATRIX_OUTPUT_KEY: &str = "matrix";

/// Writes run results to the GitHub Actions output and summary channels.
///
/// Terminal sink for both outcomes: exactly one report is written per
/// run, and publication never raises. Sink write failures are logged and
/// only the failure to record the matrix itself fails the run.
#[derive(Debug, Clone)]
pub struct GithubPublisher {
    output_path: Option<PathBuf>,
    summary_path: Option<PathBuf>,
}

impl GithubPublisher {
    /// Publisher with explicit sink paths.
    pub fn new(output_path: Option<PathBuf>, summary_path: Option<PathBuf>) -> Self {
        Self {
            output_path,
            summary_path,
        }
    }

    /// Publisher wired to the hosting workflow run.
    ///
    /// Outside a workflow job (neither `GITHUB_OUTPUT` nor
    /// `GITHUB_STEP_SUMMARY` set) the sinks degrade to log lines.
    pub fn from_env() -> Self {
        Self {
            output_path: std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from),
            summary_path: std::env::var_os("GITHUB_STEP_SUMMARY").map(PathBuf::from),
        }
    }

    /// Publish the run outcome. Returns `true` only on the success path;
    /// the caller maps this to the process exit status.
    pub fn publish(
        &self,
        config: Option<&ActionConfig>,
        outcome: &Result<Matrix, ActionError>,
    ) -> bool {
        let report = match outcome {
            Ok(matrix) => success_report(config, matrix),
            Err(err) => failure_report(err),
        };
        if let Err(e) = self.write_summary(&report) {
            error!("failed to write run report: {e:#}");
        }

        match outcome {
            Ok(matrix) => {
                info!(key = MATRIX_OUTPUT_KEY, "recording deployment matrix");
                match self.set_output(MATRIX_OUTPUT_KEY, &matrix.to_canonical()) {
                    Ok(()) => true,
                    Err(e) => {
                        // Downstream jobs read the matrix from this record;
                        // without it the run has not actually succeeded.
                        error!("failed to record matrix output: {e:#}");
                        emit_error_annotation(&format!("failed to record matrix output: {e:#}"));
                        false
                    }
                }
            }
            Err(err) => {
                emit_error_annotation(&err.to_string());
                false
            }
        }
    }

    fn set_output(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let Some(path) = &self.output_path else {
            info!(%key, %value, "no output file in this environment");
            return Ok(());
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        writeln!(file, "{key}={value}").with_context(|| format!("appending to {}", path.display()))
    }

    fn write_summary(&self, report: &str) -> anyhow::Result<()> {
        let Some(path) = &self.summary_path else {
            info!("no summary file in this environment, report follows");
            info!("{report}");
            return Ok(());
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        file.write_all(report.as_bytes())
            .with_context(|| format!("appending to {}", path.display()))
    }
}

fn success_report(config: Option<&ActionConfig>, matrix: &Matrix) -> String {
    let mut report = String::from("### Deployment matrix\n\n");
    if let Some(config) = config {
        report.push_str(&format!("- tag: `{}`\n", config.tag));
        report.push_str(&format!("- branch: `{}`\n", config.branch));
        report.push_str(&format!(
            "- overlay: `{}`\n",
            config.overlay.as_deref().unwrap_or("all")
        ));
    }
    report.push_str(&format!(
        "- generated: {}\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    report.push_str("\n```json\n");
    report.push_str(&matrix.to_pretty());
    report.push_str("\n```\n");
    report
}

fn failure_report(err: &ActionError) -> String {
    let mut report = String::from("### Deployment matrix discovery failed\n\n");
    report.push_str(&format!("{err}\n"));
    match err {
        ActionError::Subprocess { stderr, .. } if !stderr.trim().is_empty() => {
            report.push_str("\n```\n");
            report.push_str(stderr.trim());
            report.push_str("\n```\n");
        }
        ActionError::MatrixParse { raw, .. } => {
            report.push_str("\n```\n");
            report.push_str(raw);
            report.push_str("\n```\n");
        }
        _ => {}
    }
    report
}

/// Emit a GitHub workflow error annotation on stdout.
fn emit_error_annotation(message: &str) {
    println!("::error::{}", encode_annotation(message));
}

// Workflow commands are line-oriented; data must percent-encode newlines.
fn encode_annotation(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
