//! Whole-run orchestration.

use crate::command::ToolCommand;
use crate::config::{ActionConfig, ActionInputs};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::publish::GithubPublisher;
use crate::runner::ToolRunner;
use tracing::{info, warn};
use uuid::Uuid;

/// Drives one action run from raw inputs to a published outcome.
///
/// The run moves strictly forward: resolve inputs, invoke the tool,
/// normalize its output, report. Any error short-circuits into the
/// failure report; there are no retries and no partial success.
pub struct ActionPipeline;

impl ActionPipeline {
    /// Execute a full run and publish the outcome.
    ///
    /// Returns `true` when the matrix was discovered and recorded; the
    /// caller maps this to the process exit status. Every run ends in
    /// exactly one published report, whatever the outcome.
    pub async fn execute(inputs: ActionInputs, publisher: &GithubPublisher) -> bool {
        let run_id = Uuid::new_v4();
        info!(run_id = %run_id, "resolving action inputs");

        let config = match ActionConfig::resolve(inputs) {
            Ok(config) => config,
            Err(err) => {
                warn!(run_id = %run_id, error = %err, "input resolution failed");
                return publisher.publish(None, &Err(err));
            }
        };

        let outcome = Self::discover(&config).await;
        match &outcome {
            Ok(_) => info!(run_id = %run_id, "discovery completed"),
            Err(err) => warn!(run_id = %run_id, error = %err, "discovery failed"),
        }
        publisher.publish(Some(&config), &outcome)
    }

    /// Invoke the discovery tool and normalize its output.
    pub async fn discover(config: &ActionConfig) -> Result<Matrix> {
        let command = ToolCommand::build(config);
        info!(
            command = %command.shell_line(),
            repo = %config.repo_path.display(),
            "invoking discovery tool"
        );

        let output = ToolRunner::run(&command, config).await?;
        info!(duration_ms = output.duration_ms, "normalizing discovery output");

        Matrix::parse(&output.stdout)
    }
}
