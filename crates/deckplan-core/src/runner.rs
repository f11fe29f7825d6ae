//! Discovery tool execution and output capture.

use crate::command::ToolCommand;
use crate::config::ActionConfig;
use crate::error::{ActionError, Result};
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

/// Environment variable carrying the access token into the subprocess.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Captured output of a completed discovery tool run.
///
/// Produced once per run and handed downstream by value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Exit code (0 = success).
    pub exit_code: i32,

    /// Captured stdout.
    pub stdout: String,

    /// Captured stderr.
    pub stderr: String,

    /// Duration in milliseconds.
    pub duration_ms: u64,
}

/// Runs the discovery tool and captures its output in full.
pub struct ToolRunner;

impl ToolRunner {
    /// Execute the command and wait for it to terminate.
    ///
    /// The subprocess runs in the resolved repository directory with the
    /// inherited environment plus the access token binding. Stdout and
    /// stderr are captured completely before anything is handed
    /// downstream; nothing is streamed.
    ///
    /// Fails when the tool exits non-zero, or exits zero without writing
    /// anything to stdout, or outlives the configured wait bound.
    pub async fn run(command: &ToolCommand, config: &ActionConfig) -> Result<ToolOutput> {
        let start = Instant::now();
        let shell_line = command.shell_line();

        debug!(command = %shell_line, "spawning discovery tool");

        let child = Command::new("sh")
            .arg("-c")
            .arg(&shell_line)
            .current_dir(&config.repo_path)
            .env(TOKEN_ENV_VAR, &config.github_token)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ActionError::Subprocess {
                reason: format!("could not be spawned: {e}"),
                exit_code: -1,
                stderr: String::new(),
            })?;

        let waited = if config.timeout_secs > 0 {
            tokio::time::timeout(
                std::time::Duration::from_secs(config.timeout_secs),
                child.wait_with_output(),
            )
            .await
            .map_err(|_| ActionError::Subprocess {
                reason: format!("timed out after {} seconds", config.timeout_secs),
                exit_code: -1,
                stderr: String::new(),
            })?
        } else {
            child.wait_with_output().await
        };

        let output = waited.map_err(|e| ActionError::Subprocess {
            reason: format!("could not be awaited: {e}"),
            exit_code: -1,
            stderr: String::new(),
        })?;

        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let duration_ms = start.elapsed().as_millis() as u64;

        if !output.status.success() {
            return Err(ActionError::Subprocess {
                reason: format!("exited with code {exit_code}"),
                exit_code,
                stderr,
            });
        }

        if stdout.trim().is_empty() {
            return Err(ActionError::Subprocess {
                reason: "exited successfully but wrote no output".to_string(),
                exit_code,
                stderr,
            });
        }

        debug!(exit_code, duration_ms, "discovery tool finished");

        Ok(ToolOutput {
            exit_code,
            stdout,
            stderr,
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_with_bin(bin: &str) -> ActionConfig {
        ActionConfig {
            overlay: None,
            branch: "main".to_string(),
            tag: "v1".to_string(),
            github_token: "tok".to_string(),
            repo_path: PathBuf::from("."),
            discovery_bin: bin.to_string(),
            timeout_secs: 0,
        }
    }

    #[tokio::test]
    async fn test_captures_stdout() {
        // `echo` prints the argument tokens back, which is non-empty output.
        let config = config_with_bin("echo");
        let command = ToolCommand::build(&config);

        let output = ToolRunner::run(&command, &config).await.expect("run failed");
        assert_eq!(output.exit_code, 0);
        assert!(output.stdout.contains("discover"));
        assert!(output.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_error() {
        let config = config_with_bin("false");
        let command = ToolCommand::build(&config);

        let err = ToolRunner::run(&command, &config).await.unwrap_err();
        match err {
            ActionError::Subprocess { exit_code, .. } => assert_ne!(exit_code, 0),
            other => panic!("expected Subprocess error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_silent_success_is_error() {
        // `true` exits zero without output.
        let config = config_with_bin("true");
        let command = ToolCommand::build(&config);

        let err = ToolRunner::run(&command, &config).await.unwrap_err();
        match err {
            ActionError::Subprocess { exit_code, reason, .. } => {
                assert_eq!(exit_code, 0);
                assert!(reason.contains("no output"), "unexpected reason: {reason}");
            }
            other => panic!("expected Subprocess error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_tool_is_error() {
        let config = config_with_bin("/nonexistent-discovery-binary");
        let command = ToolCommand::build(&config);

        // `sh -c` exits 127 when the command is not found.
        let err = ToolRunner::run(&command, &config).await.unwrap_err();
        match err {
            ActionError::Subprocess { exit_code, .. } => assert_eq!(exit_code, 127),
            other => panic!("expected Subprocess error, got {other:?}"),
        }
    }
}
