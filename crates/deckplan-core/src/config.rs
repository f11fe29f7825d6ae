//! Action input resolution and validation.

use crate::error::{ActionError, Result};
use std::fmt;
use std::path::PathBuf;

/// Default discovery tool binary.
pub const DEFAULT_DISCOVERY_BIN: &str = "harbormaster";

/// Raw input values as read from the run environment.
///
/// All fields are optional here; validation and defaulting happen in
/// [`ActionConfig::resolve`]. GitHub Actions materializes unset inputs as
/// empty strings, so empty values count as absent.
#[derive(Debug, Clone, Default)]
pub struct ActionInputs {
    pub overlay: Option<String>,
    pub branch: Option<String>,
    pub tag: Option<String>,
    pub github_token: Option<String>,
    pub repo_path: Option<String>,
    pub discovery_bin: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Validated configuration for one action run.
#[derive(Clone)]
pub struct ActionConfig {
    /// Deployment environment to restrict the matrix to (None = all).
    pub overlay: Option<String>,

    /// Branch handed to the discovery tool.
    pub branch: String,

    /// Deployment tag stamped onto every matrix entry.
    pub tag: String,

    /// Access token forwarded to the tool as GITHUB_TOKEN. Never logged.
    pub github_token: String,

    /// Checked-out repository the tool runs against.
    pub repo_path: PathBuf,

    /// Discovery tool binary.
    pub discovery_bin: String,

    /// Bound on the subprocess wait in seconds; 0 waits indefinitely.
    pub timeout_secs: u64,
}

impl ActionConfig {
    /// Resolve raw inputs into a validated configuration.
    ///
    /// Required values are checked before the filesystem, and everything
    /// is checked before any subprocess is started. Values are forwarded
    /// verbatim; only emptiness is judged after trimming.
    pub fn resolve(inputs: ActionInputs) -> Result<Self> {
        let tag = required(inputs.tag, "tag")?;
        let github_token = required(inputs.github_token, "github-token")?;

        let branch = present(inputs.branch).unwrap_or_else(|| "main".to_string());
        let repo_path = PathBuf::from(present(inputs.repo_path).unwrap_or_else(|| ".".to_string()));
        if !repo_path.exists() {
            return Err(ActionError::Configuration(format!(
                "repo-path does not exist: {}",
                repo_path.display()
            )));
        }

        Ok(Self {
            overlay: present(inputs.overlay),
            branch,
            tag,
            github_token,
            repo_path,
            discovery_bin: present(inputs.discovery_bin)
                .unwrap_or_else(|| DEFAULT_DISCOVERY_BIN.to_string()),
            timeout_secs: inputs.timeout_secs.unwrap_or(0),
        })
    }
}

// Keeps the token out of `{:?}` output and hence out of log lines.
impl fmt::Debug for ActionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionConfig")
            .field("overlay", &self.overlay)
            .field("branch", &self.branch)
            .field("tag", &self.tag)
            .field("github_token", &"***")
            .field("repo_path", &self.repo_path)
            .field("discovery_bin", &self.discovery_bin)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Treat empty and whitespace-only values as absent.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(value: Option<String>, name: &str) -> Result<String> {
    present(value).ok_or_else(|| {
        ActionError::Configuration(format!("required input '{name}' is missing or empty"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_inputs() -> ActionInputs {
        ActionInputs {
            tag: Some("v1.2.3".to_string()),
            github_token: Some("tok".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_applies_defaults() {
        let config = ActionConfig::resolve(valid_inputs()).expect("resolve failed");
        assert_eq!(config.branch, "main");
        assert_eq!(config.repo_path, PathBuf::from("."));
        assert_eq!(config.discovery_bin, DEFAULT_DISCOVERY_BIN);
        assert_eq!(config.timeout_secs, 0);
        assert!(config.overlay.is_none());
    }

    #[test]
    fn test_missing_tag_rejected() {
        let mut inputs = valid_inputs();
        inputs.tag = None;
        let err = ActionConfig::resolve(inputs).unwrap_err();
        assert!(matches!(err, ActionError::Configuration(_)));
        assert!(err.to_string().contains("tag"));
    }

    #[test]
    fn test_empty_tag_rejected() {
        let mut inputs = valid_inputs();
        inputs.tag = Some("   ".to_string());
        let err = ActionConfig::resolve(inputs).unwrap_err();
        assert!(err.to_string().contains("tag"));
    }

    #[test]
    fn test_missing_token_rejected() {
        let mut inputs = valid_inputs();
        inputs.github_token = Some(String::new());
        let err = ActionConfig::resolve(inputs).unwrap_err();
        assert!(matches!(err, ActionError::Configuration(_)));
        assert!(err.to_string().contains("github-token"));
    }

    #[test]
    fn test_nonexistent_repo_path_rejected() {
        let mut inputs = valid_inputs();
        inputs.repo_path = Some("/nonexistent/deckplan/checkout".to_string());
        let err = ActionConfig::resolve(inputs).unwrap_err();
        assert!(matches!(err, ActionError::Configuration(_)));
        assert!(err.to_string().contains("repo-path"));
    }

    #[test]
    fn test_required_inputs_checked_before_filesystem() {
        let inputs = ActionInputs {
            repo_path: Some("/nonexistent/deckplan/checkout".to_string()),
            github_token: Some("tok".to_string()),
            ..Default::default()
        };
        let err = ActionConfig::resolve(inputs).unwrap_err();
        assert!(
            err.to_string().contains("tag"),
            "missing tag should be reported before the path check: {err}"
        );
    }

    #[test]
    fn test_empty_overlay_treated_as_absent() {
        let mut inputs = valid_inputs();
        inputs.overlay = Some(String::new());
        let config = ActionConfig::resolve(inputs).expect("resolve failed");
        assert!(config.overlay.is_none());
    }

    #[test]
    fn test_values_forwarded_verbatim() {
        let mut inputs = valid_inputs();
        inputs.branch = Some("release/2024".to_string());
        inputs.overlay = Some("production".to_string());
        let config = ActionConfig::resolve(inputs).expect("resolve failed");
        assert_eq!(config.branch, "release/2024");
        assert_eq!(config.overlay.as_deref(), Some("production"));
    }

    #[test]
    fn test_debug_masks_token() {
        let mut inputs = valid_inputs();
        inputs.github_token = Some("s3cr3t-value".to_string());
        let config = ActionConfig::resolve(inputs).expect("resolve failed");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("s3cr3t-value"), "token leaked: {rendered}");
        assert!(rendered.contains("***"));
    }
}
