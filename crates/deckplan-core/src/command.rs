//! Discovery tool command construction.

use crate::config::ActionConfig;

/// The discovery tool invocation as an ordered token sequence.
///
/// Built once per run and immutable afterwards. Tokens are joined with
/// single spaces for shell execution, so values containing shell
/// metacharacters are the caller's responsibility; tags, branches and
/// overlays are expected to be plain identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    tokens: Vec<String>,
}

impl ToolCommand {
    /// Build the invocation for a resolved configuration.
    ///
    /// The working directory is set on the subprocess itself, so the
    /// directory argument is always the relative `.`. The `--overlay`
    /// flag is appended only when an overlay was configured; its absence
    /// tells the tool to include every environment.
    pub fn build(config: &ActionConfig) -> Self {
        let mut tokens = vec![
            config.discovery_bin.clone(),
            "discover".to_string(),
            ".".to_string(),
            "--format".to_string(),
            "github".to_string(),
            "--branch".to_string(),
            config.branch.clone(),
            "--tag".to_string(),
            config.tag.clone(),
        ];
        if let Some(overlay) = &config.overlay {
            tokens.push("--overlay".to_string());
            tokens.push(overlay.clone());
        }
        Self { tokens }
    }

    /// Ordered argument tokens; the first element is the executable.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The command as a single shell line.
    pub fn shell_line(&self) -> String {
        self.tokens.join(" ")
    }
}
