//! Deckplan - deployment-matrix discovery action
//!
//! Thin binary front-end: reads the action inputs, runs the discovery
//! pipeline, and publishes the matrix to the hosting workflow. Inputs
//! arrive as flags or `INPUT_*` environment fallbacks, the way the
//! composite action wrapper hands them to a binary step.

use clap::Parser;
use deckplan_core::{init_tracing, ActionInputs, ActionPipeline, GithubPublisher};
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "deckplan")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Publish a deployment matrix discovered from the checked-out repository", long_about = None)]
struct Cli {
    /// Deployment environment to restrict the matrix to (all when omitted)
    #[arg(long, env = "INPUT_OVERLAY")]
    overlay: Option<String>,

    /// Branch handed to the discovery tool
    #[arg(long, env = "INPUT_BRANCH")]
    branch: Option<String>,

    /// Deployment tag stamped onto every matrix entry
    #[arg(long, env = "INPUT_TAG")]
    tag: Option<String>,

    /// Access token forwarded to the discovery tool as GITHUB_TOKEN
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Checked-out repository to discover against
    #[arg(long, env = "INPUT_REPO_PATH")]
    repo_path: Option<String>,

    /// Discovery tool binary to invoke
    #[arg(long, env = "INPUT_DISCOVERY_BIN")]
    discovery_bin: Option<String>,

    /// Bound on the discovery tool wait, in seconds (0 waits indefinitely)
    #[arg(long, env = "INPUT_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    let inputs = ActionInputs {
        overlay: cli.overlay,
        branch: cli.branch,
        tag: cli.tag,
        github_token: cli.github_token,
        repo_path: cli.repo_path,
        discovery_bin: cli.discovery_bin,
        timeout_secs: cli.timeout_secs,
    };

    let publisher = GithubPublisher::from_env();
    if ActionPipeline::execute(inputs, &publisher).await {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
