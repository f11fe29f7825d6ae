//! Deckplan - deployment-matrix discovery for CI
//!
//! Adapter between the `harbormaster` discovery tool and a GitHub Actions
//! job matrix:
//! - Resolves and validates action inputs
//! - Invokes the discovery tool against the checked-out repository
//! - Normalizes the tool's JSON output (tolerating one level of
//!   accidental double-encoding)
//! - Publishes the matrix and a run report to the hosting workflow

pub mod command;
pub mod config;
pub mod error;
pub mod matrix;
pub mod pipeline;
pub mod publish;
pub mod runner;
pub mod telemetry;

// Re-export key types
pub use command::ToolCommand;
pub use config::{ActionConfig, ActionInputs};
pub use error::{ActionError, Result};
pub use matrix::Matrix;
pub use pipeline::ActionPipeline;
pub use publish::GithubPublisher;
pub use runner::{ToolOutput, ToolRunner};
pub use telemetry::init_tracing;
