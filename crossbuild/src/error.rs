//! Error taxonomy for a cross-build run.
//!
//! Fatal errors ([`FatalError`]) abort the whole run before or between
//! targets. Per-target errors ([`BuildFailure`], [`StagingError`]) are recorded
//! in the run summary and never stop sibling targets.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown target '{name}' (expected one of: {known})")]
pub struct UnknownTarget {
    pub name: String,
    pub known: String,
}

/// A required external executable could not be resolved.
#[derive(Debug, Error)]
pub enum MissingToolError {
    #[error("`{tool}` not found in PATH{}", hint_line(.hint.as_deref()))]
    NotOnPath { tool: String, hint: Option<String> },

    #[error("`{tool}` not found at {}{}", .path.display(), hint_line(.hint.as_deref()))]
    NotAtPath {
        tool: String,
        path: PathBuf,
        hint: Option<String>,
    },
}

impl MissingToolError {
    pub fn tool(&self) -> &str {
        match self {
            Self::NotOnPath { tool, .. } | Self::NotAtPath { tool, .. } => tool,
        }
    }
}

fn hint_line(hint: Option<&str>) -> String {
    hint.map(|h| format!("\n  install with: {h}"))
        .unwrap_or_default()
}

#[derive(Debug, Error)]
#[error("failed to add rust target {triple}\n  try running: rustup target add {triple}")]
pub struct ToolchainInstallError {
    pub triple: &'static str,
}

/// The build tool did not produce a successful result for one target.
#[derive(Debug, Error)]
pub enum BuildFailure {
    #[error("cargo failed for {target} ({triple})")]
    Exited {
        target: &'static str,
        triple: &'static str,
    },

    #[error("cannot prepend {} to PATH for {target}", .path.display())]
    SearchPath {
        target: &'static str,
        path: PathBuf,
        #[source]
        source: std::env::JoinPathsError,
    },
}

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("built executable for {target} not found at {}", .path.display())]
    ArtifactNotFound { target: &'static str, path: PathBuf },

    #[error("failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that end the run before every requested target was attempted.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("prerequisite check failed: {0}")]
    MissingTool(#[from] MissingToolError),

    #[error(transparent)]
    ToolchainInstall(#[from] ToolchainInstallError),
}
